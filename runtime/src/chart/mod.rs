//! Chart adaptation: payload records to renderer-agnostic chart specs.

pub mod adapter;
pub mod color;
pub mod format;
pub mod kind;
pub mod records;
pub mod spec;

pub use adapter::ChartAdapter;
pub use color::{Color, ColorAssignment, ColorPolicy};
pub use format::{TooltipRule, ValueFormat};
pub use kind::ChartKind;
pub use spec::{Axis, AxisId, ChartSpec, Series, Variant};
