//! Render reporting.

pub mod logger;

pub use logger::{RenderEvent, RenderReport};
