//! dashcharts: chart data extraction and chart configuration for the
//! sales/CRM dashboard.
//!
//! Pages embed chart input as JSON in element text or `data-*` attributes,
//! or serve it from an endpoint. [`extraction`] locates and decodes it,
//! [`chart`] turns it into a [`chart::ChartSpec`], [`render`] translates the
//! spec into a Chart.js configuration, and [`pipeline`] runs the charts of a
//! page so that one bad chart never stops the others.

pub mod acquisition;
pub mod audit;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod render;

pub use error::{ChartError, ChartResult};
