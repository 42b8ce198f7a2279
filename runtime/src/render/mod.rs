//! Translation of chart specs into rendering-library configuration.

pub mod chartjs;

pub use chartjs::ChartJsConfig;
