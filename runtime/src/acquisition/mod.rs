//! Network acquisition of chart data.

pub mod http_client;

pub use http_client::SalesDataClient;
