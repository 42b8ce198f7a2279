//! Embedded chart data extraction.
//!
//! Locates the carriers a server-side template embeds in a rendered page
//! (JSON text blocks and `data-*` attributes) and decodes them into
//! `serde_json::Value`s for the chart adapter.

pub mod carrier;
pub mod page;

pub use carrier::{CarrierKey, CarrierSource, EmbeddedDataset};
pub use page::{DataExtractor, Page, ViewMode};
