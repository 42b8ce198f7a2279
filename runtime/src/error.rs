//! Error taxonomy for chart extraction and adaptation.
//!
//! Every variant is caught at the boundary of a single chart by the
//! pipeline; none of them is allowed to halt the other charts of a page.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartError {
    #[error("carrier '{key}' not found on page")]
    CarrierNotFound { key: String },

    #[error("failed to decode carrier '{key}': {reason}")]
    Decode { key: String, reason: String },

    #[error("record {index} is missing field '{field}'")]
    MissingField { field: String, index: usize },

    #[error("expected {expected} at the top level of the payload")]
    UnexpectedShape { expected: String },

    #[error("record {index} has a non-numeric value in field '{field}'")]
    InvalidField { field: String, index: usize },

    #[error("column '{field}' has {found} entries, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Well-formed but empty input. Signals "render nothing".
    #[error("no data to plot for {chart}")]
    EmptyDataset { chart: String },

    #[error("fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },
}

impl ChartError {
    pub fn carrier_not_found(key: impl ToString) -> Self {
        Self::CarrierNotFound {
            key: key.to_string(),
        }
    }

    pub fn decode(key: impl ToString, reason: impl ToString) -> Self {
        Self::Decode {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_field(field: &str, index: usize) -> Self {
        Self::MissingField {
            field: field.to_string(),
            index,
        }
    }

    pub fn invalid_field(field: &str, index: usize) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            index,
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is the empty-dataset signal rather than a real failure.
    pub fn is_empty_signal(&self) -> bool {
        matches!(self, Self::EmptyDataset { .. })
    }

    /// Short machine-readable name, used in render reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CarrierNotFound { .. } => "carrier_not_found",
            Self::Decode { .. } => "decode_error",
            Self::MissingField { .. } => "missing_field",
            Self::UnexpectedShape { .. } => "unexpected_shape",
            Self::InvalidField { .. } => "invalid_field",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::EmptyDataset { .. } => "empty_dataset",
            Self::Fetch { .. } => "fetch_error",
        }
    }
}

pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChartError::carrier_not_found("#chart-data[data-daily-orders]");
        assert_eq!(
            err.to_string(),
            "carrier '#chart-data[data-daily-orders]' not found on page"
        );

        let err = ChartError::missing_field("date", 2);
        assert_eq!(err.to_string(), "record 2 is missing field 'date'");
    }

    #[test]
    fn test_empty_signal() {
        let empty = ChartError::EmptyDataset {
            chart: "daily_orders".to_string(),
        };
        assert!(empty.is_empty_signal());
        assert_eq!(empty.code(), "empty_dataset");
        assert!(!ChartError::decode("ltvData", "EOF").is_empty_signal());
    }
}
