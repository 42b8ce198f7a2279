//! Carrier keys and the datasets they hold.

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a piece of embedded chart data lives on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum CarrierKey {
    /// Element whose text content is a JSON blob (usually a
    /// `<script type="application/json">` block).
    ElementText { id: String },
    /// Attribute of an element holding a JSON-encoded string.
    Attribute { id: String, attribute: String },
}

impl CarrierKey {
    pub fn element(id: &str) -> Self {
        Self::ElementText { id: id.to_string() }
    }

    pub fn attribute(id: &str, attribute: &str) -> Self {
        Self::Attribute {
            id: id.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// Key for a `dataset` entry, named the way page scripts see it
    /// (`dailyOrders` is stored in `data-daily-orders`).
    pub fn dataset(id: &str, name: &str) -> Self {
        Self::attribute(id, &dataset_attribute(name))
    }

    /// Id of the element this key points into.
    pub fn element_id(&self) -> &str {
        match self {
            Self::ElementText { id } | Self::Attribute { id, .. } => id,
        }
    }
}

impl fmt::Display for CarrierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementText { id } => write!(f, "#{id}"),
            Self::Attribute { id, attribute } => write!(f, "#{id}[{attribute}]"),
        }
    }
}

/// Convert a camelCase `dataset` name to its `data-*` attribute name.
pub fn dataset_attribute(name: &str) -> String {
    let mut attr = String::with_capacity(name.len() + 8);
    attr.push_str("data-");
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            attr.push('-');
            attr.push(ch.to_ascii_lowercase());
        } else {
            attr.push(ch);
        }
    }
    attr
}

/// One or more carriers that together make up a chart's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CarrierSource {
    Single(CarrierKey),
    /// Each member is decoded on its own and stored under its field name
    /// in a single JSON object.
    Bundle(Vec<(String, CarrierKey)>),
}

impl CarrierSource {
    pub fn bundle(members: &[(&str, CarrierKey)]) -> Self {
        Self::Bundle(
            members
                .iter()
                .map(|(field, key)| (field.to_string(), key.clone()))
                .collect(),
        )
    }
}

impl From<CarrierKey> for CarrierSource {
    fn from(key: CarrierKey) -> Self {
        Self::Single(key)
    }
}

impl fmt::Display for CarrierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(key) => write!(f, "{key}"),
            Self::Bundle(members) => {
                let keys: Vec<String> = members.iter().map(|(_, k)| k.to_string()).collect();
                write!(f, "{}", keys.join(","))
            }
        }
    }
}

/// A located carrier: its raw payload and, once decoded, the parsed value.
#[derive(Debug, Clone)]
pub struct EmbeddedDataset {
    pub key: CarrierKey,
    pub raw_payload: String,
    parsed: Option<serde_json::Value>,
}

impl EmbeddedDataset {
    pub fn new(key: CarrierKey, raw_payload: String) -> Self {
        Self {
            key,
            raw_payload,
            parsed: None,
        }
    }

    /// Decode the payload as JSON. Decoding happens at most once.
    pub fn decode(&mut self) -> ChartResult<&serde_json::Value> {
        let value = match self.parsed.take() {
            Some(value) => value,
            None => serde_json::from_str(self.raw_payload.trim())
                .map_err(|e| ChartError::decode(&self.key, e))?,
        };
        Ok(self.parsed.insert(value))
    }

    pub fn parsed(&self) -> Option<&serde_json::Value> {
        self.parsed.as_ref()
    }

    /// Consume the dataset, returning the decoded value.
    pub fn into_value(mut self) -> ChartResult<serde_json::Value> {
        self.decode()?;
        Ok(self.parsed.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_attribute_names() {
        assert_eq!(dataset_attribute("dailyOrders"), "data-daily-orders");
        assert_eq!(dataset_attribute("isSingleAgent"), "data-is-single-agent");
        assert_eq!(dataset_attribute("revenue"), "data-revenue");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CarrierKey::element("ltvData").to_string(), "#ltvData");
        assert_eq!(
            CarrierKey::dataset("chart-data", "monthlyRevenue").to_string(),
            "#chart-data[data-monthly-revenue]"
        );
    }

    #[test]
    fn test_decode_once() {
        let mut ds = EmbeddedDataset::new(CarrierKey::element("x"), " [1, 2] ".to_string());
        assert!(ds.parsed().is_none());
        assert_eq!(ds.decode().unwrap(), &serde_json::json!([1, 2]));
        assert!(ds.parsed().is_some());
    }

    #[test]
    fn test_decode_malformed() {
        let mut ds = EmbeddedDataset::new(CarrierKey::element("x"), "{not json".to_string());
        let err = ds.decode().unwrap_err();
        assert!(matches!(err, ChartError::Decode { ref key, .. } if key == "#x"));
        assert!(ds.parsed().is_none());
    }

    #[test]
    fn test_source_serde() {
        let json = r#"{"from":"attribute","id":"chart-data","attribute":"data-daily-orders"}"#;
        let source: CarrierSource = serde_json::from_str(json).unwrap();
        assert_eq!(
            source,
            CarrierSource::Single(CarrierKey::dataset("chart-data", "dailyOrders"))
        );
    }
}
