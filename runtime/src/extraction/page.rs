//! Rendered page parsing and carrier lookup.
//!
//! A `Page` wraps the parsed HTML document. `scraper::Html` is not `Send`,
//! so callers that also await network work must drop the page before their
//! first suspend point.

use super::carrier::{CarrierKey, CarrierSource, EmbeddedDataset};
use crate::error::{ChartError, ChartResult};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Whether a page shows one entity or an average across entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Single,
    #[default]
    Aggregate,
}

impl ViewMode {
    /// Interpret a page flag. Only the literal text `true` selects the
    /// single-entity view.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => Self::Single,
            _ => Self::Aggregate,
        }
    }
}

/// A parsed dashboard page.
pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
        let selector = Selector::parse(&format!(r#"[id="{escaped}"]"#)).ok()?;
        self.document.select(&selector).next()
    }

    /// Find the raw payload for a carrier key.
    pub fn locate(&self, key: &CarrierKey) -> ChartResult<EmbeddedDataset> {
        let element = self
            .element_by_id(key.element_id())
            .ok_or_else(|| ChartError::carrier_not_found(key))?;

        let raw = match key {
            CarrierKey::ElementText { .. } => element.text().collect::<String>(),
            CarrierKey::Attribute { attribute, .. } => element
                .value()
                .attr(attribute)
                .ok_or_else(|| ChartError::carrier_not_found(key))?
                .to_string(),
        };

        debug!("located carrier {key} ({} bytes)", raw.len());
        Ok(EmbeddedDataset::new(key.clone(), raw))
    }

    /// Raw text of an attribute, if the element and attribute both exist.
    pub fn attribute(&self, key: &CarrierKey) -> Option<String> {
        match key {
            CarrierKey::Attribute { id, attribute } => self
                .element_by_id(id)?
                .value()
                .attr(attribute)
                .map(String::from),
            CarrierKey::ElementText { id } => {
                Some(self.element_by_id(id)?.text().collect::<String>())
            }
        }
    }

    pub fn extractor(&self) -> DataExtractor<'_> {
        DataExtractor { page: self }
    }
}

/// Locates and decodes embedded carriers on one page.
pub struct DataExtractor<'a> {
    page: &'a Page,
}

impl<'a> DataExtractor<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    /// Decode the structured value behind a carrier source.
    ///
    /// No shape validation happens here; an empty list is a success.
    pub fn extract(&self, source: &CarrierSource) -> ChartResult<serde_json::Value> {
        let result = match source {
            CarrierSource::Single(key) => self.extract_key(key),
            CarrierSource::Bundle(members) => {
                let mut object = serde_json::Map::with_capacity(members.len());
                for (field, key) in members {
                    object.insert(field.clone(), self.extract_key(key)?);
                }
                Ok(serde_json::Value::Object(object))
            }
        };

        if let Err(e) = &result {
            warn!(carrier = %source, "extraction failed: {e}");
        }
        result
    }

    fn extract_key(&self, key: &CarrierKey) -> ChartResult<serde_json::Value> {
        self.page.locate(key)?.into_value()
    }

    /// Read the single/aggregate flag. A missing flag reads as aggregate.
    pub fn mode(&self, flag: &CarrierKey) -> ViewMode {
        ViewMode::from_flag(self.page.attribute(flag).as_deref())
    }
}
