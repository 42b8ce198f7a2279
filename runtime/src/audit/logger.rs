//! JSONL render report: one line per chart outcome, append-only.

use crate::pipeline::ChartOutcome;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single report line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEvent {
    pub timestamp: String,
    pub page: String,
    pub chart: String,
    pub mount: String,
    pub carrier: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub points: usize,
}

impl RenderEvent {
    pub fn from_outcome(page: &str, outcome: &ChartOutcome) -> Self {
        let target = outcome.target();
        let (error_code, message) = match outcome {
            ChartOutcome::Rendered { .. } => (None, None),
            ChartOutcome::Skipped { reason: e, .. } | ChartOutcome::Failed { error: e, .. } => {
                (Some(e.code().to_string()), Some(e.to_string()))
            }
        };
        Self {
            timestamp: Utc::now().to_rfc3339(),
            page: page.to_string(),
            chart: target.kind.to_string(),
            mount: target.mount.clone(),
            carrier: target.source.to_string(),
            status: outcome.status().to_string(),
            error_code,
            message,
            points: outcome.spec().labels.len(),
        }
    }
}

/// Append-only JSONL report writer.
pub struct RenderReport {
    file: File,
}

impl RenderReport {
    /// Open or create the report file.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open render report: {}", path.display()))?;

        Ok(Self { file })
    }

    /// ~/.dashcharts/renders.jsonl
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".dashcharts")
            .join("renders.jsonl")
    }

    pub fn log(&mut self, event: &RenderEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.file, "{json}")?;
        Ok(())
    }

    /// Log every outcome of one page run.
    pub fn log_outcomes(&mut self, page: &str, outcomes: &[ChartOutcome]) -> Result<()> {
        for outcome in outcomes {
            self.log(&RenderEvent::from_outcome(page, outcome))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::extraction::{CarrierKey, Page};
    use crate::pipeline::{ChartTarget, Pipeline};

    fn outcomes() -> Vec<ChartOutcome> {
        let page = Page::parse(
            r#"<script id="ltvData">{"labels":["2024-01"],"ltv_values":[120.5]}</script>
               <script id="averageOrderValueData">{"labels":</script>"#,
        );
        let targets = [
            ChartTarget::embedded(
                ChartKind::LifetimeValue,
                CarrierKey::element("ltvData"),
                "lifetimeValueChart",
            ),
            ChartTarget::embedded(
                ChartKind::AverageOrderValue,
                CarrierKey::element("averageOrderValueData"),
                "averageOrderValueChart",
            ),
        ];
        Pipeline::new().run_embedded(&page, &targets)
    }

    #[test]
    fn test_report_appends_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("renders.jsonl");

        let mut report = RenderReport::open(&path).unwrap();
        report.log_outcomes("client-overview", &outcomes()).unwrap();
        drop(report);

        // Reopening appends instead of truncating.
        let mut report = RenderReport::open(&path).unwrap();
        report.log_outcomes("client-overview", &outcomes()[..1]).unwrap();
        drop(report);

        let text = std::fs::read_to_string(&path).unwrap();
        let events: Vec<RenderEvent> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].status, "rendered");
        assert_eq!(events[0].points, 1);
        assert_eq!(events[0].carrier, "#ltvData");
        assert!(events[0].error_code.is_none());

        assert_eq!(events[1].status, "failed");
        assert_eq!(events[1].error_code.as_deref(), Some("decode_error"));
        assert_eq!(events[1].mount, "averageOrderValueChart");
        assert!(chrono::DateTime::parse_from_rfc3339(&events[1].timestamp).is_ok());
    }

    #[test]
    fn test_default_path() {
        let path = RenderReport::default_path();
        assert!(path.ends_with(".dashcharts/renders.jsonl"));
    }
}
