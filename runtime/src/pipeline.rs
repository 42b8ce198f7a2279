//! Per-page chart pipeline.
//!
//! Every target runs extract then adapt, and every error stops at the
//! boundary of its own chart: it is logged with the carrier, chart kind
//! and mount point, and the remaining charts are built regardless.

use crate::acquisition::SalesDataClient;
use crate::chart::{ChartAdapter, ChartKind, ChartSpec};
use crate::error::ChartError;
use crate::extraction::{CarrierKey, CarrierSource, Page, ViewMode};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};
use url::Url;

/// Where a target's data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    /// Carriers embedded in the page.
    Embedded(CarrierSource),
    /// Endpoint path on the dashboard server.
    Remote { path: String },
}

impl fmt::Display for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded(source) => write!(f, "{source}"),
            Self::Remote { path } => write!(f, "GET {path}"),
        }
    }
}

/// One chart instance on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTarget {
    pub kind: ChartKind,
    pub source: TargetSource,
    /// Id of the canvas the chart paints into.
    pub mount: String,
    /// Carrier of the single/aggregate flag, for charts that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_flag: Option<CarrierKey>,
}

impl ChartTarget {
    pub fn embedded(kind: ChartKind, source: impl Into<CarrierSource>, mount: &str) -> Self {
        Self {
            kind,
            source: TargetSource::Embedded(source.into()),
            mount: mount.to_string(),
            mode_flag: None,
        }
    }

    pub fn remote(kind: ChartKind, path: &str, mount: &str) -> Self {
        Self {
            kind,
            source: TargetSource::Remote {
                path: path.to_string(),
            },
            mount: mount.to_string(),
            mode_flag: None,
        }
    }

    pub fn with_mode_flag(mut self, flag: CarrierKey) -> Self {
        self.mode_flag = Some(flag);
        self
    }
}

/// Result of one target. Every outcome carries a spec; only a rendered
/// one has anything to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
    Rendered {
        target: ChartTarget,
        spec: ChartSpec,
    },
    /// Valid but empty input; nothing is painted.
    Skipped {
        target: ChartTarget,
        spec: ChartSpec,
        reason: ChartError,
    },
    /// Extraction or adaptation failed. `spec` is the empty spec of the
    /// target's kind.
    Failed {
        target: ChartTarget,
        spec: ChartSpec,
        error: ChartError,
    },
}

impl ChartOutcome {
    pub fn failed(target: ChartTarget, error: ChartError) -> Self {
        Self::Failed {
            spec: ChartSpec::for_kind(target.kind),
            target,
            error,
        }
    }

    pub fn target(&self) -> &ChartTarget {
        match self {
            Self::Rendered { target, .. }
            | Self::Skipped { target, .. }
            | Self::Failed { target, .. } => target,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        match self {
            Self::Rendered { spec, .. }
            | Self::Skipped { spec, .. }
            | Self::Failed { spec, .. } => spec,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Rendered { .. } => "rendered",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }

    /// Classify an adapt/extract result for `target`, logging non-renders.
    fn from_result(target: ChartTarget, result: Result<ChartSpec, ChartError>) -> Self {
        match result {
            Ok(spec) if spec.is_empty() => {
                info!(chart = %target.kind, mount = %target.mount, "no data to plot, skipping");
                Self::Skipped {
                    reason: ChartError::EmptyDataset {
                        chart: target.kind.to_string(),
                    },
                    target,
                    spec,
                }
            }
            Ok(spec) => {
                info!(
                    chart = %target.kind,
                    mount = %target.mount,
                    "rendered {} labels",
                    spec.labels.len()
                );
                Self::Rendered { target, spec }
            }
            Err(error) => {
                warn!(
                    carrier = %target.source,
                    chart = %target.kind,
                    mount = %target.mount,
                    "chart suppressed: {error}"
                );
                Self::failed(target, error)
            }
        }
    }
}

/// Runs the targets of one page.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    client: Option<SalesDataClient>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `client` for remote targets. Without one, remote targets fail
    /// with a fetch error.
    pub fn with_client(mut self, client: SalesDataClient) -> Self {
        self.client = Some(client);
        self
    }

    fn adapter_for(page: &Page, target: &ChartTarget) -> ChartAdapter {
        let mode = target
            .mode_flag
            .as_ref()
            .map(|flag| page.extractor().mode(flag))
            .unwrap_or(ViewMode::Aggregate);
        ChartAdapter::new(mode)
    }

    fn run_one_embedded(
        page: &Page,
        target: &ChartTarget,
        source: &CarrierSource,
    ) -> ChartOutcome {
        let adapter = Self::adapter_for(page, target);
        let result = page
            .extractor()
            .extract(source)
            .and_then(|parsed| adapter.adapt(&parsed, target.kind));
        ChartOutcome::from_result(target.clone(), result)
    }

    /// Run the embedded targets of `targets` against `page`.
    ///
    /// Remote targets are skipped; the outcomes keep the order of the
    /// embedded targets.
    pub fn run_embedded(&self, page: &Page, targets: &[ChartTarget]) -> Vec<ChartOutcome> {
        targets
            .iter()
            .filter_map(|target| match &target.source {
                TargetSource::Embedded(source) => {
                    Some(Self::run_one_embedded(page, target, source))
                }
                TargetSource::Remote { .. } => None,
            })
            .collect()
    }

    async fn run_remote(
        &self,
        target: &ChartTarget,
        path: &str,
        page_url: Option<&Url>,
    ) -> ChartOutcome {
        let result = match &self.client {
            Some(client) => client.fetch(path, page_url).await.and_then(|parsed| {
                // Remote payloads carry no page flag.
                ChartAdapter::new(ViewMode::Aggregate).adapt(&parsed, target.kind)
            }),
            None => Err(ChartError::fetch(path, "no server configured")),
        };
        ChartOutcome::from_result(target.clone(), result)
    }

    /// Run every target of a page, one outcome per target in target order.
    ///
    /// Embedded targets are built first; remote targets are then awaited
    /// together, so a slow endpoint only delays its own chart.
    pub async fn run(
        &self,
        html: &str,
        page_url: Option<&Url>,
        targets: &[ChartTarget],
    ) -> Vec<ChartOutcome> {
        let mut slots: Vec<Option<ChartOutcome>> = vec![None; targets.len()];

        {
            let page = Page::parse(html);
            for (slot, target) in slots.iter_mut().zip(targets) {
                if let TargetSource::Embedded(source) = &target.source {
                    *slot = Some(Self::run_one_embedded(&page, target, source));
                }
            }
        }

        let remote = targets
            .iter()
            .enumerate()
            .filter_map(|(i, target)| match &target.source {
                TargetSource::Remote { path } => {
                    Some(async move { (i, self.run_remote(target, path, page_url).await) })
                }
                TargetSource::Embedded(_) => None,
            });
        for (i, outcome) in join_all(remote).await {
            slots[i] = Some(outcome);
        }

        slots.into_iter().flatten().collect()
    }
}
