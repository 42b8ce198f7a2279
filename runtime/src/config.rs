//! Runtime configuration: environment variables and target manifests.

use crate::dashboard::DashboardPage;
use crate::pipeline::ChartTarget;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Dashboard server used for remote targets.
pub const BASE_URL_ENV: &str = "DASHCHARTS_BASE_URL";
/// Render report location override.
pub const REPORT_ENV: &str = "DASHCHARTS_REPORT";

/// Settings resolved from flags, falling back to the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    pub report_path: Option<PathBuf>,
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty()),
            report_path: std::env::var(REPORT_ENV).ok().map(PathBuf::from),
        }
    }

    /// Flags win over the environment.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        report_path: Option<PathBuf>,
    ) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        if report_path.is_some() {
            self.report_path = report_path;
        }
        self
    }
}

/// Load a JSON manifest: a list of chart targets.
pub fn load_manifest(path: &Path) -> Result<Vec<ChartTarget>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let targets: Vec<ChartTarget> = serde_json::from_str(&text)
        .with_context(|| format!("invalid manifest: {}", path.display()))?;
    if targets.is_empty() {
        bail!("manifest {} lists no targets", path.display());
    }
    Ok(targets)
}

/// Targets for a run: a manifest if given, otherwise the built-in page.
pub fn resolve_targets(
    page: Option<DashboardPage>,
    manifest: Option<&Path>,
) -> Result<Vec<ChartTarget>> {
    match (manifest, page) {
        (Some(path), _) => load_manifest(path),
        (None, Some(page)) => Ok(page.targets()),
        (None, None) => bail!("pass --page or --manifest to choose the charts to build"),
    }
}
