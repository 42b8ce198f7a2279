//! Build the charts of a saved dashboard page.

use crate::acquisition::SalesDataClient;
use crate::audit::RenderReport;
use crate::cli::output::{self, Styled};
use crate::config::{self, Config};
use crate::dashboard::DashboardPage;
use crate::pipeline::{ChartOutcome, Pipeline};
use crate::render::ChartJsConfig;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use tracing::info;
use url::Url;

/// What each rendered chart is printed as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Chart.js configuration objects.
    #[default]
    Chartjs,
    /// Renderer-agnostic chart specs.
    Spec,
}

/// Arguments of `dashcharts render`.
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub html: PathBuf,
    pub page: Option<DashboardPage>,
    pub manifest: Option<PathBuf>,
    pub page_url: Option<String>,
    pub format: OutputFormat,
    pub report: bool,
}

/// Map outcomes to `{mount: config}`. Skipped and failed charts map to
/// the config of their empty spec, with no datasets.
pub fn charts_json(outcomes: &[ChartOutcome], format: OutputFormat) -> Result<Value> {
    let mut charts = Map::new();
    for outcome in outcomes {
        let spec = outcome.spec();
        let value = match format {
            OutputFormat::Chartjs => ChartJsConfig::from_spec(spec).to_json(),
            OutputFormat::Spec => serde_json::to_value(spec)?,
        };
        charts.insert(outcome.target().mount.clone(), value);
    }
    Ok(Value::Object(charts))
}

/// Print results in the active output mode.
pub fn emit(outcomes: &[ChartOutcome], format: OutputFormat) -> Result<()> {
    if output::is_json() {
        output::print_json(&json!({
            "outcomes": serde_json::to_value(outcomes)?,
        }));
        return Ok(());
    }

    output::print_json(&charts_json(outcomes, format)?);
    if !output::is_quiet() {
        let s = Styled::new();
        output::print_header(&s);
        output::print_outcomes(&s, outcomes);
    }
    Ok(())
}

pub async fn run(args: RenderArgs, config: &Config) -> Result<()> {
    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("failed to read page: {}", args.html.display()))?;
    let targets = config::resolve_targets(args.page, args.manifest.as_deref())?;
    let page_url = args
        .page_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("invalid --page-url")?;

    let mut pipeline = Pipeline::new();
    if let Some(base) = &config.base_url {
        pipeline = pipeline.with_client(SalesDataClient::new(base)?);
    }

    info!("building {} charts from {}", targets.len(), args.html.display());
    let outcomes = pipeline.run(&html, page_url.as_ref(), &targets).await;

    if args.report {
        let path = config
            .report_path
            .clone()
            .unwrap_or_else(RenderReport::default_path);
        let page_name = args
            .page
            .map(|p| p.to_string())
            .unwrap_or_else(|| args.html.display().to_string());
        RenderReport::open(&path)?.log_outcomes(&page_name, &outcomes)?;
    }

    emit(&outcomes, args.format)
}
