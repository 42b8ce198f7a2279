//! Build a chart from a dashboard endpoint.

use crate::acquisition::SalesDataClient;
use crate::chart::ChartKind;
use crate::cli::render_cmd::{self, OutputFormat};
use crate::config::Config;
use crate::pipeline::{ChartTarget, Pipeline};
use anyhow::{Context, Result};
use url::Url;

/// Arguments of `dashcharts fetch`.
#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub endpoint: String,
    pub kind: ChartKind,
    pub mount: String,
    pub page_url: Option<String>,
    pub format: OutputFormat,
}

pub async fn run(args: FetchArgs, config: &Config) -> Result<()> {
    let base = config
        .base_url
        .as_deref()
        .context("no server configured: pass --base-url or set DASHCHARTS_BASE_URL")?;
    let client = SalesDataClient::new(base)?;
    let page_url = args
        .page_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("invalid --page-url")?;

    let target = ChartTarget::remote(args.kind, &args.endpoint, &args.mount);
    let outcomes = Pipeline::new()
        .with_client(client)
        .run("", page_url.as_ref(), &[target])
        .await;

    render_cmd::emit(&outcomes, args.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::SALES_DATA_PATH;

    #[test]
    fn test_requires_base_url() {
        let args = FetchArgs {
            endpoint: SALES_DATA_PATH.to_string(),
            kind: ChartKind::SalesOverview,
            mount: "salesChart".to_string(),
            page_url: None,
            format: OutputFormat::Chartjs,
        };
        let err = tokio_test::block_on(run(args, &Config::default())).unwrap_err();
        assert!(err.to_string().contains("no server configured"));
    }
}
