//! dashcharts command-line entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashcharts::chart::ChartKind;
use dashcharts::cli::fetch_cmd::{self, FetchArgs};
use dashcharts::cli::kinds_cmd;
use dashcharts::cli::render_cmd::{self, OutputFormat, RenderArgs};
use dashcharts::config::Config;
use dashcharts::dashboard::{DashboardPage, SALES_DATA_PATH};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dashcharts", version, about = "Build dashboard charts from embedded page data")]
struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Suppress the summary
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Disable colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Dashboard server for remote charts [env: DASHCHARTS_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the charts of a saved HTML page
    Render {
        /// Path to the page HTML
        html: PathBuf,

        /// Built-in dashboard page whose charts to build
        #[arg(long, short)]
        page: Option<DashboardPage>,

        /// JSON file listing chart targets, instead of --page
        #[arg(long, short)]
        manifest: Option<PathBuf>,

        /// URL the page was served from; its query reaches remote charts
        #[arg(long)]
        page_url: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Chartjs)]
        format: OutputFormat,

        /// Append outcomes to the render report
        #[arg(long)]
        report: bool,

        /// Report location (default ~/.dashcharts/renders.jsonl)
        #[arg(long)]
        report_path: Option<PathBuf>,
    },
    /// Build one chart from a dashboard endpoint
    Fetch {
        #[arg(default_value = SALES_DATA_PATH)]
        endpoint: String,

        #[arg(long, short, default_value_t = ChartKind::SalesOverview)]
        kind: ChartKind,

        #[arg(long, default_value = "salesChart")]
        mount: String,

        /// Page URL whose query string is forwarded
        #[arg(long)]
        page_url: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Chartjs)]
        format: OutputFormat,
    },
    /// List chart kinds and dashboard pages
    Kinds,
}

fn init_tracing(log_json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("dashcharts=info".parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log_json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Output helpers read these.
    if cli.json {
        std::env::set_var("DASHCHARTS_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("DASHCHARTS_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("DASHCHARTS_NO_COLOR", "1");
    }

    init_tracing(cli.log_json)?;

    let config = Config::from_env();
    match cli.command {
        Command::Render {
            html,
            page,
            manifest,
            page_url,
            format,
            report,
            report_path,
        } => {
            let config = config.with_overrides(cli.base_url, report_path);
            let args = RenderArgs {
                html,
                page,
                manifest,
                page_url,
                format,
                report,
            };
            render_cmd::run(args, &config).await
        }
        Command::Fetch {
            endpoint,
            kind,
            mount,
            page_url,
            format,
        } => {
            let config = config.with_overrides(cli.base_url, None);
            let args = FetchArgs {
                endpoint,
                kind,
                mount,
                page_url,
                format,
            };
            fetch_cmd::run(args, &config).await
        }
        Command::Kinds => kinds_cmd::run(),
    }
}
