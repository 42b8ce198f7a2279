//! CLI subcommand implementations for the dashcharts binary.

pub mod fetch_cmd;
pub mod kinds_cmd;
pub mod output;
pub mod render_cmd;
