//! Shared CLI output formatting with colors, symbols, and structured display.

use crate::pipeline::ChartOutcome;
use std::io::IsTerminal;

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("DASHCHARTS_NO_COLOR").is_ok() {
        return false;
    }
    // Summaries go to stderr
    std::io::stderr().is_terminal()
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Plain output regardless of the terminal.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    /// Blue circle, used for skipped charts.
    pub fn info_sym(&self) -> &str {
        if self.use_color {
            "\x1b[34m\u{25cb}\x1b[0m"
        } else {
            "--"
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// Print a branded header for CLI output.
pub fn print_header(s: &Styled) {
    eprintln!(
        "  {} {}",
        s.bold("dashcharts"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();
}

/// Print a section header.
pub fn print_section(s: &Styled, title: &str) {
    eprintln!("  {}", s.bold(title));
}

/// Print a check result line with symbol and label/value.
pub fn print_check(symbol: &str, label: &str, value: &str) {
    eprintln!("    {symbol} {label:<24} {value}");
}

/// One summary line for a chart outcome.
pub fn outcome_line(s: &Styled, outcome: &ChartOutcome) -> (String, String, String) {
    let target = outcome.target();
    let label = target.mount.clone();
    match outcome {
        ChartOutcome::Rendered { spec, .. } => (
            s.ok_sym().to_string(),
            label,
            format!(
                "{} {}",
                target.kind,
                s.dim(&format!("({} points)", spec.labels.len()))
            ),
        ),
        ChartOutcome::Skipped { .. } => (
            s.info_sym().to_string(),
            label,
            s.yellow(&format!("{} skipped: no data", target.kind)),
        ),
        ChartOutcome::Failed { error, .. } => (
            s.fail_sym().to_string(),
            label,
            s.red(&format!("{}: {error}", target.kind)),
        ),
    }
}

/// Print the per-chart summary followed by a totals line.
pub fn print_outcomes(s: &Styled, outcomes: &[ChartOutcome]) {
    for outcome in outcomes {
        let (symbol, label, value) = outcome_line(s, outcome);
        print_check(&symbol, &label, &value);
    }
    let (rendered, skipped, failed) = tally(outcomes);
    print_status(
        s,
        if failed == 0 { "ok" } else { "degraded" },
        &format!("{rendered} rendered, {skipped} skipped, {failed} failed"),
    );
}

/// Count rendered, skipped and failed outcomes.
pub fn tally(outcomes: &[ChartOutcome]) -> (usize, usize, usize) {
    outcomes.iter().fold((0, 0, 0), |(r, s, f), o| match o {
        ChartOutcome::Rendered { .. } => (r + 1, s, f),
        ChartOutcome::Skipped { .. } => (r, s + 1, f),
        ChartOutcome::Failed { .. } => (r, s, f + 1),
    })
}

/// Print a status summary line at the bottom.
pub fn print_status(s: &Styled, status: &str, msg: &str) {
    eprintln!();
    eprintln!("  {}: {status} ({msg})", s.bold("Status"));
}

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var("DASHCHARTS_QUIET").is_ok()
}

/// Check if --json mode is active.
pub fn is_json() -> bool {
    std::env::var("DASHCHARTS_JSON").is_ok()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, ChartSpec};
    use crate::error::ChartError;
    use crate::extraction::CarrierKey;
    use crate::pipeline::ChartTarget;

    fn failed() -> ChartOutcome {
        let target = ChartTarget::embedded(
            ChartKind::LifetimeValue,
            CarrierKey::element("ltvData"),
            "lifetimeValueChart",
        );
        ChartOutcome::failed(target, ChartError::carrier_not_found("#ltvData"))
    }

    #[test]
    fn test_plain_styling() {
        let s = Styled::plain();
        assert_eq!(s.ok_sym(), "OK");
        assert_eq!(s.red("x"), "x");

        let (symbol, label, value) = outcome_line(&s, &failed());
        assert_eq!(symbol, "!!");
        assert_eq!(label, "lifetimeValueChart");
        assert_eq!(value, "lifetime_value: carrier '#ltvData' not found on page");
    }

    #[test]
    fn test_tally() {
        let skipped = ChartOutcome::Skipped {
            target: failed().target().clone(),
            spec: ChartSpec::for_kind(ChartKind::LifetimeValue),
            reason: ChartError::EmptyDataset {
                chart: "lifetime_value".into(),
            },
        };
        assert_eq!(tally(&[failed(), skipped, failed()]), (0, 1, 2));
    }
}
