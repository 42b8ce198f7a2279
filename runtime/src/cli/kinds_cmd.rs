//! List chart kinds and built-in dashboard pages.

use crate::chart::ChartKind;
use crate::cli::output::{self, Styled};
use crate::dashboard::DashboardPage;
use anyhow::Result;
use serde_json::json;

fn page_entry(page: DashboardPage) -> serde_json::Value {
    let charts: Vec<_> = page
        .targets()
        .iter()
        .map(|t| json!({"kind": t.kind, "mount": t.mount, "source": t.source.to_string()}))
        .collect();
    json!({"page": page.name(), "charts": charts})
}

pub fn run() -> Result<()> {
    if output::is_json() {
        let kinds: Vec<_> = ChartKind::ALL
            .iter()
            .map(|k| {
                json!({
                    "kind": k,
                    "dual_axis": k.is_dual_axis(),
                    "view_mode": k.uses_view_mode(),
                })
            })
            .collect();
        let pages: Vec<_> = DashboardPage::ALL.into_iter().map(page_entry).collect();
        output::print_json(&json!({"kinds": kinds, "pages": pages}));
        return Ok(());
    }

    let s = Styled::new();
    output::print_section(&s, "Chart kinds");
    for kind in ChartKind::ALL {
        let mut notes = Vec::new();
        if kind.is_dual_axis() {
            notes.push("dual axis");
        }
        if kind.uses_view_mode() {
            notes.push("single/aggregate");
        }
        eprintln!("    {:<24} {}", kind.name(), s.dim(&notes.join(", ")));
    }
    eprintln!();

    output::print_section(&s, "Dashboard pages");
    for page in DashboardPage::ALL {
        eprintln!("    {}", s.bold(page.name()));
        for target in page.targets() {
            eprintln!(
                "      {:<24} {:<22} {}",
                target.mount,
                target.kind.name(),
                s.dim(&target.source.to_string())
            );
        }
    }
    Ok(())
}
