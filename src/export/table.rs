//! Aligned console table rendering for the milestone report.

use crate::report::MilestoneReport;
use crate::types::MilestoneHit;

/// Print the full report to stdout, batters first.
/// An empty report prints a single line saying so; that is a valid outcome.
pub fn render(report: &MilestoneReport) {
    if report.is_empty() {
        println!("\nNo players within one of a multiple of 13 this run.");
        return;
    }

    render_partition("BATTERS", &report.batters);
    render_partition("PITCHERS", &report.pitchers);
}

fn render_partition(title: &str, rows: &[MilestoneHit]) {
    if rows.is_empty() {
        return;
    }

    // Sort for display only: by name, then scope, then stat
    let mut sorted: Vec<&MilestoneHit> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        a.player_name
            .cmp(&b.player_name)
            .then(a.scope.to_string().cmp(&b.scope.to_string()))
            .then(a.stat.cmp(b.stat))
    });

    let name_width = sorted
        .iter()
        .map(|r| r.player_name.len())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    println!("\n=== {} ({} rows) ===", title, rows.len());
    println!(
        "{:<name_width$}  {:<6}  {:<12}  {:>7}  {:>6}",
        "Player", "Scope", "Stat", "Value", "Next"
    );
    for row in sorted {
        println!(
            "{:<name_width$}  {:<6}  {:<12}  {:>7}  {:>6}",
            row.player_name, row.scope, row.stat, row.value, row.next_milestone
        );
    }
}
