//! MLB "Rule of 13" Milestone Scout
//!
//! A one-shot scout for the public MLB Stats API. It resolves a set of
//! rosters (whole league, one team, or the teams playing on a date),
//! fetches each player's season and career hitting stats, and flags every
//! counting stat that sits exactly one short of a multiple of 13.
//!
//! ## Pipeline
//!
//! - **Player resolution** from teams / roster / schedule endpoints
//! - **Bounded-concurrency stat fetches**, one player at a time per permit
//! - **Pure milestone evaluation** over a declared stat table (plus the
//!   derived `singles` stat)
//! - **Batter/pitcher partitioned report** rendered as a console table and
//!   optionally appended to a CSV file

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use milestone_scout::config::{csv_path, MILESTONE_MODULUS, STATS_CONCURRENCY};
use milestone_scout::export::{create_export_channel, table};
use milestone_scout::scan::{resolve_players, run_scan, ScanSelection};
use milestone_scout::statsapi::StatsClient;
use milestone_scout::types::TRACKED_STATS;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with both stdout and file output
    let file_appender = tracing_appender::rolling::never(".", "scout.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("milestone_scout=info".parse()?);

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    dotenvy::dotenv().ok();

    let selection = ScanSelection::from_env()?;

    info!("⚾ MLB Milestone Scout");
    info!("   Rule: flag stats where value % {} == {}", MILESTONE_MODULUS, MILESTONE_MODULUS - 1);
    info!("   Tracked stats: {:?} + derived singles", TRACKED_STATS);
    info!("   Selection: {}", selection);
    info!("   Concurrency: {} stat fetches in flight", STATS_CONCURRENCY);

    let client = StatsClient::new();

    let players = resolve_players(&client, &selection).await?;
    if players.is_empty() {
        warn!("No players resolved for {} - nothing to scan", selection);
        return Ok(());
    }
    info!("📋 Resolved {} unique players", players.len());

    // Optional CSV export through a dedicated writer thread
    let export = csv_path().map(create_export_channel);
    let export_channel = export.as_ref().map(|(channel, _)| channel);

    let report = run_scan(&client, players, export_channel).await;

    info!("📊 Scan complete:");
    info!("   - Players evaluated: {}", report.players_scanned);
    info!("   - Players skipped (stats unavailable): {}", report.players_skipped);
    info!(
        "   - Near-milestone rows: {} ({} batters, {} pitchers)",
        report.total_hits(),
        report.batters.len(),
        report.pitchers.len()
    );

    table::render(&report);

    // Flush the CSV writer before exiting
    if let Some((channel, handle)) = export {
        channel.shutdown();
        if handle.join().is_err() {
            warn!("CSV writer thread panicked");
        }
    }

    Ok(())
}
