//! Player resolution and the concurrent scan.
//!
//! Resolves the selected rosters to a deduplicated player list, then fans
//! the per-player stat fetches out with bounded concurrency. Aggregation
//! itself stays sequential and synchronous; only the HTTP round trips run
//! in parallel.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use futures_util::{stream, StreamExt};
use rustc_hash::FxHashSet;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::{ROSTER_CONCURRENCY, STATS_CONCURRENCY};
use crate::export::ExportChannel;
use crate::report::{evaluate_player, MilestoneReport};
use crate::statsapi::{Fetched, StatsClient};
use crate::types::PlayerRef;

/// Which rosters to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSelection {
    /// Every MLB team
    League,
    /// A single team by id
    Team(u64),
    /// Teams with a scheduled game on this date (YYYY-MM-DD)
    Date(String),
}

impl ScanSelection {
    /// Parse the selection from SCAN_MODE / SCAN_TEAM / SCAN_DATE.
    /// Default is a whole-league scan; SCAN_MODE=date with no SCAN_DATE
    /// uses today's date.
    pub fn from_env() -> Result<Self> {
        let mode = std::env::var("SCAN_MODE").unwrap_or_else(|_| "league".to_string());
        match mode.to_lowercase().as_str() {
            "league" => Ok(ScanSelection::League),
            "team" => {
                let id = std::env::var("SCAN_TEAM")
                    .context("SCAN_MODE=team requires SCAN_TEAM")?
                    .parse::<u64>()
                    .context("SCAN_TEAM must be a numeric team id")?;
                Ok(ScanSelection::Team(id))
            }
            "date" => {
                let date = std::env::var("SCAN_DATE")
                    .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());
                Ok(ScanSelection::Date(date))
            }
            other => bail!("unknown SCAN_MODE '{}' (expected league, team or date)", other),
        }
    }
}

impl std::fmt::Display for ScanSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanSelection::League => write!(f, "league"),
            ScanSelection::Team(id) => write!(f, "team {}", id),
            ScanSelection::Date(d) => write!(f, "games on {}", d),
        }
    }
}

/// Resolve a selection to a flat, deduplicated player list.
///
/// A failed roster fetch skips that team with a warning; the rest of the
/// selection still resolves. Players appearing on more than one resolved
/// roster are kept once.
pub async fn resolve_players(
    client: &StatsClient,
    selection: &ScanSelection,
) -> Result<Vec<PlayerRef>> {
    let mut team_ids: Vec<u64> = match selection {
        ScanSelection::League => {
            let teams = client.fetch_teams().await?;
            info!("[SCAN] League scan: {} teams", teams.len());
            teams.into_iter().map(|t| t.id).collect()
        }
        ScanSelection::Team(id) => vec![*id],
        ScanSelection::Date(date) => {
            let ids = client.fetch_schedule(date).await?;
            info!("[SCAN] {} teams with a game on {}", ids.len(), date);
            ids
        }
    };

    // Doubleheaders list a team twice in the schedule
    let mut seen_teams: FxHashSet<u64> = FxHashSet::default();
    team_ids.retain(|id| seen_teams.insert(*id));

    // Bounded parallel roster fetches, team failures isolated
    let semaphore = Arc::new(Semaphore::new(ROSTER_CONCURRENCY));
    let rosters: Vec<(u64, Result<Vec<PlayerRef>>)> = stream::iter(team_ids)
        .map(|team_id| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.ok();
                (team_id, client.fetch_roster(team_id).await)
            }
        })
        .buffer_unordered(ROSTER_CONCURRENCY)
        .collect()
        .await;

    let mut seen: FxHashSet<u64> = FxHashSet::default();
    let mut players = Vec::new();
    for (team_id, roster) in rosters {
        match roster {
            Ok(entries) => {
                for player in entries {
                    if seen.insert(player.id) {
                        players.push(player);
                    }
                }
            }
            Err(e) => {
                warn!("[SCAN] Skipping team {}: {:#}", team_id, e);
            }
        }
    }

    Ok(players)
}

/// Fetch stats for every player and fold the results into a report.
///
/// Qualifying rows are also streamed to the CSV export channel as they
/// are found, if one is configured.
pub async fn run_scan(
    client: &StatsClient,
    players: Vec<PlayerRef>,
    export: Option<&ExportChannel>,
) -> MilestoneReport {
    let total = players.len();
    info!("[SCAN] Scanning {} players...", total);

    let semaphore = Arc::new(Semaphore::new(STATS_CONCURRENCY));
    let mut fetches = stream::iter(players)
        .map(|player| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.ok();
                let outcome = client.fetch_stats(player.id).await;
                (player, outcome)
            }
        })
        .buffer_unordered(STATS_CONCURRENCY);

    let mut report = MilestoneReport::new();
    while let Some((player, outcome)) = fetches.next().await {
        match outcome {
            Fetched::Available(scopes) => {
                let rows = evaluate_player(&player, &scopes);
                if !rows.is_empty() {
                    info!(
                        "[SCAN] {} ({}): {} stat(s) one short of a multiple of 13",
                        player.full_name,
                        player.role(),
                        rows.len()
                    );
                    if let Some(export) = export {
                        for row in &rows {
                            export.record_hit(row.clone());
                        }
                    }
                }
                report.absorb(player.role(), rows);
            }
            Fetched::Unavailable(reason) => {
                report.note_skipped();
                warn!("[SCAN] Skipping {}: {}", player.full_name, reason);
            }
        }
    }

    report
}
