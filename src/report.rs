//! Result aggregation: fan the evaluator out over scopes and tracked
//! stats for each player, and collect the qualifying rows into a
//! batter/pitcher partitioned report.

use tracing::debug;

use crate::config::{log_misses_enabled, MILESTONE_MODULUS};
use crate::milestone::{coerce_count, is_near_milestone, next_milestone};
use crate::types::{
    MilestoneHit, PlayerRef, PlayerScopes, Role, Scope, StatLine, SINGLES, TRACKED_STATS,
};

/// Evaluate one scope's stat line against the tracked stat table.
/// Returns `(stat, value, next_milestone)` for every qualifying stat, in
/// table order, with the derived `singles` appended last.
pub fn evaluate_line(line: &StatLine) -> Vec<(&'static str, u64, u64)> {
    let mut hits = Vec::new();

    for &key in TRACKED_STATS {
        let Some(value) = line.get(key).and_then(coerce_count) else {
            // Missing or non-numeric: skip this one stat, nothing else
            continue;
        };
        if is_near_milestone(value, MILESTONE_MODULUS) {
            hits.push((key, value, next_milestone(value, MILESTONE_MODULUS)));
        } else if log_misses_enabled() {
            debug!("  {} = {} (next multiple at {})", key, value, next_milestone(value, MILESTONE_MODULUS));
        }
    }

    if let Some(singles) = derived_singles(line) {
        if is_near_milestone(singles, MILESTONE_MODULUS) {
            hits.push((SINGLES, singles, next_milestone(singles, MILESTONE_MODULUS)));
        }
    }

    hits
}

/// `singles = hits - doubles - triples - homeRuns`, computed only when all
/// four inputs are present and coercible for this scope. A missing input
/// (or an inconsistent line where the extra-base hits exceed total hits)
/// silently omits the derived stat; it is never an error.
pub fn derived_singles(line: &StatLine) -> Option<u64> {
    let hits = line.get("hits").and_then(coerce_count)?;
    let doubles = line.get("doubles").and_then(coerce_count)?;
    let triples = line.get("triples").and_then(coerce_count)?;
    let home_runs = line.get("homeRuns").and_then(coerce_count)?;
    hits.checked_sub(doubles)?
        .checked_sub(triples)?
        .checked_sub(home_runs)
}

/// Evaluate every present scope for one player. Absent scopes are skipped
/// entirely. Row order is scope (season, career) then stat table order.
pub fn evaluate_player(player: &PlayerRef, scopes: &PlayerScopes) -> Vec<MilestoneHit> {
    let role = player.role();
    let mut rows = Vec::new();

    for scope in Scope::ALL {
        let Some(line) = scopes.get(scope) else {
            continue;
        };
        for (stat, value, target) in evaluate_line(line) {
            rows.push(MilestoneHit {
                player_id: player.id,
                player_name: player.full_name.clone(),
                role,
                scope,
                stat,
                value,
                next_milestone: target,
            });
        }
    }

    rows
}

/// Run-level accumulator. Players with at least one qualifying row land in
/// exactly one partition (by role); players with none appear in neither.
#[derive(Debug, Default)]
pub struct MilestoneReport {
    pub batters: Vec<MilestoneHit>,
    pub pitchers: Vec<MilestoneHit>,
    /// Players whose stats were fetched and evaluated
    pub players_scanned: usize,
    /// Players skipped because their stats were unavailable
    pub players_skipped: usize,
}

impl MilestoneReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one player and fold any qualifying rows into the report.
    /// Returns the number of rows the player contributed.
    pub fn push_player(&mut self, player: &PlayerRef, scopes: &PlayerScopes) -> usize {
        let rows = evaluate_player(player, scopes);
        let count = rows.len();
        self.absorb(player.role(), rows);
        count
    }

    /// Fold already-evaluated rows for one player into the report.
    /// An empty row set still counts the player as scanned.
    pub fn absorb(&mut self, role: Role, rows: Vec<MilestoneHit>) {
        self.players_scanned += 1;
        if rows.is_empty() {
            return;
        }
        match role {
            Role::Batter => self.batters.extend(rows),
            Role::Pitcher => self.pitchers.extend(rows),
        }
    }

    /// Note a player whose stats could not be fetched.
    pub fn note_skipped(&mut self) {
        self.players_skipped += 1;
    }

    pub fn total_hits(&self) -> usize {
        self.batters.len() + self.pitchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batters.is_empty() && self.pitchers.is_empty()
    }
}
