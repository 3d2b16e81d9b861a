//! Core type definitions for the milestone scout.
//!
//! This module provides the data model shared by the evaluator, the
//! aggregator and the presenters: scopes, roles, the tracked stat table
//! and the flat report row.

use rustc_hash::FxHashMap;
use serde_json::Value;

// === Scopes ===

/// Accumulation window for a counting statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Current season totals
    Season,
    /// Whole-career totals
    Career,
}

impl Scope {
    /// Evaluation order: season first, then career.
    pub const ALL: [Scope; 2] = [Scope::Season, Scope::Career];

    /// Value of the `stats=` query parameter for this scope.
    pub fn stats_param(self) -> &'static str {
        match self {
            Scope::Season => "season",
            Scope::Career => "career",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stats_param())
    }
}

// === Roles ===

/// Coarse player classification used to partition the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Batter,
    Pitcher,
}

impl Role {
    /// Position code "1" is a pitcher; everything else (including a
    /// missing code) counts as a batter.
    pub fn from_position_code(code: Option<&str>) -> Self {
        match code {
            Some("1") => Role::Pitcher,
            _ => Role::Batter,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Batter => write!(f, "Batter"),
            Role::Pitcher => write!(f, "Pitcher"),
        }
    }
}

// === Stat table ===

/// Counting stats recognized by the scout, in report order.
/// This table is the single configuration point for the tracked set.
pub const TRACKED_STATS: &[&str] = &[
    "gamesPlayed",
    "hits",
    "doubles",
    "triples",
    "homeRuns",
    "stolenBases",
    "totalBases",
];

/// Derived stat appended after the native keys:
/// `singles = hits - doubles - triples - homeRuns`.
pub const SINGLES: &str = "singles";

/// One scope's worth of raw stats as fetched: stat key → raw JSON value.
/// Values are kept raw; coercion happens at evaluation time.
pub type StatLine = FxHashMap<String, Value>;

/// Per-player stat lines by scope. An absent scope means the API had no
/// block for it (e.g. a rookie with no prior season) and is skipped
/// entirely, never treated as zeros.
#[derive(Debug, Clone, Default)]
pub struct PlayerScopes {
    pub season: Option<StatLine>,
    pub career: Option<StatLine>,
}

impl PlayerScopes {
    pub fn get(&self, scope: Scope) -> Option<&StatLine> {
        match scope {
            Scope::Season => self.season.as_ref(),
            Scope::Career => self.career.as_ref(),
        }
    }
}

// === Players and report rows ===

/// Flattened roster entry: everything the scan needs to know about a player.
#[derive(Debug, Clone)]
pub struct PlayerRef {
    pub id: u64,
    pub full_name: String,
    pub position_code: Option<String>,
}

impl PlayerRef {
    pub fn role(&self) -> Role {
        Role::from_position_code(self.position_code.as_deref())
    }
}

/// One qualifying (player, scope, stat) triple: the flat report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneHit {
    pub player_id: u64,
    pub player_name: String,
    pub role: Role,
    pub scope: Scope,
    pub stat: &'static str,
    pub value: u64,
    pub next_milestone: u64,
}
