//! MLB Stats API client.
//!
//! Thin REST client over the public Stats API. Fetch failures never reach
//! the aggregation core: per-player stat lookups return an explicit
//! [`Fetched`] outcome so a single bad player or team skips cleanly while
//! the rest of the run continues.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::config::{HTTP_TIMEOUT_SECS, SPORT_ID, STATS_API_BASE};
use crate::types::{PlayerRef, PlayerScopes, Scope, StatLine};

/// Per-item fetch outcome: the core only ever sees well-formed stat lines
/// or an explicit "unavailable" marker, never a transport error.
#[derive(Debug)]
pub enum Fetched<T> {
    Available(T),
    /// The reason is log fodder only; an unavailable item is skipped, not fatal.
    Unavailable(String),
}

// === Response types ===

#[derive(Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<Team>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
struct RosterResponse {
    #[serde(default)]
    roster: Vec<RosterEntry>,
}

#[derive(Deserialize)]
struct RosterEntry {
    person: Person,
    position: Option<Position>,
}

#[derive(Deserialize)]
struct Person {
    id: u64,
    #[serde(rename = "fullName")]
    full_name: String,
}

#[derive(Deserialize)]
struct Position {
    code: Option<String>,
}

#[derive(Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<Game>,
}

#[derive(Deserialize)]
struct Game {
    teams: GameTeams,
}

#[derive(Deserialize)]
struct GameTeams {
    home: GameSide,
    away: GameSide,
}

#[derive(Deserialize)]
struct GameSide {
    team: TeamId,
}

#[derive(Deserialize)]
struct TeamId {
    id: u64,
}

#[derive(Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

#[derive(Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<StatSplit>,
}

#[derive(Deserialize)]
struct StatSplit {
    stat: serde_json::Map<String, serde_json::Value>,
}

// === Client ===

pub struct StatsClient {
    http: reqwest::Client,
}

impl StatsClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// All MLB teams.
    pub async fn fetch_teams(&self) -> Result<Vec<Team>> {
        let url = format!("{}/teams?sportId={}", STATS_API_BASE, SPORT_ID);
        let resp: TeamsResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("teams request failed")?
            .error_for_status()
            .context("teams request rejected")?
            .json()
            .await
            .context("teams response malformed")?;
        Ok(resp.teams)
    }

    /// Active roster for one team, flattened to `(id, name, position code)`.
    pub async fn fetch_roster(&self, team_id: u64) -> Result<Vec<PlayerRef>> {
        let url = format!("{}/teams/{}/roster", STATS_API_BASE, team_id);
        let resp: RosterResponse = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("roster request failed for team {}", team_id))?
            .error_for_status()
            .with_context(|| format!("roster request rejected for team {}", team_id))?
            .json()
            .await
            .with_context(|| format!("roster response malformed for team {}", team_id))?;

        Ok(resp
            .roster
            .into_iter()
            .map(|entry| PlayerRef {
                id: entry.person.id,
                full_name: entry.person.full_name,
                position_code: entry.position.and_then(|p| p.code),
            })
            .collect())
    }

    /// Team ids with a scheduled game on `date` (YYYY-MM-DD), home and away.
    pub async fn fetch_schedule(&self, date: &str) -> Result<Vec<u64>> {
        let url = format!(
            "{}/schedule?sportId={}&date={}",
            STATS_API_BASE, SPORT_ID, date
        );
        let resp: ScheduleResponse = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("schedule request failed for {}", date))?
            .error_for_status()
            .with_context(|| format!("schedule request rejected for {}", date))?
            .json()
            .await
            .with_context(|| format!("schedule response malformed for {}", date))?;

        let mut team_ids = Vec::new();
        for day in resp.dates {
            for game in day.games {
                team_ids.push(game.teams.home.team.id);
                team_ids.push(game.teams.away.team.id);
            }
        }
        Ok(team_ids)
    }

    /// Season and career hitting stats for one player.
    ///
    /// The two scopes are fetched independently and each may be absent
    /// (no stat block for that scope). Any transport failure downgrades
    /// the whole player to `Unavailable` so the scan can skip and move on.
    pub async fn fetch_stats(&self, player_id: u64) -> Fetched<PlayerScopes> {
        let mut scopes = PlayerScopes::default();

        for scope in Scope::ALL {
            match self.fetch_scope(player_id, scope).await {
                Ok(line) => match scope {
                    Scope::Season => scopes.season = line,
                    Scope::Career => scopes.career = line,
                },
                Err(e) => {
                    return Fetched::Unavailable(format!(
                        "{} stats for player {}: {:#}",
                        scope, player_id, e
                    ));
                }
            }
        }

        Fetched::Available(scopes)
    }

    /// One scope's stat line. `Ok(None)` means the API returned no block
    /// for this scope (normal for rookies / non-hitters), not an error.
    async fn fetch_scope(&self, player_id: u64, scope: Scope) -> Result<Option<StatLine>> {
        let url = format!(
            "{}/people/{}/stats?stats={}&group=hitting",
            STATS_API_BASE,
            player_id,
            scope.stats_param()
        );
        let resp: StatsResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("stats request failed")?
            .error_for_status()
            .context("stats request rejected")?
            .json()
            .await
            .context("stats response malformed")?;

        let line = resp
            .stats
            .into_iter()
            .next()
            .and_then(|group| group.splits.into_iter().next())
            .map(|split| split.stat.into_iter().collect::<StatLine>());

        if line.is_none() {
            debug!("[API] No {} hitting block for player {}", scope, player_id);
        }

        Ok(line)
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new()
    }
}
