//! Simple script to inspect one player's tracked stats and milestone targets.
//!
//! Usage: cargo run --bin check_player -- <player_id>

use anyhow::{bail, Context, Result};

use milestone_scout::config::MILESTONE_MODULUS;
use milestone_scout::milestone::{coerce_count, is_near_milestone, next_milestone};
use milestone_scout::report::derived_singles;
use milestone_scout::statsapi::{Fetched, StatsClient};
use milestone_scout::types::{Scope, StatLine, SINGLES, TRACKED_STATS};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let arg = std::env::args()
        .nth(1)
        .context("usage: check_player <player_id>")?;
    let player_id: u64 = arg.parse().context("player id must be numeric")?;

    let client = StatsClient::new();
    let scopes = match client.fetch_stats(player_id).await {
        Fetched::Available(scopes) => scopes,
        Fetched::Unavailable(reason) => bail!("stats unavailable: {}", reason),
    };

    println!("Player {} (modulus {})", player_id, MILESTONE_MODULUS);

    for scope in Scope::ALL {
        match scopes.get(scope) {
            Some(line) => print_scope(scope, line),
            None => println!("\n[{}] no hitting block", scope),
        }
    }

    Ok(())
}

fn print_scope(scope: Scope, line: &StatLine) {
    println!("\n[{}]", scope);
    for &key in TRACKED_STATS {
        match line.get(key).and_then(coerce_count) {
            Some(value) => print_stat(key, value),
            None => println!("  {:<12} -- (not evaluable)", key),
        }
    }

    match derived_singles(line) {
        Some(value) => print_stat(SINGLES, value),
        None => println!("  {:<12} -- (inputs incomplete)", SINGLES),
    }
}

fn print_stat(key: &str, value: u64) {
    let marker = if is_near_milestone(value, MILESTONE_MODULUS) {
        "  ← ONE SHORT"
    } else {
        ""
    };
    println!(
        "  {:<12} {:>6}  (next multiple of {} at {}){}",
        key,
        value,
        MILESTONE_MODULUS,
        next_milestone(value, MILESTONE_MODULUS),
        marker
    );
}
