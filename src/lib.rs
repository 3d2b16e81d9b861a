//! MLB "Rule of 13" Milestone Scout
//!
//! One-shot scanner that polls the public MLB Stats API and flags every
//! player whose season or career counting stats sit exactly one short of
//! a multiple of 13, partitioned into batters and pitchers.

pub mod config;
pub mod export;
pub mod milestone;
pub mod report;
pub mod scan;
pub mod statsapi;
pub mod types;
