// tests/integration_tests.rs
// Holistic tests for the milestone scout
//
// These tests verify the full evaluation flow:
// 1. Milestone arithmetic (near-milestone rule + next target)
// 2. Derived singles computation
// 3. Scope handling and aggregation
// 4. Role partitioning
// 5. End-to-end scenario from fetched stat lines to report rows

use serde_json::{json, Value};

use milestone_scout::types::{PlayerRef, PlayerScopes, Scope, StatLine};

fn line(pairs: &[(&str, Value)]) -> StatLine {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn player(id: u64, name: &str, position_code: Option<&str>) -> PlayerRef {
    PlayerRef {
        id,
        full_name: name.to_string(),
        position_code: position_code.map(|c| c.to_string()),
    }
}

// ============================================================================
// MILESTONE ARITHMETIC - the near-milestone rule over the whole residue range
// ============================================================================

mod milestone_tests {
    use milestone_scout::milestone::{is_near_milestone, next_milestone};

    /// Test: v is near iff v mod 13 == 12, checked across several cycles
    #[test]
    fn test_near_iff_residue_twelve() {
        for v in 0u64..200 {
            assert_eq!(
                is_near_milestone(v, 13),
                v % 13 == 12,
                "disagreement at v={}",
                v
            );
        }
    }

    /// Test: the next milestone is the smallest multiple strictly above v
    #[test]
    fn test_next_is_strictly_greater_multiple() {
        for v in 0u64..200 {
            let next = next_milestone(v, 13);
            assert_eq!(next % 13, 0);
            assert!(next > v);
            assert!(next - v <= 13);
        }
    }

    /// Test: the concrete values called out in the design
    #[test]
    fn test_known_targets() {
        assert_eq!(next_milestone(12, 13), 13);
        assert_eq!(next_milestone(25, 13), 26);
        assert_eq!(next_milestone(26, 13), 39);
        assert_eq!(next_milestone(0, 13), 13);
    }
}

// ============================================================================
// DERIVED SINGLES - computed from four inputs, silently omitted otherwise
// ============================================================================

mod singles_tests {
    use super::*;
    use milestone_scout::report::{derived_singles, evaluate_line};
    use milestone_scout::types::SINGLES;

    #[test]
    fn test_singles_arithmetic() {
        let l = line(&[
            ("hits", json!(50)),
            ("doubles", json!(10)),
            ("triples", json!(2)),
            ("homeRuns", json!(12)),
        ]);
        assert_eq!(derived_singles(&l), Some(26));
    }

    /// Test: singles=25 is one short of 26 and shows up as a hit
    #[test]
    fn test_singles_near_milestone() {
        let l = line(&[
            ("hits", json!(49)),
            ("doubles", json!(10)),
            ("triples", json!(2)),
            ("homeRuns", json!(12)),
        ]);
        assert_eq!(derived_singles(&l), Some(25));
        assert!(evaluate_line(&l).contains(&(SINGLES, 25, 26)));
    }

    /// Test: a non-numeric input suppresses the derived stat entirely
    #[test]
    fn test_singles_omitted_on_bad_input() {
        let l = line(&[
            ("hits", json!(49)),
            ("doubles", json!("-")),
            ("triples", json!(2)),
            ("homeRuns", json!(12)),
        ]);
        assert_eq!(derived_singles(&l), None);
        assert!(evaluate_line(&l).iter().all(|(s, _, _)| *s != SINGLES));
    }
}

// ============================================================================
// AGGREGATION - scope handling, idempotence, silent skips
// ============================================================================

mod aggregator_tests {
    use super::*;
    use milestone_scout::report::evaluate_player;

    /// Test: only a career entry means zero season rows, whatever the values
    #[test]
    fn test_missing_scope_skipped_entirely() {
        let p = player(100, "Rookie Cup", Some("8"));
        let scopes = PlayerScopes {
            season: None,
            career: Some(line(&[
                ("hits", json!(12)),
                ("gamesPlayed", json!(25)),
            ])),
        };
        let rows = evaluate_player(&p, &scopes);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.scope == Scope::Career));
    }

    /// Test: both scopes evaluate independently with season first
    #[test]
    fn test_scope_order_season_then_career() {
        let p = player(101, "Two Scopes", Some("4"));
        let scopes = PlayerScopes {
            season: Some(line(&[("hits", json!(25))])),
            career: Some(line(&[("hits", json!(155))])), // 155 % 13 == 12
        };
        let rows = evaluate_player(&p, &scopes);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scope, Scope::Season);
        assert_eq!(rows[0].value, 25);
        assert_eq!(rows[1].scope, Scope::Career);
        assert_eq!(rows[1].next_milestone, 156);
    }

    /// Test: evaluating the same input twice yields identical rows
    #[test]
    fn test_idempotent_evaluation() {
        let p = player(102, "Same Twice", None);
        let scopes = PlayerScopes {
            season: Some(line(&[
                ("hits", json!(38)), // 38 % 13 == 12
                ("stolenBases", json!("25")),
                ("totalBases", json!(64.0)), // 64 % 13 == 12
            ])),
            career: None,
        };
        let first = evaluate_player(&p, &scopes);
        let second = evaluate_player(&p, &scopes);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    /// Test: non-numeric and missing values skip that stat only
    #[test]
    fn test_bad_values_skip_single_stat() {
        let p = player(103, "Sparse Line", Some("2"));
        let scopes = PlayerScopes {
            season: Some(line(&[
                ("hits", json!("not a number")),
                ("gamesPlayed", json!(null)),
                ("doubles", json!(12)),
            ])),
            career: None,
        };
        let rows = evaluate_player(&p, &scopes);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stat, "doubles");
        assert_eq!(rows[0].next_milestone, 13);
    }
}

// ============================================================================
// ROLE PARTITIONING - every hit lands in exactly one partition
// ============================================================================

mod partition_tests {
    use super::*;
    use milestone_scout::report::MilestoneReport;
    use milestone_scout::types::Role;

    #[test]
    fn test_position_code_mapping() {
        assert_eq!(Role::from_position_code(Some("1")), Role::Pitcher);
        assert_eq!(Role::from_position_code(Some("2")), Role::Batter);
        assert_eq!(Role::from_position_code(Some("10")), Role::Batter);
        assert_eq!(Role::from_position_code(None), Role::Batter);
    }

    /// Test: players with hits appear in exactly one partition; players
    /// without hits appear in neither, but still count as scanned
    #[test]
    fn test_partition_completeness() {
        let mut report = MilestoneReport::new();
        let near = PlayerScopes {
            season: Some(line(&[("hits", json!(12))])),
            career: None,
        };
        let far = PlayerScopes {
            season: Some(line(&[("hits", json!(13))])),
            career: None,
        };

        report.push_player(&player(1, "Ace Slinger", Some("1")), &near);
        report.push_player(&player(2, "Gap Hitter", Some("7")), &near);
        report.push_player(&player(3, "Round Number", Some("5")), &far);

        assert_eq!(report.players_scanned, 3);
        assert_eq!(report.pitchers.len(), 1);
        assert_eq!(report.batters.len(), 1);
        assert_eq!(report.pitchers[0].player_id, 1);
        assert_eq!(report.batters[0].player_id, 2);
        let all_ids: Vec<u64> = report
            .batters
            .iter()
            .chain(&report.pitchers)
            .map(|r| r.player_id)
            .collect();
        assert!(!all_ids.contains(&3));
    }
}

// ============================================================================
// END-TO-END SCENARIO - stat lines in, report rows out
// ============================================================================

mod end_to_end_tests {
    use super::*;
    use milestone_scout::report::MilestoneReport;
    use milestone_scout::types::{Role, Scope};

    /// Test: player A with career hits=12, gamesPlayed=100, homeRuns=5
    /// yields exactly one row: career hits at 12, next milestone 13
    #[test]
    fn test_single_career_hit() {
        let mut report = MilestoneReport::new();
        let scopes = PlayerScopes {
            season: None,
            career: Some(line(&[
                ("hits", json!(12)),
                ("gamesPlayed", json!(100)),
                ("homeRuns", json!(5)),
            ])),
        };

        report.push_player(&player(660271, "A", Some("10")), &scopes);

        assert_eq!(report.total_hits(), 1);
        let row = &report.batters[0];
        assert_eq!(row.scope, Scope::Career);
        assert_eq!(row.stat, "hits");
        assert_eq!(row.value, 12);
        assert_eq!(row.next_milestone, 13);
        assert_eq!(row.role, Role::Batter);
    }

    /// Test: an empty result set is a valid terminal state
    #[test]
    fn test_empty_report_is_valid() {
        let mut report = MilestoneReport::new();
        let scopes = PlayerScopes {
            season: Some(line(&[("hits", json!(13)), ("homeRuns", json!(0))])),
            career: None,
        };
        report.push_player(&player(1, "Nobody Close", None), &scopes);
        report.note_skipped();

        assert!(report.is_empty());
        assert_eq!(report.total_hits(), 0);
        assert_eq!(report.players_scanned, 1);
        assert_eq!(report.players_skipped, 1);
    }
}
