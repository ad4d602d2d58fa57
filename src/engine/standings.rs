use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::model::{AggregateRow, MatchRecord, Side, StandingsMode, TeamRanking, Trophy};

/// Rows keyed by subject, kept in order of first appearance.
#[derive(Default)]
struct Tally {
    rows: Vec<AggregateRow>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn entry(&mut self, subject: &str, create: impl FnOnce() -> AggregateRow) -> &mut AggregateRow {
        let idx = match self.index.get(subject) {
            Some(&idx) => idx,
            None => {
                self.rows.push(create());
                self.index.insert(subject.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    fn finish(mut self) -> Vec<AggregateRow> {
        self.rows.iter_mut().for_each(AggregateRow::finish);
        self.rows
    }
}

/// One row per player, in order of first appearance. Goals are not tracked
/// per player.
#[instrument(skip(matches), fields(matches = matches.len()))]
pub fn build_player_standings(matches: &[MatchRecord]) -> Vec<AggregateRow> {
    let mut tally = Tally::default();
    for record in matches {
        for side in Side::BOTH {
            let outcome = record.outcome(side);
            for player in record.roster(side).players() {
                tally
                    .entry(player, || {
                        AggregateRow::new(player.clone(), vec![player.clone()], false)
                    })
                    .record(outcome, 0, 0);
            }
        }
    }
    let rows = tally.finish();
    debug!(count = rows.len(), "built player standings");
    rows
}

/// One row per team identity, merging rosters recorded in any player order.
#[instrument(skip(matches), fields(matches = matches.len()))]
pub fn build_team_standings(matches: &[MatchRecord]) -> Vec<AggregateRow> {
    let mut tally = Tally::default();
    for record in matches {
        for side in Side::BOTH {
            let roster = record.roster(side);
            let team = roster.team_id();
            tally
                .entry(team.as_str(), || {
                    AggregateRow::new(team.to_string(), roster.sorted_players(), true)
                })
                .record(
                    record.outcome(side),
                    record.goals(side),
                    record.goals(side.opposite()),
                );
        }
    }
    let rows = tally.finish();
    debug!(count = rows.len(), "built team standings");
    rows
}

pub fn build_standings(matches: &[MatchRecord], mode: StandingsMode) -> Vec<AggregateRow> {
    match mode {
        StandingsMode::Player => build_player_standings(matches),
        StandingsMode::Team => build_team_standings(matches),
    }
}

/// Team standings ordered by win percentage, best first, with trophies for
/// the podium. Teams with equal win percentage keep first-appearance order.
pub fn rank_teams(matches: &[MatchRecord]) -> Vec<TeamRanking> {
    let mut rows = build_team_standings(matches);
    rows.sort_by(|a, b| b.win_percentage.total_cmp(&a.win_percentage));
    rows.into_iter()
        .enumerate()
        .map(|(rank, row)| TeamRanking {
            row,
            trophy: Trophy::for_rank(rank),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::record;
    use crate::model::GoalTotals;

    fn row<'a>(rows: &'a [AggregateRow], subject: &str) -> &'a AggregateRow {
        rows.iter().find(|r| r.subject == subject).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(build_player_standings(&[]).is_empty());
        assert!(build_team_standings(&[]).is_empty());
        assert!(rank_teams(&[]).is_empty());
    }

    #[test]
    fn test_points_consistency() {
        let matches = vec![
            record("A & B", "C & D", 3, 1, (2024, 1, 10)),
            record("A & C", "B & D", 0, 0, (2024, 1, 11)),
            record("D & A", "C & B", 1, 4, (2024, 1, 12)),
        ];
        for r in build_player_standings(&matches) {
            assert_eq!(r.points, 3 * r.wins + r.draws);
            assert_eq!(r.matches_played, r.wins + r.losses + r.draws);
            assert!(r.goals.is_none());
        }
    }

    #[test]
    fn test_single_match_symmetry() {
        let matches = vec![record("A & B", "C & D", 2, 1, (2024, 1, 10))];
        let rows = build_player_standings(&matches);
        assert_eq!(rows.len(), 4);
        for p in ["A", "B"] {
            let r = row(&rows, p);
            assert_eq!((r.wins, r.losses, r.draws), (1, 0, 0));
        }
        for p in ["C", "D"] {
            let r = row(&rows, p);
            assert_eq!((r.wins, r.losses, r.draws), (0, 1, 0));
        }

        let draw = vec![record("A & B", "C & D", 1, 1, (2024, 1, 10))];
        for r in build_player_standings(&draw) {
            assert_eq!((r.wins, r.losses, r.draws, r.points), (0, 0, 1, 1));
        }
    }

    #[test]
    fn test_player_rows_in_first_appearance_order() {
        let matches = vec![
            record("Zed & Amy", "Kim & Bob", 2, 1, (2024, 1, 10)),
            record("Amy & Lou", "Zed & Kim", 2, 1, (2024, 1, 11)),
        ];
        let subjects: Vec<_> = build_player_standings(&matches)
            .into_iter()
            .map(|r| r.subject)
            .collect();
        assert_eq!(subjects, ["Zed", "Amy", "Kim", "Bob", "Lou"]);
    }

    #[test]
    fn test_team_identity_merges_reordered_rosters() {
        let matches = vec![
            record("Alice & Bob", "Carol & Dan", 3, 2, (2024, 1, 10)),
            record("Bob & Alice", "Dan & Carol", 1, 1, (2024, 1, 11)),
        ];
        let rows = build_team_standings(&matches);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.matches_played == 2));

        let ab = row(&rows, "Alice & Bob");
        assert_eq!(ab.members, ["Alice", "Bob"]);
        assert_eq!((ab.wins, ab.draws, ab.points), (1, 1, 4));
        assert_eq!(
            ab.goals,
            Some(GoalTotals {
                goals_for: 4,
                goals_against: 3,
                goal_difference: 1,
            })
        );
        assert_eq!(row(&rows, "Carol & Dan").goals.unwrap().goal_difference, -1);
    }

    #[test]
    fn test_team_goals_do_not_overflow() {
        let body = r#"{
            "-a": {"player1":"Alice","player2":"Bob","rival1":"Carol","rival2":"Dan","result":"4000000000-0","date":"2024-01-10"},
            "-b": {"player1":"Bob","player2":"Alice","rival1":"Dan","rival2":"Carol","result":"4000000000-0","date":"2024-01-11"}
        }"#;
        let matches = crate::feed::parse_snapshot(body).unwrap();
        assert_eq!(matches.len(), 2);

        let rows = build_team_standings(&matches);
        let ab = row(&rows, "Alice & Bob").goals.unwrap();
        assert_eq!(ab.goals_for, 8_000_000_000);
        assert_eq!(ab.goal_difference, 8_000_000_000);
        let cd = row(&rows, "Carol & Dan").goals.unwrap();
        assert_eq!(cd.goals_against, 8_000_000_000);
        assert_eq!(cd.goal_difference, -8_000_000_000);
    }

    #[test]
    fn test_team_merge_across_columns() {
        let matches = vec![
            record("Alice & Bob", "Carol & Dan", 3, 0, (2024, 1, 10)),
            record("Dan & Carol", "Bob & Alice", 2, 0, (2024, 1, 11)),
        ];
        let rows = build_team_standings(&matches);
        assert_eq!(rows.len(), 2);
        let ab = row(&rows, "Alice & Bob");
        assert_eq!((ab.wins, ab.losses), (1, 1));
        assert_eq!(ab.points_per_match, 1.5);
        assert_eq!(ab.win_percentage, 50.0);
    }

    #[test]
    fn test_deterministic() {
        let matches = vec![
            record("A & B", "C & D", 3, 1, (2024, 1, 10)),
            record("A & C", "B & D", 0, 2, (2024, 1, 11)),
        ];
        assert_eq!(
            build_player_standings(&matches),
            build_player_standings(&matches)
        );
        assert_eq!(build_team_standings(&matches), build_team_standings(&matches));
    }

    #[test]
    fn test_rank_teams_trophies() {
        let matches = vec![
            record("A & B", "C & D", 3, 1, (2024, 1, 10)),
            record("E & F", "G & H", 0, 0, (2024, 1, 11)),
            record("A & B", "G & H", 0, 2, (2024, 1, 12)),
        ];
        let ranking = rank_teams(&matches);
        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking[0].row.subject, "A & B");
        assert_eq!(ranking[0].trophy, Some(Trophy::Gold));
        assert_eq!(ranking[1].row.subject, "G & H");
        assert_eq!(ranking[1].trophy, Some(Trophy::Silver));
        assert_eq!(ranking[2].trophy, Some(Trophy::Bronze));
        assert_eq!(ranking[3].trophy, None);
    }
}
