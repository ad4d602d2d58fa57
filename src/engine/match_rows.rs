use tracing::{debug, instrument};

use super::listing::newest_first;
use crate::model::{MatchRecord, MatchRow, MatchScope, Side, TeamId};

/// Project every match into a display row.
///
/// With [`MatchScope::Mine`] a match in which the player is on side B is
/// flipped so that `team` is the player's side and the outcome is theirs.
/// With [`MatchScope::All`] rows keep the stored column order. Matches
/// without the player are still returned; narrowing to "mine only" is done
/// by the scope predicate of [`FilterCriteria`](crate::model::FilterCriteria).
#[instrument(skip(matches), fields(matches = matches.len()))]
pub fn build_match_rows(matches: &[MatchRecord], scope: &MatchScope) -> Vec<MatchRow> {
    let perspective = scope.perspective();
    let rows: Vec<MatchRow> = matches
        .iter()
        .map(|record| {
            let side = match perspective.and_then(|p| record.side_of(p)) {
                Some(Side::B) => Side::B,
                _ => Side::A,
            };
            MatchRow::from_side(record, side)
        })
        .collect();
    debug!(count = rows.len(), "built match rows");
    rows
}

/// Matches of `team`, newest first, seen from the team's side.
pub fn team_history(matches: &[MatchRecord], team: &TeamId, limit: Option<usize>) -> Vec<MatchRow> {
    newest_first(matches)
        .into_iter()
        .filter_map(|record| {
            Side::BOTH
                .into_iter()
                .find(|side| record.roster(*side).team_id() == *team)
                .map(|side| MatchRow::from_side(record, side))
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::record;
    use crate::model::Outcome;

    #[test]
    fn test_mine_flips_side_b() {
        let matches = vec![
            record("Kuba & Ewa", "Bartek & Ola", 3, 1, (2024, 1, 1)),
            record("Bartek & Ola", "Kuba & Ewa", 2, 2, (2024, 1, 2)),
        ];
        let rows = build_match_rows(&matches, &MatchScope::Mine("Bartek".into()));
        assert_eq!(rows[0].team.to_string(), "Bartek & Ola");
        assert_eq!(rows[0].rival.to_string(), "Kuba & Ewa");
        assert_eq!(rows[0].score(), "1 : 3");
        assert_eq!(rows[0].outcome, Outcome::Loss);
        assert_eq!(rows[1].team.to_string(), "Bartek & Ola");
        assert_eq!(rows[1].outcome, Outcome::Draw);
    }

    #[test]
    fn test_all_keeps_stored_order() {
        let matches = vec![record("Kuba & Ewa", "Bartek & Ola", 3, 1, (2024, 1, 1))];
        let rows = build_match_rows(&matches, &MatchScope::All);
        assert_eq!(rows[0].team.to_string(), "Kuba & Ewa");
        assert_eq!(rows[0].score(), "3 : 1");
        assert_eq!(rows[0].outcome, Outcome::Win);
    }

    #[test]
    fn test_mine_without_player_keeps_stored_order() {
        let matches = vec![record("Kuba & Ewa", "Jan & Ola", 0, 1, (2024, 1, 1))];
        let rows = build_match_rows(&matches, &MatchScope::Mine("Bartek".into()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team.to_string(), "Kuba & Ewa");
        assert_eq!(rows[0].outcome, Outcome::Loss);
    }

    #[test]
    fn test_team_history() {
        let matches = vec![
            record("Ola & Bartek", "Kuba & Ewa", 3, 1, (2024, 1, 1)),
            record("Kuba & Ewa", "Bartek & Ola", 0, 2, (2024, 1, 3)),
            record("Kuba & Jan", "Ewa & Ola", 0, 2, (2024, 1, 4)),
            record("Kuba & Ewa", "Bartek & Ola", 5, 0, (2024, 1, 2)),
        ];
        let team: TeamId = "Bartek & Ola".parse().unwrap();
        let history = team_history(&matches, &team, None);
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|row| row.team.team_id() == team));
        let outcomes: Vec<_> = history.iter().map(|row| row.outcome).collect();
        assert_eq!(outcomes, [Outcome::Win, Outcome::Loss, Outcome::Win]);
        assert_eq!(team_history(&matches, &team, Some(1)).len(), 1);
    }
}
