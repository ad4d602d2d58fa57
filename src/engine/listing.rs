use chrono::{DateTime, Utc};
use itertools::{Itertools, MinMaxResult};

use crate::model::{MatchRecord, TeamId};

/// Matches ordered by `played_at`, most recent first. Matches played at the
/// same instant keep their feed order.
pub(crate) fn newest_first<'a, I>(matches: I) -> Vec<&'a MatchRecord>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut ordered = matches.into_iter().collect_vec();
    ordered.sort_by(|a, b| b.played_at.cmp(&a.played_at));
    ordered
}

/// The `count` most recent matches, newest first.
pub fn last_matches(matches: &[MatchRecord], count: usize) -> Vec<MatchRecord> {
    newest_first(matches)
        .into_iter()
        .take(count)
        .cloned()
        .collect()
}

/// Every player who appears in at least one match, sorted by name.
pub fn player_names(matches: &[MatchRecord]) -> Vec<String> {
    matches
        .iter()
        .flat_map(|m| m.team_a.players().iter().chain(m.team_b.players()))
        .unique()
        .sorted()
        .cloned()
        .collect()
}

/// Every team identity that appears in at least one match, sorted.
pub fn team_ids(matches: &[MatchRecord]) -> Vec<TeamId> {
    matches
        .iter()
        .flat_map(|m| [m.team_a.team_id(), m.team_b.team_id()])
        .unique()
        .sorted()
        .collect()
}

/// Earliest and latest match time, or `None` without matches.
pub fn date_bounds(matches: &[MatchRecord]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    match matches.iter().map(|m| m.played_at).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(at) => Some((at, at)),
        MinMaxResult::MinMax(first, last) => Some((first, last)),
    }
}

/// The player a statistics view opens on: `preferred` when it has played,
/// otherwise the first name.
pub fn default_player(players: &[String], preferred: Option<&str>) -> Option<String> {
    preferred
        .and_then(|p| players.iter().find(|name| *name == p))
        .or_else(|| players.first())
        .cloned()
}
