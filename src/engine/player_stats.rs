use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use tracing::{debug, instrument};

use super::listing::newest_first;
use crate::model::{MatchRecord, Outcome, PlayerStats};

/// Headline statistics for `player`.
///
/// The calendar week used for `week_matches` runs from Monday 00:00
/// (inclusive) to the next Monday 00:00 (exclusive) in the time zone of
/// `as_of`.
#[instrument(skip(matches, as_of), fields(matches = matches.len()))]
pub fn compute_player_stats<Tz: TimeZone>(
    matches: &[MatchRecord],
    player: &str,
    as_of: &DateTime<Tz>,
) -> PlayerStats {
    let played = newest_first(matches.iter().filter(|m| m.involves(player)));
    let Some(last) = played.first() else {
        debug!("player has no matches");
        return PlayerStats::default();
    };

    let (week_start, week_end) = calendar_week(as_of);
    let week_matches = played
        .iter()
        .filter(|m| m.played_at >= week_start && m.played_at < week_end)
        .count();

    let mut wins = 0u32;
    let mut goals = 0u64;
    for record in &played {
        let Some(side) = record.side_of(player) else {
            continue;
        };
        goals += u64::from(record.goals(side));
        if record.outcome(side) == Outcome::Win {
            wins += 1;
        }
    }

    let total = played.len() as f64;
    let stats = PlayerStats {
        last_result: last.score(),
        week_matches: week_matches as u32,
        win_percent: (f64::from(wins) * 100.0 / total).round() as u32,
        avg_goals: (goals as f64 / total * 10.0).round() / 10.0,
    };
    debug!(matches = played.len(), week_matches, "computed player stats");
    stats
}

/// [`compute_player_stats`] for the current local time.
pub fn compute_player_stats_now(matches: &[MatchRecord], player: &str) -> PlayerStats {
    compute_player_stats(matches, player, &Local::now())
}

/// Monday-to-Monday bounds of the week containing `instant`, in its zone.
pub fn calendar_week<Tz: TimeZone>(instant: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let zone = instant.timezone();
    let monday = instant.date_naive().week(Weekday::Mon).first_day();
    let next_monday = monday + Days::new(7);
    (
        local_midnight(&zone, monday),
        local_midnight(&zone, next_monday),
    )
}

fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&midnight)
        .earliest()
        // midnight skipped by a DST change
        .unwrap_or_else(|| zone.from_utc_datetime(&midnight))
        .with_timezone(&Utc)
}
