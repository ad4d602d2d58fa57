use chrono::{TimeZone, Utc};

use crate::model::{MatchRecord, Roster};

/// `a` vs `b` (both `"X & Y"` rosters) on the given UTC day at noon.
pub(crate) fn record(a: &str, b: &str, score_a: u32, score_b: u32, day: (i32, u32, u32)) -> MatchRecord {
    record_at(a, b, score_a, score_b, day, 12)
}

pub(crate) fn record_at(
    a: &str,
    b: &str,
    score_a: u32,
    score_b: u32,
    day: (i32, u32, u32),
    hour: u32,
) -> MatchRecord {
    let played_at = Utc
        .with_ymd_and_hms(day.0, day.1, day.2, hour, 0, 0)
        .single()
        .unwrap();
    MatchRecord::new(
        Roster::parse(a).unwrap(),
        Roster::parse(b).unwrap(),
        score_a,
        score_b,
        played_at,
    )
    .unwrap()
}
