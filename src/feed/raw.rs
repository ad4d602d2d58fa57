use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{LeagueError, Result};
use crate::model::{MatchRecord, Roster};

const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Shorter digit strings are not taken as epoch milliseconds.
const MIN_EPOCH_DIGITS: usize = 10;

/// A match as stored in the realtime database.
///
/// `player*` is side A and `rival*` is side B; `result` reads `"5-3"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub player1: String,
    #[serde(default)]
    pub player2: String,
    pub rival1: String,
    #[serde(default)]
    pub rival2: String,
    pub result: String,
    pub date: RawDate,
}

/// The `date` field: epoch milliseconds or a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl RawDate {
    /// [`RawDate::to_utc_in`] with offset-less date-times read in [`Local`] time.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        self.to_utc_in(&Local)
    }

    /// Epoch milliseconds (as a number or a numeric string of at least ten
    /// digits), RFC 3339, `YYYY-MM-DDTHH:MM:SS` read as wall time in `zone`,
    /// or a bare `YYYY-MM-DD` at UTC midnight.
    pub fn to_utc_in<Tz: TimeZone>(&self, zone: &Tz) -> Result<DateTime<Utc>> {
        match self {
            RawDate::Millis(millis) => from_millis(*millis),
            RawDate::FractionalMillis(millis) => from_millis(millis.round() as i64),
            RawDate::Text(text) => parse_date_text(text, zone),
        }
    }
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| LeagueError::malformed(format!("timestamp {millis} out of range")))
}

fn parse_date_text<Tz: TimeZone>(text: &str, zone: &Tz) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if text.len() >= MIN_EPOCH_DIGITS {
        if let Ok(millis) = text.parse::<i64>() {
            return from_millis(millis);
        }
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Ok(date_time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, NAIVE_DATE_TIME_FORMAT) {
        return Ok(zone
            .from_local_datetime(&naive)
            .earliest()
            // wall time skipped by a DST change
            .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Split a `"<int>-<int>"` result into side A and side B goals. `:` is
/// accepted as separator too.
pub fn parse_score(result: &str) -> Result<(u32, u32)> {
    let (home, away) = result
        .split_once(['-', ':'])
        .ok_or_else(|| LeagueError::malformed(format!("result {result:?} has no separator")))?;
    Ok((home.trim().parse()?, away.trim().parse()?))
}

impl RawMatch {
    /// Validate into a [`MatchRecord`], reading offset-less dates in [`Local`] time.
    pub fn into_record(self) -> Result<MatchRecord> {
        self.into_record_in(&Local)
    }

    /// Validate into a [`MatchRecord`], reading offset-less dates as wall time in `zone`.
    pub fn into_record_in<Tz: TimeZone>(self, zone: &Tz) -> Result<MatchRecord> {
        let (score_a, score_b) = parse_score(&self.result)?;
        let played_at = self.date.to_utc_in(zone)?;
        let team_a = Roster::new([&self.player1, &self.player2])?;
        let team_b = Roster::new([&self.rival1, &self.rival2])?;
        MatchRecord::new(team_a, team_b, score_a, score_b, played_at)
    }
}

impl TryFrom<RawMatch> for MatchRecord {
    type Error = LeagueError;

    fn try_from(raw: RawMatch) -> Result<Self> {
        raw.into_record()
    }
}

/// Turn a realtime-database REST body into match records.
///
/// The body is `null` for an empty database, an object keyed by push id, or
/// an array when keys are sequential integers. Entries that do not make a
/// valid match are logged and skipped.
pub fn parse_snapshot(body: &str) -> Result<Vec<MatchRecord>> {
    parse_snapshot_in(body, &Local)
}

/// [`parse_snapshot`] with offset-less date-times read as wall time in `zone`.
#[instrument(skip(body, zone), fields(bytes = body.len()))]
pub fn parse_snapshot_in<Tz: TimeZone>(body: &str, zone: &Tz) -> Result<Vec<MatchRecord>> {
    let entries: Vec<(String, Value)> = match serde_json::from_str::<Value>(body)? {
        Value::Null => Vec::new(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(idx, value)| (idx.to_string(), value))
            .collect(),
        _ => {
            return Err(LeagueError::malformed(
                "snapshot root is neither an object nor an array",
            ))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match ingest_entry(value, zone) {
            Ok(record) => records.push(record.with_key(key)),
            Err(e) => warn!(key = %key, error = %e, "skipping malformed match record"),
        }
    }
    debug!(count = records.len(), "parsed match snapshot");
    Ok(records)
}

fn ingest_entry<Tz: TimeZone>(value: Value, zone: &Tz) -> Result<MatchRecord> {
    serde_json::from_value::<RawMatch>(value)?.into_record_in(zone)
}
