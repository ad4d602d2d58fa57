use std::num::ParseIntError;

/// All errors that can occur while ingesting or querying league data.
#[derive(thiserror::Error, Debug)]
pub enum LeagueError {
    /// HTTP request to the match feed failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Feed returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the feed response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The snapshot body was not valid JSON.
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed record could not be turned into a match record.
    #[error("malformed match record: {reason}")]
    MalformedRecord { reason: String },

    /// A roster had no players after trimming.
    #[error("roster has no players")]
    EmptyRoster,

    /// A player name contains the roster separator.
    #[error("player name {name:?} contains the roster separator")]
    InvalidPlayerName { name: String },

    /// The same player appears on both sides of a match.
    #[error("player {name:?} appears on both sides")]
    OverlappingRosters { name: String },

    /// A range filter bucket such as `"10-20"` or `"100<"` could not be parsed.
    #[error("invalid range filter: {0:?}")]
    InvalidRange(String),

    /// Failed to parse an integer.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a date/time.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// An unknown sort column or enum name was requested.
    #[error("unknown variant: {0}")]
    UnknownVariant(#[from] strum::ParseError),
}

impl LeagueError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        LeagueError::MalformedRecord {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
