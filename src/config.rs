use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::DEFAULT_PAGE_SIZE;

/// Local realtime-database emulator.
pub const DEFAULT_DATABASE_URL: &str = "http://127.0.0.1:9000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LAST_MATCHES: usize = 10;

const DATABASE_URL_VAR: &str = "LEAGUE_DATABASE_URL";
const DATABASE_PATH_VAR: &str = "LEAGUE_DATABASE_PATH";
const POLL_INTERVAL_VAR: &str = "LEAGUE_POLL_INTERVAL_SECS";

/// Where match records are read from and how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub database_url: String,
    /// Node holding the match records; empty for the database root.
    pub path: String,
    pub poll_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            path: String::new(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl FeedConfig {
    /// Defaults overridden by `LEAGUE_DATABASE_URL`, `LEAGUE_DATABASE_PATH`
    /// and `LEAGUE_POLL_INTERVAL_SECS` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = env::var(DATABASE_URL_VAR) {
            config.database_url = url;
        }
        if let Ok(path) = env::var(DATABASE_PATH_VAR) {
            config.path = path;
        }
        if let Ok(secs) = env::var(POLL_INTERVAL_VAR) {
            config.poll_interval_secs = secs.trim().parse()?;
        }
        Ok(config)
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_secs = interval.as_secs().max(1);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// REST url of the match node, e.g. `https://db.example.com/matches.json`.
    pub fn snapshot_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.database_url.trim_end_matches('/'),
            self.path.trim_matches('/')
        )
    }
}

/// Presentation defaults for a [`Dashboard`](crate::Dashboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Player whose matches "mine only" views show.
    pub current_user: Option<String>,
    pub page_size: usize,
    pub last_matches: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            current_user: None,
            page_size: DEFAULT_PAGE_SIZE,
            last_matches: DEFAULT_LAST_MATCHES,
        }
    }
}

impl DashboardConfig {
    pub fn with_current_user(mut self, player: impl Into<String>) -> Self {
        self.current_user = Some(player.into());
        self
    }

    pub fn with_page_size(mut self, rows: usize) -> Self {
        self.page_size = rows;
        self
    }

    pub fn with_last_matches(mut self, count: usize) -> Self {
        self.last_matches = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_url() {
        let root = FeedConfig::default().with_database_url("https://league.example.com/");
        assert_eq!(root.snapshot_url(), "https://league.example.com/.json");

        let nested = root.with_path("/seasons/2024/");
        assert_eq!(
            nested.snapshot_url(),
            "https://league.example.com/seasons/2024.json"
        );
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let config = FeedConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        let config = FeedConfig {
            poll_interval_secs: 0,
            ..FeedConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"current_user":"Bartek"}"#).unwrap();
        assert_eq!(config.current_user.as_deref(), Some("Bartek"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let feed: FeedConfig = serde_json::from_str(r#"{"path":"matches"}"#).unwrap();
        assert_eq!(feed.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(feed.poll_interval(), Duration::from_secs(5));
    }
}
