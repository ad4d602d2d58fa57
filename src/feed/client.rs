use tracing::{debug, instrument};

use super::raw::parse_snapshot;
use crate::config::FeedConfig;
use crate::error::{LeagueError, Result};
use crate::model::MatchRecord;

/// Reads match snapshots from a realtime database over its REST interface.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> league_standings::Result<()> {
/// use league_standings::{FeedClient, FeedConfig};
///
/// let client = FeedClient::new(FeedConfig::default().with_database_url("https://league.example.com"));
/// let matches = client.fetch_snapshot().await?;
/// println!("Fetched {} matches", matches.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Use the provided [`reqwest::Client`], e.g. to configure timeouts or proxies.
    pub fn with_client(client: reqwest::Client, config: FeedConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    /// Where this client reads snapshots from.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch every match currently stored. Malformed records are skipped.
    #[instrument(skip(self), fields(url = %self.config.snapshot_url()))]
    pub async fn fetch_snapshot(&self) -> Result<Vec<MatchRecord>> {
        let url = self.config.snapshot_url();
        let body = get_body(&self.http, &url).await?;
        let matches = parse_snapshot(&body)?;
        debug!(count = matches.len(), "fetched match snapshot");
        Ok(matches)
    }
}

async fn get_body(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url, "fetching snapshot");

    let response = client.get(url).send().await.map_err(|e| LeagueError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LeagueError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| LeagueError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}
