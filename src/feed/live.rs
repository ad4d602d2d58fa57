use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use super::client::FeedClient;
use crate::error::Result;
use crate::model::MatchRecord;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Full set of matches known at one point in time.
///
/// `version` grows by one each time the records change; version 0 is the
/// empty snapshot seen before the first successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub version: u64,
    pub matches: Arc<Vec<MatchRecord>>,
}

impl Snapshot {
    pub fn new(version: u64, matches: Vec<MatchRecord>) -> Self {
        Self {
            version,
            matches: Arc::new(matches),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Anything that can produce the current list of matches.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Vec<MatchRecord>>> + Send;
}

impl SnapshotSource for FeedClient {
    fn fetch(&self) -> impl Future<Output = Result<Vec<MatchRecord>>> + Send {
        self.fetch_snapshot()
    }
}

/// Poll `source` every `every` and publish changed snapshots.
///
/// The first fetch happens immediately. A failed fetch keeps the last
/// published snapshot. The task ends once every receiver is dropped.
#[instrument(skip(source))]
pub fn spawn_poller<S: SnapshotSource>(
    source: S,
    every: Duration,
) -> (watch::Receiver<Snapshot>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(Snapshot::default());
    let handle = tokio::spawn(async move {
        let mut ticker = interval(every.max(MIN_POLL_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tx.closed() => break,
            }
            match source.fetch().await {
                Ok(matches) => publish(&tx, matches),
                Err(e) => warn!(error = %e, "match feed unavailable, keeping last snapshot"),
            }
        }
        info!("match feed poller stopped");
    });
    (rx, handle)
}

fn publish(tx: &watch::Sender<Snapshot>, matches: Vec<MatchRecord>) {
    tx.send_if_modified(|current| {
        if current.version > 0 && *current.matches == matches {
            return false;
        }
        current.version += 1;
        current.matches = Arc::new(matches);
        debug!(
            version = current.version,
            count = current.matches.len(),
            "published match snapshot"
        );
        true
    });
}
