//! Standings and statistics for a 2-vs-2 football video game league.
//!
//! Match records are read from a realtime database ([`FeedClient`],
//! [`spawn_poller`]) and turned into player and team standings, match
//! tables and per-player statistics ([`Dashboard`], [`engine`]).

mod dashboard;
mod error;
#[cfg(test)]
mod fixtures;

pub mod config;
pub mod engine;
pub mod feed;
pub mod model;

pub use config::{DashboardConfig, FeedConfig};
pub use dashboard::Dashboard;
pub use error::{LeagueError, Result};
pub use feed::{
    parse_snapshot, parse_snapshot_in, spawn_poller, FeedClient, Snapshot, SnapshotSource,
};
pub use model::*;
