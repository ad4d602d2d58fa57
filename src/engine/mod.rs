//! Pure aggregation over match records.
//!
//! Every function here is synchronous and deterministic, takes the current
//! list of matches by reference and returns freshly built views. Callers
//! re-run them whenever the feed delivers a new snapshot.

mod listing;
mod match_rows;
mod player_stats;
mod profile;
mod query;
mod standings;

pub use listing::*;
pub use match_rows::*;
pub use player_stats::*;
pub use profile::*;
pub use query::*;
pub use standings::*;
