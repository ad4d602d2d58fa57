mod match_record;
mod match_row;
mod player;
mod query;
mod roster;
mod standings;

pub use match_record::*;
pub use match_row::*;
pub use player::*;
pub use query::*;
pub use roster::*;
pub use standings::*;
