//! Reading match records from the realtime database.

mod client;
mod live;
mod raw;

pub use client::*;
pub use live::*;
pub use raw::*;
