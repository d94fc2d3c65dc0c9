//! airport-core: Airport dataset and ranked search.
//!
//! No async, no I/O beyond loading files at start-up. This crate is the
//! shared core used by `airport-server` (JSON API + CLI).

pub mod config;
pub mod dataset;
pub mod search;
pub mod types;

// Re-export commonly used types at crate root
pub use dataset::{Dataset, DatasetStats};
pub use search::{search, SearchKey, MAX_RESULTS};
pub use types::*;
