//! Airport search — match by exact code or name substring, rank by tier.
//!
//! Results borrow from the caller's slice, which is never modified.

use crate::types::{char_len, normalize, Airport, IATA_LEN, ICAO_LEN};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of airports returned by one search.
pub const MAX_RESULTS: usize = 10;

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// A query folded once, so matching each record only folds the record side.
#[derive(Debug, Clone)]
pub struct SearchKey {
    key: String,
    len: usize,
}

impl SearchKey {
    pub fn new(query: &str) -> Self {
        SearchKey {
            key: normalize(query),
            len: char_len(query),
        }
    }

    /// Exact IATA match for 3-char queries, exact ICAO match for 4-char ones.
    pub fn is_code_match(&self, airport: &Airport) -> bool {
        match self.len {
            IATA_LEN => normalize(&airport.iata) == self.key,
            ICAO_LEN => normalize(&airport.icao) == self.key,
            _ => false,
        }
    }

    /// Case-insensitive substring of the name. The empty key matches all.
    pub fn is_name_match(&self, airport: &Airport) -> bool {
        normalize(&airport.name).contains(&self.key)
    }

    pub fn matches(&self, airport: &Airport) -> bool {
        self.is_code_match(airport) || self.is_name_match(airport)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Return up to [`MAX_RESULTS`] airports matching `query`, highest tier first.
///
/// Equal tiers keep their relative order in `airports`.
pub fn search<'a>(airports: &'a [Airport], query: &str) -> Vec<&'a Airport> {
    let key = SearchKey::new(query);
    let mut hits: Vec<&Airport> = airports.iter().filter(|a| key.matches(a)).collect();
    // sort_by is stable
    hits.sort_by(|a, b| b.tier.cmp(&a.tier));
    hits.truncate(MAX_RESULTS);
    hits
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
