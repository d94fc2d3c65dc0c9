//! Shared types, error enum, and code normalization for airport-core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors produced by airport-core.
#[derive(Debug, Error)]
pub enum AirportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid airport record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AirportError>;

// ---------------------------------------------------------------------------
// Airport record
// ---------------------------------------------------------------------------

/// Length of an IATA location identifier.
pub const IATA_LEN: usize = 3;

/// Length of an ICAO location indicator.
pub const ICAO_LEN: usize = 4;

/// A known airport. Records are loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(rename = "IATA")]
    pub iata: String,
    #[serde(rename = "ICAO")]
    pub icao: String,
    pub name: String,
    /// Popularity rank; higher is more prominent.
    pub tier: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_ft: Option<i32>,
}

impl Airport {
    /// Build a record with only the searchable fields set.
    pub fn new(iata: &str, icao: &str, name: &str, tier: u32) -> Self {
        Airport {
            iata: iata.to_string(),
            icao: icao.to_string(),
            name: name.to_string(),
            tier,
            city: None,
            country: None,
            lat: None,
            lon: None,
            elevation_ft: None,
        }
    }

    /// Check the record's identity fields. Returns a reason on failure.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".into());
        }
        if !is_code(&self.iata, IATA_LEN) {
            return Err(format!("IATA code {:?} is not {IATA_LEN} alphanumerics", self.iata));
        }
        if !is_code(&self.icao, ICAO_LEN) {
            return Err(format!("ICAO code {:?} is not {ICAO_LEN} alphanumerics", self.icao));
        }
        Ok(())
    }
}

fn is_code(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Fold a code, name, or query into its comparison form.
///
/// Every identifier comparison in the crate goes through here.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive identifier equality.
pub fn codes_eq(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Query length in characters, as used by the code-match length gates.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_eq_ignores_case() {
        assert!(codes_eq("SFO", "sfo"));
        assert!(codes_eq("kSfO", "KSFO"));
        assert!(!codes_eq("SFO", "SJC"));
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize("ZÜRICH"), "zürich");
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("sfo"), 3);
        assert_eq!(char_len("zür"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_validate_ok() {
        let apt = Airport::new("SFO", "KSFO", "San Francisco International", 9);
        assert!(apt.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_iata() {
        let apt = Airport::new("SF", "KSFO", "San Francisco International", 9);
        let err = apt.validate().unwrap_err();
        assert!(err.contains("IATA"));
    }

    #[test]
    fn test_validate_bad_icao() {
        let apt = Airport::new("SFO", "KSF-", "San Francisco International", 9);
        let err = apt.validate().unwrap_err();
        assert!(err.contains("ICAO"));
    }

    #[test]
    fn test_validate_empty_name() {
        let apt = Airport::new("SFO", "KSFO", "  ", 9);
        assert_eq!(apt.validate().unwrap_err(), "name is empty");
    }

    #[test]
    fn test_serde_field_names() {
        let apt = Airport::new("SFO", "KSFO", "San Francisco International", 9);
        let json = serde_json::to_value(&apt).unwrap();
        assert_eq!(json["IATA"], "SFO");
        assert_eq!(json["ICAO"], "KSFO");
        assert_eq!(json["tier"], 9);
        assert!(json.get("lat").is_none());
    }

    #[test]
    fn test_deserialize_passthrough_fields() {
        let apt: Airport = serde_json::from_str(
            r#"{"IATA":"AVL","ICAO":"KAVL","name":"Asheville Regional","tier":2,"lat":35.4362,"elevation_ft":2165}"#,
        )
        .unwrap();
        assert_eq!(apt.lat, Some(35.4362));
        assert_eq!(apt.elevation_ft, Some(2165));
        assert!(apt.city.is_none());
    }
}
