//! Airport dataset — loaded once at start-up, read-only afterwards.
//!
//! Comes from the built-in table or a JSON file holding an array of airport
//! records. Every record is validated on load; nothing mutates the set later,
//! so a `Dataset` can be shared across threads behind a plain `Arc`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::search;
use crate::types::{char_len, codes_eq, Airport, AirportError, Result, IATA_LEN, ICAO_LEN};

// ---------------------------------------------------------------------------
// Built-in airports
// ---------------------------------------------------------------------------

/// (IATA, ICAO, name, tier, city, country, lat, lon, elevation_ft)
type BuiltinRow = (
    &'static str,
    &'static str,
    &'static str,
    u32,
    &'static str,
    &'static str,
    f64,
    f64,
    i32,
);

/// Built-in airports (used when no dataset file is configured).
const BUILTIN_AIRPORTS: &[BuiltinRow] = &[
    ("ATL", "KATL", "Hartsfield-Jackson Atlanta International", 10, "Atlanta", "United States", 33.6367, -84.4281, 1026),
    ("LAX", "KLAX", "Los Angeles International", 10, "Los Angeles", "United States", 33.9425, -118.4081, 125),
    ("ORD", "KORD", "Chicago O'Hare International", 10, "Chicago", "United States", 41.9786, -87.9048, 672),
    ("DFW", "KDFW", "Dallas/Fort Worth International", 10, "Dallas", "United States", 32.8968, -97.0380, 607),
    ("DEN", "KDEN", "Denver International", 9, "Denver", "United States", 39.8617, -104.6731, 5431),
    ("JFK", "KJFK", "John F. Kennedy International", 10, "New York", "United States", 40.6398, -73.7789, 13),
    ("SFO", "KSFO", "San Francisco International", 9, "San Francisco", "United States", 37.6190, -122.3749, 13),
    ("SEA", "KSEA", "Seattle-Tacoma International", 8, "Seattle", "United States", 47.4490, -122.3093, 433),
    ("LAS", "KLAS", "Harry Reid International", 8, "Las Vegas", "United States", 36.0801, -115.1522, 2181),
    ("MCO", "KMCO", "Orlando International", 8, "Orlando", "United States", 28.4294, -81.3090, 96),
    ("CLT", "KCLT", "Charlotte Douglas International", 8, "Charlotte", "United States", 35.2140, -80.9431, 748),
    ("EWR", "KEWR", "Newark Liberty International", 8, "Newark", "United States", 40.6925, -74.1687, 18),
    ("BOS", "KBOS", "Boston Logan International", 7, "Boston", "United States", 42.3643, -71.0052, 20),
    ("MIA", "KMIA", "Miami International", 7, "Miami", "United States", 25.7932, -80.2906, 8),
    ("SAN", "KSAN", "San Diego International", 6, "San Diego", "United States", 32.7336, -117.1897, 17),
    ("SJC", "KSJC", "San Jose Mineta International", 4, "San Jose", "United States", 37.3626, -121.9291, 62),
    ("OAK", "KOAK", "Oakland International", 4, "Oakland", "United States", 37.7213, -122.2208, 9),
    ("AVL", "KAVL", "Asheville Regional", 2, "Asheville", "United States", 35.4362, -82.5418, 2165),
    ("TYS", "KTYS", "Knoxville McGhee Tyson", 2, "Knoxville", "United States", 35.8110, -83.9940, 981),
    ("YYZ", "CYYZ", "Toronto Pearson International", 8, "Toronto", "Canada", 43.6772, -79.6306, 569),
    ("YVR", "CYVR", "Vancouver International", 7, "Vancouver", "Canada", 49.1939, -123.1844, 14),
    ("MEX", "MMMX", "Mexico City International", 8, "Mexico City", "Mexico", 19.4363, -99.0721, 7316),
    ("LHR", "EGLL", "London Heathrow", 10, "London", "United Kingdom", 51.4706, -0.4619, 83),
    ("LGW", "EGKK", "London Gatwick", 7, "London", "United Kingdom", 51.1481, -0.1903, 202),
    ("CDG", "LFPG", "Paris Charles de Gaulle", 10, "Paris", "France", 49.0128, 2.5500, 392),
    ("FRA", "EDDF", "Frankfurt am Main", 9, "Frankfurt", "Germany", 50.0264, 8.5431, 364),
    ("AMS", "EHAM", "Amsterdam Schiphol", 9, "Amsterdam", "Netherlands", 52.3086, 4.7639, -11),
    ("MAD", "LEMD", "Adolfo Suárez Madrid-Barajas", 8, "Madrid", "Spain", 40.4719, -3.5626, 1998),
    ("ZRH", "LSZH", "Zürich", 7, "Zurich", "Switzerland", 47.4647, 8.5492, 1416),
    ("DXB", "OMDB", "Dubai International", 10, "Dubai", "United Arab Emirates", 25.2528, 55.3644, 62),
    ("HND", "RJTT", "Tokyo Haneda", 10, "Tokyo", "Japan", 35.5523, 139.7800, 35),
    ("NRT", "RJAA", "Tokyo Narita International", 8, "Tokyo", "Japan", 35.7647, 140.3864, 141),
    ("SIN", "WSSS", "Singapore Changi", 9, "Singapore", "Singapore", 1.3502, 103.9940, 22),
    ("HKG", "VHHH", "Hong Kong International", 9, "Hong Kong", "China", 22.3089, 113.9146, 28),
    ("SYD", "YSSY", "Sydney Kingsford Smith", 8, "Sydney", "Australia", -33.9461, 151.1772, 21),
    ("GRU", "SBGR", "São Paulo/Guarulhos International", 8, "São Paulo", "Brazil", -23.4356, -46.4731, 2459),
];

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Immutable airport collection.
#[derive(Debug, Clone)]
pub struct Dataset {
    airports: Vec<Airport>,
}

/// Summary counts for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub airports: usize,
    /// Number of airports per tier, keyed by tier.
    pub tiers: BTreeMap<u32, usize>,
}

impl Dataset {
    /// Build from records, rejecting the first invalid one.
    pub fn new(airports: Vec<Airport>) -> Result<Self> {
        for (index, airport) in airports.iter().enumerate() {
            airport
                .validate()
                .map_err(|reason| AirportError::InvalidRecord { index, reason })?;
        }
        Ok(Dataset { airports })
    }

    pub fn builtin() -> Self {
        let airports = BUILTIN_AIRPORTS
            .iter()
            .map(
                |&(iata, icao, name, tier, city, country, lat, lon, elevation_ft)| Airport {
                    city: Some(city.to_string()),
                    country: Some(country.to_string()),
                    lat: Some(lat),
                    lon: Some(lon),
                    elevation_ft: Some(elevation_ft),
                    ..Airport::new(iata, icao, name, tier)
                },
            )
            .collect();
        Dataset { airports }
    }

    /// Parse a JSON array of airport records.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let airports: Vec<Airport> = serde_json::from_str(text)?;
        Dataset::new(airports)
    }

    /// Load a JSON dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Dataset::from_json_str(&text)
    }

    /// Load `path` if given, else fall back to the built-in table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Dataset::load(p),
            None => Ok(Dataset::builtin()),
        }
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Ranked search; see [`search::search`].
    pub fn search(&self, query: &str) -> Vec<&Airport> {
        search::search(&self.airports, query)
    }

    /// Exact code lookup: IATA for 3 chars, ICAO for 4, nothing otherwise.
    pub fn find_by_code(&self, code: &str) -> Option<&Airport> {
        match char_len(code) {
            IATA_LEN => self.airports.iter().find(|a| codes_eq(&a.iata, code)),
            ICAO_LEN => self.airports.iter().find(|a| codes_eq(&a.icao, code)),
            _ => None,
        }
    }

    pub fn stats(&self) -> DatasetStats {
        let mut tiers = BTreeMap::new();
        for airport in &self.airports {
            *tiers.entry(airport.tier).or_insert(0) += 1;
        }
        DatasetStats {
            airports: self.airports.len(),
            tiers,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
