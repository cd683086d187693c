//! Static network datasets.
//!
//! Two externally produced artifacts feed the engine: the route table (JSON,
//! keyed by route code) and the flat edge table (CSV, one row per station
//! pair per route). Both are read once and never refreshed.

mod error;
mod records;
mod route;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{ParseError, RouteCode, Station};

pub use error::DatasetError;
pub use records::{EdgeRecord, edge_records};
pub use route::{Price, Route, TravelTime, TravelTimes};

/// One physical-adjacency entry of the optional `connections` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectionRecord {
    /// Adjacent station; blank entries are ignored
    #[serde(default)]
    pub to_station: Option<String>,
}

/// Precomputed per-station summary produced by an external indexer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationIndexEntry {
    /// Route codes calling at the station
    #[serde(default)]
    pub routes: Vec<RouteCode>,
    /// Stations reachable without changing, used as interchange candidates
    #[serde(default)]
    pub interchanges: Vec<Station>,
    /// Number of adjacent stations
    #[serde(default)]
    pub connections: usize,
}

/// Which table of the route-table file an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetTable {
    Stations,
    Routes,
    Connections,
    StationIndex,
}

impl fmt::Display for DatasetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatasetTable::Stations => "stations",
            DatasetTable::Routes => "routes",
            DatasetTable::Connections => "connections",
            DatasetTable::StationIndex => "station_index",
        })
    }
}

/// An entry dropped while reading the route table.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub table: DatasetTable,
    /// Map key, or list position for the `stations` table
    pub key: String,
    pub error: ParseError,
}

/// The file as written, before per-entry validation.
#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    stations: Vec<String>,
    #[serde(default)]
    routes: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    connections: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    station_index: BTreeMap<String, serde_json::Value>,
}

/// The route-table dataset.
///
/// Unknown top-level keys are ignored, so richer exports load unchanged.
/// Entries that fail validation are dropped individually and listed in
/// [`Dataset::skipped`]; only a file that is not a JSON object of tables
/// fails as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Every station name, in publication order
    pub stations: Vec<Station>,

    /// Routes keyed by route code
    pub routes: BTreeMap<RouteCode, Route>,

    /// Optional explicit physical adjacency
    pub connections: BTreeMap<Station, Vec<ConnectionRecord>>,

    /// Optional precomputed station index
    pub station_index: BTreeMap<Station, StationIndexEntry>,

    /// Entries dropped during parsing
    pub skipped: Vec<SkippedEntry>,
}

impl Dataset {
    /// Parse a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        let mut dataset = Dataset::default();

        for (position, name) in raw.stations.iter().enumerate() {
            match Station::parse(name) {
                Ok(station) => dataset.stations.push(station),
                Err(e) => dataset.skip(DatasetTable::Stations, position.to_string(), e.into()),
            }
        }

        for (key, value) in raw.routes {
            match parse_entry::<Route, _, _>(&key, value, RouteCode::parse) {
                Ok((code, route)) => {
                    dataset.routes.insert(code, route);
                }
                Err(e) => dataset.skip(DatasetTable::Routes, key, e),
            }
        }

        for (key, value) in raw.connections {
            match parse_entry::<Vec<ConnectionRecord>, _, _>(&key, value, Station::parse) {
                Ok((station, links)) => {
                    dataset.connections.insert(station, links);
                }
                Err(e) => dataset.skip(DatasetTable::Connections, key, e),
            }
        }

        for (key, value) in raw.station_index {
            match parse_entry::<StationIndexEntry, _, _>(&key, value, Station::parse) {
                Ok((station, entry)) => {
                    dataset.station_index.insert(station, entry);
                }
                Err(e) => dataset.skip(DatasetTable::StationIndex, key, e),
            }
        }

        debug!(
            stations = dataset.stations.len(),
            routes = dataset.routes.len(),
            skipped = dataset.skipped.len(),
            "Parsed route table"
        );
        Ok(dataset)
    }

    fn skip(&mut self, table: DatasetTable, key: String, error: ParseError) {
        warn!(%table, key = %key, error = %error, "Skipping invalid dataset entry");
        self.skipped.push(SkippedEntry { table, key, error });
    }

    /// Read and parse a dataset from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Look up a route by code.
    pub fn route(&self, code: &str) -> Option<&Route> {
        self.routes.get(code)
    }

    /// Iterate over routes that are still in service.
    pub fn active_routes(&self) -> impl Iterator<Item = (&RouteCode, &Route)> {
        self.routes.iter().filter(|(_, route)| !route.is_removed())
    }
}

/// Validate one keyed entry: the key with `parse_key`, the value by serde.
fn parse_entry<T, K, E>(
    key: &str,
    value: serde_json::Value,
    parse_key: fn(&str) -> Result<K, E>,
) -> Result<(K, T), ParseError>
where
    T: serde::de::DeserializeOwned,
    E: Into<ParseError>,
{
    let key = parse_key(key).map_err(Into::into)?;
    let value = serde_json::from_value(value)
        .map_err(|e| ParseError::MalformedRecord(e.to_string()))?;
    Ok((key, value))
}
