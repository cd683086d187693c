//! The station-adjacency graph.

use std::collections::HashMap;

use crate::domain::{Edge, Station};

/// Mapping from station to its outgoing edges.
///
/// The graph is symmetric by construction: for every edge u→v on some route
/// there is an edge v→u on the same route with the same time. It is built
/// once by the [`Loader`](super::Loader) and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<Station, Vec<Edge>>,
}

impl Graph {
    pub(crate) fn from_adjacency(adjacency: HashMap<Station, Vec<Edge>>) -> Self {
        Self { adjacency }
    }

    /// Outgoing edges of `station`, in insertion order. Empty if unknown.
    pub fn edges_from(&self, station: &str) -> &[Edge] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true if `station` appears as an endpoint of any edge.
    pub fn contains(&self, station: &str) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Returns the stored key for `station`, if known.
    pub fn station(&self, station: &str) -> Option<&Station> {
        self.adjacency.get_key_value(station).map(|(key, _)| key)
    }

    /// All stations, sorted by name.
    pub fn stations(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = self.adjacency.keys().collect();
        stations.sort();
        stations
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges (twice the number of loaded records).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns true if the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterate over every station with its outgoing edges.
    pub fn iter(&self) -> impl Iterator<Item = (&Station, &[Edge])> {
        self.adjacency
            .iter()
            .map(|(station, edges)| (station, edges.as_slice()))
    }
}
