//! Structural queries over the network graph.
//!
//! Every query is total: an unknown station yields an empty result (or
//! `None` for [`Graph::station_info`]), never an error.

use std::collections::{BTreeSet, HashSet};

use super::Graph;
use crate::domain::{Edge, Minutes, RouteCode, Station};

/// A station served by more than this many route codes is a major hub.
pub const MAJOR_HUB_MIN_LINES: usize = 10;

/// Aggregate facts about one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationInfo {
    pub name: Station,
    pub operators: BTreeSet<String>,
    pub lines: BTreeSet<RouteCode>,
    pub connections: BTreeSet<Station>,
    /// More than [`MAJOR_HUB_MIN_LINES`] route codes call here
    pub is_major_hub: bool,
}

impl StationInfo {
    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

/// An unordered station pair run by a given operator.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorEdge {
    pub from: Station,
    pub to: Station,
    pub route: RouteCode,
    pub time: Minutes,
    pub service_type: String,
}

/// An unordered station pair on a given route code.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEdge {
    pub from: Station,
    pub to: Station,
    pub operator: String,
    pub time: Minutes,
    pub service_type: String,
}

impl Graph {
    /// Operators with at least one edge touching `station`. Edges without an
    /// operator name are not counted.
    pub fn operators_at(&self, station: &str) -> BTreeSet<String> {
        self.edges_from(station)
            .iter()
            .filter(|edge| !edge.operator.is_empty())
            .map(|edge| edge.operator.clone())
            .collect()
    }

    /// Route codes with at least one edge touching `station`.
    pub fn lines_at(&self, station: &str) -> BTreeSet<RouteCode> {
        self.edges_from(station)
            .iter()
            .map(|edge| edge.route.clone())
            .collect()
    }

    /// Every edge from `a` straight to `b`. Empty when `a == b`.
    pub fn direct_services(&self, a: &str, b: &str) -> Vec<&Edge> {
        if a == b {
            return Vec::new();
        }
        self.edges_from(a)
            .iter()
            .filter(|edge| edge.to.as_str() == b)
            .collect()
    }

    /// Stations one edge away from `station`.
    pub fn connections(&self, station: &str) -> BTreeSet<Station> {
        self.edges_from(station)
            .iter()
            .map(|edge| edge.to.clone())
            .collect()
    }

    /// Stations adjacent to both `a` and `b`.
    ///
    /// This is a heuristic interchange candidate: nothing checks that a
    /// change is actually possible there.
    pub fn common_neighbors(&self, a: &str, b: &str) -> BTreeSet<Station> {
        let of_a = self.connections(a);
        let of_b = self.connections(b);
        of_a.intersection(&of_b).cloned().collect()
    }

    /// Counts and hub flag for `station`, or `None` if unknown.
    pub fn station_info(&self, station: &str) -> Option<StationInfo> {
        let name = self.station(station)?.clone();
        let lines = self.lines_at(station);
        Some(StationInfo {
            name,
            operators: self.operators_at(station),
            is_major_hub: lines.len() > MAJOR_HUB_MIN_LINES,
            lines,
            connections: self.connections(station),
        })
    }

    /// Unique station pairs run by `operator`, either direction counted once.
    pub fn edges_for_operator(&self, operator: &str) -> Vec<OperatorEdge> {
        self.unique_pairs(|edge| edge.operator == operator)
            .into_iter()
            .map(|(from, edge)| OperatorEdge {
                from: from.clone(),
                to: edge.to.clone(),
                route: edge.route.clone(),
                time: edge.time,
                service_type: edge.service_type.clone(),
            })
            .collect()
    }

    /// Unique station pairs on route `line`, either direction counted once.
    pub fn edges_for_line(&self, line: &str) -> Vec<LineEdge> {
        self.unique_pairs(|edge| edge.route.as_str() == line)
            .into_iter()
            .map(|(from, edge)| LineEdge {
                from: from.clone(),
                to: edge.to.clone(),
                operator: edge.operator.clone(),
                time: edge.time,
                service_type: edge.service_type.clone(),
            })
            .collect()
    }

    /// Case-insensitive station search.
    ///
    /// Tries an exact match first, then substring matches, then names
    /// containing every word of the query. Results are sorted.
    pub fn search_stations(&self, query: &str) -> Vec<&Station> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let stations = self.stations();
        let lowered: Vec<(String, &Station)> = stations
            .into_iter()
            .map(|s| (s.as_str().to_lowercase(), s))
            .collect();

        let exact: Vec<&Station> = lowered
            .iter()
            .filter(|(name, _)| *name == query)
            .map(|(_, s)| *s)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let contains: Vec<&Station> = lowered
            .iter()
            .filter(|(name, _)| name.contains(&query))
            .map(|(_, s)| *s)
            .collect();
        if !contains.is_empty() {
            return contains;
        }

        let words: Vec<&str> = query.split_whitespace().collect();
        lowered
            .iter()
            .filter(|(name, _)| words.iter().all(|w| name.contains(w)))
            .map(|(_, s)| *s)
            .collect()
    }

    /// First edge per unordered station pair matching `keep`, in sorted
    /// station order so results are stable.
    fn unique_pairs<F>(&self, keep: F) -> Vec<(&Station, &Edge)>
    where
        F: Fn(&Edge) -> bool,
    {
        let mut seen: HashSet<(&Station, &Station)> = HashSet::new();
        let mut pairs = Vec::new();

        for from in self.stations() {
            for edge in self.edges_from(from.as_str()) {
                if !keep(edge) {
                    continue;
                }
                let key = if from <= &edge.to {
                    (from, &edge.to)
                } else {
                    (&edge.to, from)
                };
                if seen.insert(key) {
                    pairs.push((from, edge));
                }
            }
        }

        pairs
    }
}
