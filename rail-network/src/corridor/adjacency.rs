//! Physical station adjacency and hop-count paths.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::dataset::Dataset;
use crate::domain::Station;

/// Where an adjacency set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencySource {
    /// The dataset's explicit `connections` table
    Connections,
    /// Consecutive stops of every in-service route
    StopLists,
}

/// Undirected station adjacency modelling physical track.
///
/// Neighbour sets are ordered so traversal, and therefore every path
/// returned, is deterministic.
#[derive(Debug, Clone)]
pub struct StationAdjacency {
    neighbours: HashMap<Station, BTreeSet<Station>>,
    source: AdjacencySource,
}

impl StationAdjacency {
    /// Build adjacency from explicit connections if the dataset has any,
    /// otherwise from route stop lists.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut adjacency = Self {
            neighbours: HashMap::new(),
            source: AdjacencySource::Connections,
        };

        for (station, links) in &dataset.connections {
            for link in links {
                let Some(to) = link.to_station.as_deref() else {
                    continue;
                };
                if let Ok(to) = Station::parse(to) {
                    adjacency.link(station.clone(), to);
                }
            }
        }

        if adjacency.neighbours.is_empty() {
            adjacency.source = AdjacencySource::StopLists;
            for (_, route) in dataset.active_routes() {
                for pair in route.stations.windows(2) {
                    adjacency.link(pair[0].clone(), pair[1].clone());
                }
            }
        }

        adjacency
    }

    fn link(&mut self, a: Station, b: Station) {
        self.neighbours
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.neighbours.entry(b).or_default().insert(a);
    }

    /// Which table this adjacency was built from.
    pub fn source(&self) -> AdjacencySource {
        self.source
    }

    /// Returns true if `station` has any neighbour.
    pub fn contains(&self, station: &str) -> bool {
        self.neighbours.contains_key(station)
    }

    /// Neighbours of `station`, sorted. Empty if unknown.
    pub fn neighbours(&self, station: &str) -> impl Iterator<Item = &Station> {
        self.neighbours.get(station).into_iter().flatten()
    }

    /// Number of stations with at least one neighbour.
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns true if there are no adjacencies.
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Fewest-hops path from `start` to `end`, both ends included.
    ///
    /// Breadth-first with a FIFO frontier and a visited set, so the first
    /// path to reach `end` has the minimum hop count and the search always
    /// terminates. `start == end` gives `[start]`; unknown stations or
    /// disconnected pairs give `None`.
    pub fn shortest_station_path(&self, start: &str, end: &str) -> Option<Vec<Station>> {
        if start == end {
            return Station::parse(start).ok().map(|s| vec![s]);
        }
        let (start, _) = self.neighbours.get_key_value(start)?;
        if !self.contains(end) {
            return None;
        }

        let mut visited: HashSet<&Station> = HashSet::from([start]);
        let mut parents: HashMap<&Station, &Station> = HashMap::new();
        let mut queue: VecDeque<&Station> = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current.as_str() == end {
                let mut path = vec![current.clone()];
                let mut cursor = current;
                while let Some(parent) = parents.get(cursor) {
                    path.push((*parent).clone());
                    cursor = *parent;
                }
                path.reverse();
                return Some(path);
            }

            for next in self.neighbours(current.as_str()) {
                if visited.insert(next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        None
    }
}
