//! Shortest-path journey search.
//!
//! Dijkstra's algorithm over (station, arriving route) states. The priority
//! of a frontier entry is its cumulative travel time plus one interchange
//! penalty per route-code change. Ties are broken by insertion order, so two
//! entries are never compared by their paths.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use super::alternatives::find_alternatives;
use super::config::PlannerConfig;
use super::rank::{deduplicate, rank_alternatives};
use crate::domain::{Journey, Leg, Minutes, RouteCode, Station};
use crate::network::Graph;

/// Why no journey was found.
///
/// [`Planner::shortest_path`] collapses both cases into `None`; use
/// [`Planner::shortest_path_checked`] when the caller needs to tell them
/// apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoPath {
    /// The station does not appear in the graph
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Both stations are known but not connected
    #[error("no route from {from} to {to}")]
    Unreachable { from: Station, to: Station },
}

/// Frontier entry for Dijkstra's search.
#[derive(Debug)]
struct Frontier {
    cost: Minutes,
    /// Insertion counter; lower means pushed earlier.
    seq: u64,
    station: Station,
    legs: Vec<Leg>,
    last_route: Option<RouteCode>,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

// BinaryHeap is a max-heap: flip both keys so the cheapest, oldest entry pops first.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Journey planner over a loaded graph.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a PlannerConfig) -> Self {
        Self { graph, config }
    }

    /// Cheapest journey from `from` to `to`.
    ///
    /// Returns a zero-length journey when `from == to`, and `None` when either
    /// station is unknown or the two are not connected.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Journey> {
        self.shortest_path_checked(from, to).ok()
    }

    /// Cheapest journey from `from` to `to`, reporting why none exists.
    pub fn shortest_path_checked(&self, from: &str, to: &str) -> Result<Journey, NoPath> {
        let unknown = |name: &str| NoPath::UnknownStation(name.to_string());

        if from == to {
            let station = match self.graph.station(from) {
                Some(known) => known.clone(),
                None => Station::parse(from).map_err(|_| unknown(from))?,
            };
            return Ok(Journey::stationary(station));
        }

        let start = self.graph.station(from).ok_or_else(|| unknown(from))?.clone();
        let goal = self.graph.station(to).ok_or_else(|| unknown(to))?.clone();

        let penalty = self.config.interchange_penalty();
        // The cost of leaving a station depends on the route it was reached
        // on, so a station is settled once per arriving route.
        let mut settled: HashMap<(Station, Option<RouteCode>), Minutes> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut popped = 0usize;

        heap.push(Frontier {
            cost: Minutes::ZERO,
            seq,
            station: start.clone(),
            legs: Vec::new(),
            last_route: None,
        });

        while let Some(entry) = heap.pop() {
            popped += 1;

            let state = (entry.station.clone(), entry.last_route.clone());
            if let Some(best) = settled.get(&state) {
                if entry.cost >= *best {
                    continue;
                }
            }
            settled.insert(state, entry.cost);

            if entry.station == goal {
                debug!(
                    from = %start,
                    to = %goal,
                    cost = entry.cost.as_f64(),
                    popped,
                    "Shortest path found"
                );
                return Journey::from_legs(start.clone(), entry.legs, penalty).map_err(|_| {
                    NoPath::Unreachable {
                        from: start,
                        to: goal,
                    }
                });
            }

            for edge in self.graph.edges_from(entry.station.as_str()) {
                if settled.contains_key(&(edge.to.clone(), Some(edge.route.clone()))) {
                    continue;
                }

                let changes_route = matches!(&entry.last_route, Some(route) if *route != edge.route);
                let mut cost = entry.cost + edge.time;
                if changes_route {
                    cost += penalty;
                }

                let mut legs = entry.legs.clone();
                legs.push(Leg::along(&entry.station, edge));

                seq += 1;
                heap.push(Frontier {
                    cost,
                    seq,
                    station: edge.to.clone(),
                    legs,
                    last_route: Some(edge.route.clone()),
                });
            }

            trace!(station = %entry.station, frontier = heap.len(), "Expanded station");
        }

        debug!(from = %start, to = %goal, popped, "No path between known stations");
        Err(NoPath::Unreachable {
            from: start,
            to: goal,
        })
    }

    /// Up to [`MAX_ALTERNATIVES`](super::MAX_ALTERNATIVES) itineraries from
    /// `from` to `to`, fewest transfers first, then shortest travel time.
    ///
    /// This is a best-effort enumeration bounded by the configured transfer
    /// limit and the fixed search caps; it is not guaranteed to contain the
    /// globally best set of alternatives.
    pub fn alternatives(&self, from: &str, to: &str) -> Vec<Journey> {
        let result = find_alternatives(self.graph, from, to, self.config);
        let mut journeys = rank_alternatives(deduplicate(result.journeys));
        journeys.truncate(super::MAX_ALTERNATIVES);
        journeys
    }
}
