//! Bounded breadth-first enumeration of alternative itineraries.
//!
//! The graph contains cycles, so exhaustive enumeration is unbounded. This
//! search caps transfers, path length, collected paths and explored states,
//! memoises partial itineraries, and prunes branches that are already much
//! slower than the best time found with as few or fewer transfers.

use std::collections::{BTreeMap, HashSet, VecDeque};

use tracing::debug;

use super::config::{
    MAX_COLLECTED_PATHS, MAX_EXPLORED_STATES, MAX_PATH_STATIONS, PRUNE_FACTOR, PlannerConfig,
};
use crate::domain::{Journey, Leg, Minutes, RouteCode, Station};
use crate::network::Graph;

/// BFS state: a partial itinerary ending at a station.
#[derive(Clone)]
struct AltState {
    station: Station,
    path: Vec<Station>,
    legs: Vec<Leg>,
    transfers: usize,
    time: Minutes,
}

impl AltState {
    fn current_route(&self) -> Option<&RouteCode> {
        self.legs.last().map(|leg| &leg.route)
    }

    /// Memo key: station, per-leg route codes, transfer count.
    fn key(&self) -> (Station, Vec<RouteCode>, usize) {
        (
            self.station.clone(),
            self.legs.iter().map(|leg| leg.route.clone()).collect(),
            self.transfers,
        )
    }
}

/// Result of the alternatives search: unranked journeys and states popped.
pub struct AlternativesResult {
    pub journeys: Vec<Journey>,
    pub states_explored: usize,
}

/// Enumerate itineraries from `from` to `to`.
///
/// Journeys come back in discovery order; rank them with
/// [`rank_alternatives`](super::rank_alternatives). Unknown stations give an
/// empty result. `from == to` gives the single zero-length journey.
pub fn find_alternatives(
    graph: &Graph,
    from: &str,
    to: &str,
    config: &PlannerConfig,
) -> AlternativesResult {
    let mut journeys = Vec::new();
    let mut states_explored = 0;

    let start = match graph.station(from) {
        Some(station) => station.clone(),
        None if from == to => match Station::parse(from) {
            Ok(station) => station,
            Err(_) => {
                return AlternativesResult {
                    journeys,
                    states_explored,
                };
            }
        },
        None => {
            return AlternativesResult {
                journeys,
                states_explored,
            };
        }
    };

    let penalty = config.interchange_penalty();
    let mut visited: HashSet<(Station, Vec<RouteCode>, usize)> = HashSet::new();
    let mut best_time_by_transfers: BTreeMap<usize, Minutes> = BTreeMap::new();

    let mut queue: VecDeque<AltState> = VecDeque::new();
    queue.push_back(AltState {
        station: start.clone(),
        path: vec![start.clone()],
        legs: Vec::new(),
        transfers: 0,
        time: Minutes::ZERO,
    });

    while let Some(state) = queue.pop_front() {
        states_explored += 1;

        // Prune only against itineraries with the same or fewer transfers.
        let too_slow = best_time_by_transfers
            .range(..=state.transfers)
            .any(|(_, best)| state.time > best.scale(PRUNE_FACTOR));
        if too_slow {
            continue;
        }

        if !visited.insert(state.key()) {
            continue;
        }

        if state.station.as_str() == to {
            let best = best_time_by_transfers
                .entry(state.transfers)
                .or_insert(state.time);
            if state.time < *best {
                *best = state.time;
            }
            if let Ok(journey) = Journey::from_legs(start.clone(), state.legs, penalty) {
                journeys.push(journey);
            }
            if journeys.len() > MAX_COLLECTED_PATHS {
                break;
            }
            continue;
        }

        if state.transfers > config.max_transfers || state.path.len() > MAX_PATH_STATIONS {
            continue;
        }

        for edge in graph.edges_from(state.station.as_str()) {
            // No station twice within one itinerary.
            if state.path.contains(&edge.to) {
                continue;
            }

            let mut transfers = state.transfers;
            if state.current_route().is_some_and(|route| *route != edge.route) {
                transfers += 1;
            }
            if transfers > config.max_transfers {
                continue;
            }

            let mut path = state.path.clone();
            path.push(edge.to.clone());
            let mut legs = state.legs.clone();
            legs.push(Leg::along(&state.station, edge));

            queue.push_back(AltState {
                station: edge.to.clone(),
                path,
                legs,
                transfers,
                time: state.time + edge.time,
            });
        }

        if states_explored >= MAX_EXPLORED_STATES {
            debug!(states_explored, "Alternatives search hit exploration cap");
            break;
        }
    }

    debug!(
        from = %start,
        to,
        journeys = journeys.len(),
        states_explored,
        "Alternatives search complete"
    );

    AlternativesResult {
        journeys,
        states_explored,
    }
}
