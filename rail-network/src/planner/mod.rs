//! Journey planning over the network graph.
//!
//! Two searches are offered. [`Planner::shortest_path`] runs Dijkstra's
//! algorithm with a fixed penalty per interchange and returns the single
//! cheapest journey. [`Planner::alternatives`] runs a bounded breadth-first
//! enumeration that trades completeness for a predictable running time and
//! returns up to [`MAX_ALTERNATIVES`] itineraries ranked by interchanges
//! then travel time.

mod alternatives;
mod config;
mod rank;
mod search;

pub use alternatives::{AlternativesResult, find_alternatives};
pub use config::{
    MAX_ALTERNATIVES, MAX_COLLECTED_PATHS, MAX_EXPLORED_STATES, MAX_PATH_STATIONS,
    PRUNE_FACTOR, PlannerConfig,
};
pub use rank::{deduplicate, rank_alternatives};
pub use search::{NoPath, Planner};
