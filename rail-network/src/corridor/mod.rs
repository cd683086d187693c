//! Route corridors and skipped stations.
//!
//! A service's stop list says where it calls, not where it runs. The
//! corridor between two consecutive stops is every station that any route
//! places between them, which recovers the stations an express passes
//! through without stopping.

mod adjacency;
mod calculator;

pub use adjacency::{AdjacencySource, StationAdjacency};
pub use calculator::{CorridorCalculator, CorridorComparison, RouteCorridor, SegmentCorridor};
