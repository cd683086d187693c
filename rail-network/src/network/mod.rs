//! Station-adjacency graph: loading and structural queries.
//!
//! The [`Loader`] turns edge records into a [`Graph`]; the graph then answers
//! point queries (operators, lines, neighbours, direct services) without any
//! further mutation.

mod error;
mod graph;
mod loader;
mod query;

pub use error::LoadError;
pub use graph::Graph;
pub use loader::{InvalidRecordPolicy, LoadedNetwork, Loader, LoaderConfig, SkippedRecord};
pub use query::{LineEdge, OperatorEdge, StationInfo, MAJOR_HUB_MIN_LINES};
