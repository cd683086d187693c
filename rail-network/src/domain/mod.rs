//! Domain types for the rail network query engine.
//!
//! Every type here is validated at construction time, so graph, planner and
//! corridor code can trust station names, route codes and travel times
//! without re-checking them.

mod edge;
mod error;
mod journey;
mod minutes;
mod route_code;
mod station;

pub use edge::{Edge, Leg};
pub use error::{JourneyError, ParseError};
pub use journey::{Journey, Ride, count_interchanges};
pub use minutes::Minutes;
pub use route_code::{InvalidRouteCode, RouteCode};
pub use station::{InvalidStation, Station};
