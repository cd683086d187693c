//! Domain error types.
//!
//! These errors describe malformed input data. None of them is used for
//! "no data" outcomes: an unknown station or route is an empty result, not
//! an error.

use super::{InvalidRouteCode, InvalidStation, Station};

/// A field or record in a dataset could not be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Travel time is not a non-negative number of minutes
    #[error("invalid travel time: {value:?}")]
    InvalidTravelTime { value: String },

    /// Station name failed validation
    #[error(transparent)]
    Station(#[from] InvalidStation),

    /// Route code failed validation
    #[error(transparent)]
    RouteCode(#[from] InvalidRouteCode),

    /// The record as a whole could not be read
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

/// A journey could not be assembled from the given legs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JourneyError {
    /// Consecutive legs do not share a station
    #[error("legs do not connect: {0} then {1}")]
    LegsNotConnected(Station, Station),

    /// First leg does not start at the journey origin
    #[error("first leg starts at {found}, expected {expected}")]
    WrongOrigin { expected: Station, found: Station },
}
