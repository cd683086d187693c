//! Station name type.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A station name.
///
/// Stations have no separate numeric identifier: the name is the identity.
/// Names are stored trimmed and are never empty. Cloning is cheap, and a
/// `Station` borrows as `str` so maps keyed by `Station` can be queried with
/// plain string slices.
///
/// # Examples
///
/// ```
/// use rail_network::domain::Station;
///
/// let benton = Station::parse("  Benton ").unwrap();
/// assert_eq!(benton.as_str(), "Benton");
///
/// // Blank names are rejected
/// assert!(Station::parse("").is_err());
/// assert!(Station::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Station(Arc<str>);

impl Station {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStation {
                reason: "must not be blank",
            });
        }
        Ok(Station(Arc::from(trimmed)))
    }

    /// Returns the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Station {
    type Error = InvalidStation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Station::parse(&value)
    }
}

impl Borrow<str> for Station {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.as_str())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
