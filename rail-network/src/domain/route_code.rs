//! Route code type.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Error returned when parsing an invalid route code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route code: {reason}")]
pub struct InvalidRouteCode {
    reason: &'static str,
}

/// A route (service) code such as `R045`.
///
/// Codes identify one scheduled service pattern run by one operator. Any
/// non-blank string without inner whitespace is accepted, since datasets use
/// more than one numbering scheme.
///
/// # Examples
///
/// ```
/// use rail_network::domain::RouteCode;
///
/// let code = RouteCode::parse("R045").unwrap();
/// assert_eq!(code.as_str(), "R045");
///
/// assert!(RouteCode::parse("").is_err());
/// assert!(RouteCode::parse("R0 45").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct RouteCode(Arc<str>);

impl RouteCode {
    /// Parse a route code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteCode> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidRouteCode {
                reason: "must not be blank",
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidRouteCode {
                reason: "must not contain whitespace",
            });
        }
        Ok(RouteCode(Arc::from(trimmed)))
    }

    /// Returns the route code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteCode {
    type Error = InvalidRouteCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RouteCode::parse(&value)
    }
}

impl Borrow<str> for RouteCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteCode({})", self.as_str())
    }
}

impl fmt::Display for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
