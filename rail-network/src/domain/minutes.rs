//! Travel time in minutes.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::ParseError;

/// A non-negative, finite duration measured in minutes.
///
/// Segment times are often fractional (a 25 minute route with 4 segments
/// gives 6.25 minutes per segment), so the value is an `f64`. Construction
/// rejects NaN, infinities and negative values, which makes the total
/// ordering below sound for use as a priority key.
#[derive(Clone, Copy, Default)]
pub struct Minutes(f64);

impl Minutes {
    /// Zero minutes.
    pub const ZERO: Minutes = Minutes(0.0);

    /// Create a duration from a number of minutes.
    pub fn new(value: f64) -> Result<Self, ParseError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ParseError::InvalidTravelTime {
                value: value.to_string(),
            });
        }
        // Adding zero folds -0.0 into 0.0.
        Ok(Minutes(value + 0.0))
    }

    /// Parse a travel time as written in the datasets.
    ///
    /// Accepts a bare number (`"18"`, `"7.5"`) or a number followed by a
    /// unit (`"18 minutes"`, `"25 mins"`). The first numeric token wins;
    /// a minus sign in front of it is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_network::domain::Minutes;
    ///
    /// assert_eq!(Minutes::parse("18 minutes").unwrap().as_f64(), 18.0);
    /// assert_eq!(Minutes::parse("7.5").unwrap().as_f64(), 7.5);
    /// assert!(Minutes::parse("soon").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidTravelTime {
            value: text.to_string(),
        };

        let start = text.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
        // Keep a leading decimal point (".5 minutes").
        let start = if start > 0 && text.as_bytes()[start - 1] == b'.' {
            start - 1
        } else {
            start
        };
        if text[..start].ends_with('-') {
            return Err(invalid());
        }
        let token: &str = text[start..]
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .next()
            .unwrap_or_default();

        let value: f64 = token.parse().map_err(|_| invalid())?;
        Minutes::new(value).map_err(|_| invalid())
    }

    /// Returns the number of minutes.
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Split this duration evenly across `parts` segments.
    ///
    /// Returns zero when `parts` is zero.
    pub fn split_evenly(self, parts: usize) -> Minutes {
        if parts == 0 {
            return Minutes::ZERO;
        }
        Minutes(self.0 / parts as f64)
    }

    /// Multiply by a count, e.g. one penalty per interchange.
    pub fn times(self, count: usize) -> Minutes {
        Minutes(self.0 * count as f64)
    }

    /// Scale by a non-negative factor. Negative or non-finite factors give zero.
    pub fn scale(self, factor: f64) -> Minutes {
        Minutes::new(self.0 * factor).unwrap_or(Minutes::ZERO)
    }
}

impl PartialEq for Minutes {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Minutes {}

impl PartialOrd for Minutes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Minutes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Self) -> Self::Output {
        Minutes(self.0 + rhs.0)
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Minutes::ZERO, Add::add)
    }
}

impl fmt::Debug for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Minutes({})", self.0)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} minutes", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any whole number of minutes followed by a unit parses to itself
        #[test]
        fn whole_minutes_with_unit(n in 0u32..10_000, unit in "( minutes| mins| min|)") {
            let parsed = Minutes::parse(&format!("{n}{unit}")).unwrap();
            prop_assert_eq!(parsed.as_f64(), f64::from(n));
        }

        /// Parsed values are never negative
        #[test]
        fn never_negative(s in "\\PC{0,12}") {
            if let Ok(m) = Minutes::parse(&s) {
                prop_assert!(m.as_f64() >= 0.0);
            }
        }
    }
}
