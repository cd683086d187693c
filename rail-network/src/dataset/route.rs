//! Route-table entries.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::domain::{Minutes, ParseError, Station};

/// Marker in `route_type` for withdrawn services.
const REMOVED_MARKER: &str = "REMOVED";

/// A travel-time figure as published: integer minutes or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TravelTime {
    /// Numeric minutes
    Minutes(f64),
    /// Text such as "18 minutes"
    Text(String),
}

impl TravelTime {
    /// Parse into a duration.
    pub fn minutes(&self) -> Result<Minutes, ParseError> {
        match self {
            TravelTime::Minutes(value) => Minutes::new(*value),
            TravelTime::Text(text) => Minutes::parse(text),
        }
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelTime::Minutes(value) => write!(f, "{value} minutes"),
            TravelTime::Text(text) => f.write_str(text),
        }
    }
}

/// Travel times for both running directions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TravelTimes {
    #[serde(default)]
    pub up: Option<TravelTime>,
    #[serde(default)]
    pub down: Option<TravelTime>,
}

impl TravelTimes {
    /// The figure used for the whole route: `up`, falling back to `down`.
    pub fn preferred(&self) -> Option<&TravelTime> {
        self.up.as_ref().or(self.down.as_ref())
    }
}

/// A fare as published: text ("Standard fare") or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "{value}"),
            Price::Text(text) => f.write_str(text),
        }
    }
}

/// A scheduled service in the route table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Route {
    /// Operating company
    #[serde(default)]
    pub operator: String,

    /// Service class; contains "REMOVED" for withdrawn services
    #[serde(default)]
    pub route_type: String,

    #[serde(default, deserialize_with = "optional_label")]
    origin: Option<Station>,

    #[serde(default, deserialize_with = "optional_label")]
    destination: Option<Station>,

    /// Published fare
    #[serde(default)]
    pub price: Option<Price>,

    /// Published end-to-end travel times
    #[serde(default)]
    pub travel_time: TravelTimes,

    /// Ordered stop list
    #[serde(default)]
    pub stations: Vec<Station>,
}

/// Origin and destination are display labels; a blank one counts as absent.
fn optional_label<'de, D>(deserializer: D) -> Result<Option<Station>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.and_then(|text| Station::parse(&text).ok()))
}

impl Route {
    /// Create a route from its stop list. Labels default to the end stops.
    pub fn new(operator: &str, route_type: &str, stations: Vec<Station>) -> Self {
        Self {
            operator: operator.to_string(),
            route_type: route_type.to_string(),
            stations,
            ..Self::default()
        }
    }

    /// Set the published travel time for both directions.
    pub fn with_travel_time(mut self, time: TravelTime) -> Self {
        self.travel_time = TravelTimes {
            up: Some(time.clone()),
            down: Some(time),
        };
        self
    }

    /// Returns true if the service has been withdrawn.
    pub fn is_removed(&self) -> bool {
        self.route_type.contains(REMOVED_MARKER)
    }

    /// Origin label, falling back to the first stop.
    pub fn origin(&self) -> Option<&Station> {
        self.origin.as_ref().or(self.stations.first())
    }

    /// Destination label, falling back to the last stop.
    pub fn destination(&self) -> Option<&Station> {
        self.destination.as_ref().or(self.stations.last())
    }

    /// Total travel time; routes without a published figure take zero.
    pub fn total_time(&self) -> Result<Minutes, ParseError> {
        match self.travel_time.preferred() {
            Some(time) => time.minutes(),
            None => Ok(Minutes::ZERO),
        }
    }

    /// Number of segments between consecutive stops.
    pub fn segment_count(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// Index of the first occurrence of `station` in the stop list.
    pub fn position(&self, station: &str) -> Option<usize> {
        self.stations.iter().position(|s| s.as_str() == station)
    }

    /// Stops from `from` to `to` inclusive, if this route calls at `from`
    /// strictly before `to`.
    pub fn slice_between(&self, from: &str, to: &str) -> Option<&[Station]> {
        let start = self.position(from)?;
        let end = self.position(to)?;
        (start < end).then(|| &self.stations[start..=end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    fn route(stops: &[&str]) -> Route {
        Route::new("Metro", "Stopper", stops.iter().map(|s| station(s)).collect())
    }

    #[test]
    fn travel_time_variants() {
        let text: TravelTime = serde_json::from_str("\"18 minutes\"").unwrap();
        let number: TravelTime = serde_json::from_str("13").unwrap();

        assert_eq!(text.minutes().unwrap(), Minutes::new(18.0).unwrap());
        assert_eq!(number.minutes().unwrap(), Minutes::new(13.0).unwrap());
        assert!(TravelTime::Text("unknown".into()).minutes().is_err());
    }

    #[test]
    fn total_time_prefers_up() {
        let mut r = route(&["A", "B"]);
        r.travel_time = TravelTimes {
            up: Some(TravelTime::Minutes(10.0)),
            down: Some(TravelTime::Minutes(12.0)),
        };
        assert_eq!(r.total_time().unwrap(), Minutes::new(10.0).unwrap());

        r.travel_time.up = None;
        assert_eq!(r.total_time().unwrap(), Minutes::new(12.0).unwrap());

        r.travel_time.down = None;
        assert_eq!(r.total_time().unwrap(), Minutes::ZERO);
    }

    #[test]
    fn labels_fall_back_to_end_stops() {
        let r = route(&["A", "B", "C"]);
        assert_eq!(r.origin(), Some(&station("A")));
        assert_eq!(r.destination(), Some(&station("C")));

        let labelled: Route = serde_json::from_str(
            r#"{"operator": "Metro", "origin": "Z", "stations": ["A", "B"]}"#,
        )
        .unwrap();
        assert_eq!(labelled.origin(), Some(&station("Z")));
        assert_eq!(labelled.destination(), Some(&station("B")));
    }

    #[test]
    fn blank_labels_count_as_absent() {
        let r: Route = serde_json::from_str(
            r#"{"origin": " ", "destination": null, "stations": ["A", "B"]}"#,
        )
        .unwrap();
        assert_eq!(r.origin(), Some(&station("A")));
        assert_eq!(r.destination(), Some(&station("B")));
    }

    #[test]
    fn removed_marker() {
        let mut r = route(&["A", "B"]);
        assert!(!r.is_removed());
        r.route_type = "Express (REMOVED)".into();
        assert!(r.is_removed());
    }

    #[test]
    fn slice_between_requires_order() {
        let r = route(&["A", "B", "C", "D"]);
        assert_eq!(
            r.slice_between("B", "D").unwrap(),
            &[station("B"), station("C"), station("D")]
        );
        assert!(r.slice_between("D", "B").is_none());
        assert!(r.slice_between("A", "A").is_none());
        assert!(r.slice_between("A", "X").is_none());
    }

    #[test]
    fn price_variants() {
        let text: Price = serde_json::from_str("\"Standard fare\"").unwrap();
        let amount: Price = serde_json::from_str("4.5").unwrap();
        assert_eq!(text.to_string(), "Standard fare");
        assert_eq!(amount.to_string(), "4.5");
    }
}
