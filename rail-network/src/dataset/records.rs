//! Tabular edge records.

use std::collections::HashSet;

use serde::Deserialize;

use super::Dataset;
use crate::domain::{Edge, Minutes, ParseError, RouteCode, Station};

/// One row of the edge table.
///
/// Columns: `operator, line, from_station, to_station, travel_time_min,
/// service_type, route_origin, route_destination`. The last three may be
/// missing. Fields are kept as text here and validated by
/// [`EdgeRecord::validate`], so one bad row never poisons the whole table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub operator: String,
    pub line: String,
    pub from_station: String,
    pub to_station: String,
    pub travel_time_min: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub route_origin: String,
    #[serde(default)]
    pub route_destination: String,
}

impl EdgeRecord {
    /// Validate the record, returning the departure station and the
    /// forward edge.
    pub fn validate(&self) -> Result<(Station, Edge), ParseError> {
        let from = Station::parse(&self.from_station)?;
        let to = Station::parse(&self.to_station)?;
        let route = RouteCode::parse(&self.line)?;
        let time = Minutes::parse(&self.travel_time_min)?;

        let edge = Edge {
            to,
            route,
            operator: self.operator.trim().to_string(),
            service_type: self.service_type.trim().to_string(),
            time,
            route_origin: Station::parse(&self.route_origin).ok(),
            route_destination: Station::parse(&self.route_destination).ok(),
        };

        Ok((from, edge))
    }
}

/// Flatten the route table into edge records.
///
/// Each in-service route with at least two stops yields one record per
/// consecutive stop pair, skipping pairs it has already produced in either
/// order. The route's total time is split evenly across its segments. A
/// total that cannot be parsed is passed through verbatim so the loader
/// reports it against the offending records.
pub fn edge_records(dataset: &Dataset) -> Vec<EdgeRecord> {
    let mut records = Vec::new();

    for (code, route) in dataset.active_routes() {
        let segments = route.segment_count();
        if segments == 0 {
            continue;
        }

        let segment_time = match route.total_time() {
            Ok(total) => total.split_evenly(segments).as_f64().to_string(),
            Err(_) => route
                .travel_time
                .preferred()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };
        let label = |station: Option<&Station>| {
            station.map(|s| s.as_str().to_string()).unwrap_or_default()
        };

        let mut seen: HashSet<(&Station, &Station)> = HashSet::new();
        for pair in route.stations.windows(2) {
            let key = if pair[0] <= pair[1] {
                (&pair[0], &pair[1])
            } else {
                (&pair[1], &pair[0])
            };
            if !seen.insert(key) {
                continue;
            }

            records.push(EdgeRecord {
                operator: route.operator.clone(),
                line: code.as_str().to_string(),
                from_station: pair[0].as_str().to_string(),
                to_station: pair[1].as_str().to_string(),
                travel_time_min: segment_time.clone(),
                service_type: route.route_type.clone(),
                route_origin: label(route.origin()),
                route_destination: label(route.destination()),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Route, TravelTime};

    fn station(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    fn record(from: &str, to: &str, time: &str) -> EdgeRecord {
        EdgeRecord {
            operator: "Metro".into(),
            line: "R001".into(),
            from_station: from.into(),
            to_station: to.into(),
            travel_time_min: time.into(),
            ..EdgeRecord::default()
        }
    }

    fn dataset(routes: Vec<(&str, Route)>) -> Dataset {
        Dataset {
            routes: routes
                .into_iter()
                .map(|(code, route)| (RouteCode::parse(code).unwrap(), route))
                .collect(),
            ..Dataset::default()
        }
    }

    #[test]
    fn validate_good_record() {
        let (from, edge) = record("Benton", "Newry", "6.5").validate().unwrap();

        assert_eq!(from, station("Benton"));
        assert_eq!(edge.to, station("Newry"));
        assert_eq!(edge.route.as_str(), "R001");
        assert_eq!(edge.time, Minutes::new(6.5).unwrap());
        assert_eq!(edge.route_origin, None);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(matches!(
            record("Benton", "Newry", "n/a").validate(),
            Err(ParseError::InvalidTravelTime { .. })
        ));
        assert!(matches!(
            record("", "Newry", "5").validate(),
            Err(ParseError::Station(_))
        ));
        let mut no_line = record("Benton", "Newry", "5");
        no_line.line = String::new();
        assert!(matches!(no_line.validate(), Err(ParseError::RouteCode(_))));
    }

    #[test]
    fn uniform_segment_time() {
        let route = Route::new(
            "Metro",
            "Stopper",
            vec![station("A"), station("B"), station("C"), station("D")],
        )
        .with_travel_time(TravelTime::Text("12 minutes".into()));
        let records = edge_records(&dataset(vec![("R1", route)]));

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.travel_time_min == "4"));
        assert_eq!(records[0].route_origin, "A");
        assert_eq!(records[0].route_destination, "D");
    }

    #[test]
    fn removed_and_short_routes_skipped() {
        let removed = Route::new("Metro", "REMOVED", vec![station("A"), station("B")]);
        let single = Route::new("Metro", "Stopper", vec![station("A")]);
        let records = edge_records(&dataset(vec![("R1", removed), ("R2", single)]));

        assert!(records.is_empty());
    }

    #[test]
    fn repeated_pairs_emitted_once() {
        let shuttle = Route::new(
            "Metro",
            "Shuttle",
            vec![station("A"), station("B"), station("A")],
        );
        let records = edge_records(&dataset(vec![("R1", shuttle)]));

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn unparseable_total_passed_through() {
        let route = Route::new("Metro", "Stopper", vec![station("A"), station("B")])
            .with_travel_time(TravelTime::Text("varies".into()));
        let records = edge_records(&dataset(vec![("R1", route)]));

        assert_eq!(records[0].travel_time_min, "varies");
        assert!(records[0].validate().is_err());
    }
}
