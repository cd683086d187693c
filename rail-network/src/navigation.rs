//! Journey lookup straight from the route table.
//!
//! Unlike the planner, which searches the edge graph, this answers the
//! questions a passenger asks at a ticket window: which services run from
//! here to there, and failing that, where can I change.

use std::collections::BTreeSet;

use tracing::debug;

use crate::dataset::{Dataset, Price, Route};
use crate::domain::{Minutes, RouteCode, Station};
use crate::network::MAJOR_HUB_MIN_LINES;
use crate::planner::PlannerConfig;

/// A single service calling at the origin and later at the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectRoute {
    pub route_code: RouteCode,
    pub operator: String,
    pub route_type: String,
    pub origin: Station,
    pub destination: Station,
    /// Stops from origin to destination inclusive
    pub stations: Vec<Station>,
    /// Segments travelled
    pub stops: usize,
    /// Share of the route's published time for the segments travelled
    pub travel_time: Minutes,
    pub price: Option<Price>,
    pub route_origin: Option<Station>,
    pub route_destination: Option<Station>,
}

impl DirectRoute {
    fn between(code: &RouteCode, route: &Route, origin: &str, destination: &str) -> Option<Self> {
        let stations = route.slice_between(origin, destination)?;
        let stops = stations.len() - 1;
        let per_segment = route
            .total_time()
            .unwrap_or(Minutes::ZERO)
            .split_evenly(route.segment_count());

        Some(Self {
            route_code: code.clone(),
            operator: route.operator.clone(),
            route_type: route.route_type.clone(),
            origin: stations[0].clone(),
            destination: stations[stops].clone(),
            stations: stations.to_vec(),
            stops,
            travel_time: per_segment.times(stops),
            price: route.price.clone(),
            route_origin: route.origin().cloned(),
            route_destination: route.destination().cloned(),
        })
    }
}

/// Two services with a change between them.
#[derive(Debug, Clone, PartialEq)]
pub struct InterchangeRoute {
    pub interchange_at: Station,
    pub first: DirectRoute,
    pub second: DirectRoute,
    /// Both legs plus the interchange penalty
    pub travel_time: Minutes,
}

impl InterchangeRoute {
    pub fn total_stops(&self) -> usize {
        self.first.stops + self.second.stops
    }

    pub fn route_codes(&self) -> [&RouteCode; 2] {
        [&self.first.route_code, &self.second.route_code]
    }
}

/// Every option between two stations, each list fastest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
    pub direct: Vec<DirectRoute>,
    pub one_interchange: Vec<InterchangeRoute>,
}

impl RouteOptions {
    pub fn has_direct(&self) -> bool {
        !self.direct.is_empty()
    }

    pub fn total_options(&self) -> usize {
        self.direct.len() + self.one_interchange.len()
    }
}

/// Station facts from the precomputed station index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub name: Station,
    pub routes: Vec<RouteCode>,
    pub interchanges: Vec<Station>,
    pub connections: usize,
    pub is_major_hub: bool,
}

impl StationSummary {
    pub fn total_routes(&self) -> usize {
        self.routes.len()
    }
}

/// Route-table lookups over a borrowed dataset.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    dataset: &'a Dataset,
    interchange_penalty: Minutes,
}

impl<'a> Navigator<'a> {
    /// Navigator charging the default interchange penalty.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            interchange_penalty: PlannerConfig::default().interchange_penalty(),
        }
    }

    pub fn with_interchange_penalty(mut self, penalty: Minutes) -> Self {
        self.interchange_penalty = penalty;
        self
    }

    /// In-service routes calling at `station`, using the station index
    /// when it lists the station.
    fn routes_at(&self, station: &str) -> Vec<(&'a RouteCode, &'a Route)> {
        match self.dataset.station_index.get(station) {
            Some(entry) => entry
                .routes
                .iter()
                .filter_map(|code| self.dataset.routes.get_key_value(code.as_str()))
                .filter(|(_, route)| !route.is_removed())
                .collect(),
            None => self
                .dataset
                .active_routes()
                .filter(|(_, route)| route.position(station).is_some())
                .collect(),
        }
    }

    fn is_known(&self, station: &str) -> bool {
        self.dataset.station_index.contains_key(station) || !self.routes_at(station).is_empty()
    }

    /// Services that call at `origin` and later at `destination`.
    pub fn direct_routes(&self, origin: &str, destination: &str) -> Vec<DirectRoute> {
        if origin == destination {
            return Vec::new();
        }
        self.routes_at(origin)
            .into_iter()
            .filter_map(|(code, route)| DirectRoute::between(code, route, origin, destination))
            .collect()
    }

    /// Stations worth changing at when leaving `origin`.
    fn interchange_candidates(&self, origin: &str) -> BTreeSet<Station> {
        if let Some(entry) = self.dataset.station_index.get(origin) {
            return entry.interchanges.iter().cloned().collect();
        }
        self.routes_at(origin)
            .into_iter()
            .filter_map(|(_, route)| {
                let start = route.position(origin)?;
                Some(route.stations[start + 1..].iter().cloned())
            })
            .flatten()
            .collect()
    }

    /// Two-leg journeys changing once between different services.
    pub fn one_interchange_routes(&self, origin: &str, destination: &str) -> Vec<InterchangeRoute> {
        if origin == destination || !self.is_known(origin) || !self.is_known(destination) {
            return Vec::new();
        }

        let mut options = Vec::new();
        for interchange in self.interchange_candidates(origin) {
            if interchange.as_str() == origin || interchange.as_str() == destination {
                continue;
            }
            let first_legs = self.direct_routes(origin, interchange.as_str());
            if first_legs.is_empty() {
                continue;
            }
            let second_legs = self.direct_routes(interchange.as_str(), destination);

            for first in &first_legs {
                for second in &second_legs {
                    if first.route_code == second.route_code {
                        continue;
                    }
                    options.push(InterchangeRoute {
                        interchange_at: interchange.clone(),
                        travel_time: first.travel_time + second.travel_time + self.interchange_penalty,
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }
        options
    }

    /// Direct and one-change options, each sorted by travel time.
    pub fn all_routes(&self, origin: &str, destination: &str) -> RouteOptions {
        let mut direct = self.direct_routes(origin, destination);
        direct.sort_by_key(|route| route.travel_time);

        let mut one_interchange = self.one_interchange_routes(origin, destination);
        one_interchange.sort_by_key(|route| route.travel_time);

        debug!(
            origin,
            destination,
            direct = direct.len(),
            one_interchange = one_interchange.len(),
            "Listed route options"
        );

        RouteOptions {
            direct,
            one_interchange,
        }
    }

    /// Summary from the station index, or `None` if the station isn't indexed.
    pub fn station_summary(&self, station: &str) -> Option<StationSummary> {
        let (name, entry) = self.dataset.station_index.get_key_value(station)?;
        Some(StationSummary {
            name: name.clone(),
            routes: entry.routes.clone(),
            interchanges: entry.interchanges.clone(),
            connections: entry.connections,
            is_major_hub: entry.routes.len() > MAJOR_HUB_MIN_LINES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{StationIndexEntry, TravelTime};

    fn station(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    fn code(s: &str) -> RouteCode {
        RouteCode::parse(s).unwrap()
    }

    fn route(route_type: &str, minutes: f64, stops: &[&str]) -> Route {
        Route::new("Metro", route_type, stops.iter().map(|s| station(s)).collect())
            .with_travel_time(TravelTime::Minutes(minutes))
    }

    fn sample() -> Dataset {
        Dataset {
            routes: [
                ("R1", route("Stopper", 12.0, &["A", "B", "C", "D"])),
                ("R2", route("Express", 5.0, &["A", "D"])),
                ("R3", route("Stopper", 6.0, &["C", "E", "F"])),
                ("R4", route("REMOVED", 1.0, &["A", "F"])),
            ]
            .into_iter()
            .map(|(c, r)| (code(c), r))
            .collect(),
            ..Dataset::default()
        }
    }

    #[test]
    fn direct_routes_respect_direction() {
        let data = sample();
        let nav = Navigator::new(&data);

        let mut codes: Vec<_> = nav
            .direct_routes("A", "D")
            .into_iter()
            .map(|r| r.route_code)
            .collect();
        codes.sort();
        assert_eq!(codes, vec![code("R1"), code("R2")]);

        assert!(nav.direct_routes("D", "A").is_empty());
        assert!(nav.direct_routes("A", "A").is_empty());
        assert!(nav.direct_routes("Nowhere", "A").is_empty());
    }

    #[test]
    fn direct_leg_time_is_share_of_route() {
        let data = sample();
        let nav = Navigator::new(&data);

        let leg = nav
            .direct_routes("B", "D")
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(leg.stops, 2);
        assert_eq!(leg.travel_time, Minutes::new(8.0).unwrap());
        assert_eq!(leg.route_origin, Some(station("A")));
        assert_eq!(leg.stations, vec![station("B"), station("C"), station("D")]);
    }

    #[test]
    fn removed_routes_are_not_offered() {
        let data = sample();
        let nav = Navigator::new(&data);
        assert!(nav.direct_routes("A", "F").is_empty());
    }

    #[test]
    fn one_interchange_changes_service() {
        let data = sample();
        let nav = Navigator::new(&data);

        let options = nav.one_interchange_routes("A", "F");
        assert_eq!(options.len(), 1);
        let option = &options[0];
        assert_eq!(option.interchange_at, station("C"));
        assert_eq!(option.route_codes(), [&code("R1"), &code("R3")]);
        assert_eq!(option.total_stops(), 4);
        // 8 + 6 + 4 minute change
        assert_eq!(option.travel_time, Minutes::new(18.0).unwrap());
    }

    #[test]
    fn all_routes_sorts_by_time() {
        let data = sample();
        let nav = Navigator::new(&data);

        let options = nav.all_routes("A", "D");
        assert!(options.has_direct());
        assert_eq!(options.direct[0].route_code, code("R2"));
        assert_eq!(options.direct[1].route_code, code("R1"));
        assert_eq!(options.total_options(), options.direct.len() + options.one_interchange.len());

        let none = nav.all_routes("A", "Nowhere");
        assert_eq!(none.total_options(), 0);
    }

    #[test]
    fn station_index_drives_lookups() {
        let mut data = sample();
        data.station_index.insert(
            station("A"),
            StationIndexEntry {
                routes: vec![code("R2")],
                interchanges: vec![station("D")],
                connections: 2,
            },
        );
        let nav = Navigator::new(&data);

        let direct: Vec<_> = nav.direct_routes("A", "D").into_iter().map(|r| r.route_code).collect();
        assert_eq!(direct, vec![code("R2")]);

        let summary = nav.station_summary("A").unwrap();
        assert_eq!(summary.total_routes(), 1);
        assert_eq!(summary.connections, 2);
        assert!(!summary.is_major_hub);
        assert!(nav.station_summary("B").is_none());
    }

    #[test]
    fn major_hub_needs_more_than_ten_routes() {
        let mut data = Dataset::default();
        data.station_index.insert(
            station("Hub"),
            StationIndexEntry {
                routes: (0..11).map(|i| code(&format!("R{i}"))).collect(),
                ..StationIndexEntry::default()
            },
        );
        data.station_index.insert(
            station("Almost"),
            StationIndexEntry {
                routes: (0..10).map(|i| code(&format!("R{i}"))).collect(),
                ..StationIndexEntry::default()
            },
        );
        let nav = Navigator::new(&data);

        assert!(nav.station_summary("Hub").unwrap().is_major_hub);
        assert!(!nav.station_summary("Almost").unwrap().is_major_hub);
    }
}
