use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::dataset::{Dataset, Price, Route, TravelTimes};
use crate::domain::{RouteCode, Station};

use super::adjacency::StationAdjacency;

/// Stations physically between two consecutive stops of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCorridor {
    pub from: Station,
    pub to: Station,
    /// `from`, then every station passed through, then `to`
    pub stations: Vec<Station>,
    /// Routes that place each passed-through station inside this segment
    pub served_by: BTreeMap<Station, Vec<RouteCode>>,
}

impl SegmentCorridor {
    /// Stations passed through without stopping.
    pub fn intermediates(&self) -> &[Station] {
        match self.stations.len() {
            0..=2 => &[],
            n => &self.stations[1..n - 1],
        }
    }
}

/// A route's stops set against the full corridor it runs along.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCorridor {
    pub route_code: RouteCode,
    pub operator: String,
    pub route_type: String,
    pub origin: Option<Station>,
    pub destination: Option<Station>,
    pub price: Option<Price>,
    pub travel_time: TravelTimes,
    /// Scheduled stops, in order
    pub stops: Vec<Station>,
    /// Every station the service passes, stops included, without repeats
    pub corridor: Vec<Station>,
    /// Corridor stations that are not stops, in corridor order
    pub skipped: Vec<Station>,
    pub segments: Vec<SegmentCorridor>,
}

impl RouteCorridor {
    /// Returns true if the service calls everywhere it passes.
    pub fn is_all_stations(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Returns true if the service passes through `station` without stopping.
    pub fn skips(&self, station: &str) -> bool {
        self.skipped.iter().any(|s| s.as_str() == station)
    }
}

/// Skipped-station overlap between two services.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorComparison {
    pub first: RouteCode,
    pub second: RouteCode,
    pub common_skipped: BTreeSet<Station>,
    pub only_first: BTreeSet<Station>,
    pub only_second: BTreeSet<Station>,
}

/// Computes corridors against a shared dataset.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rail_network::corridor::CorridorCalculator;
/// use rail_network::dataset::Dataset;
///
/// let dataset = Dataset::from_json_str(r#"{
///     "routes": {
///         "X": {"operator": "Metro", "route_type": "Stopper", "stations": ["A", "B", "C", "D"]},
///         "Y": {"operator": "Metro", "route_type": "Express", "stations": ["A", "D"]}
///     }
/// }"#).unwrap();
/// let calculator = CorridorCalculator::new(Arc::new(dataset));
///
/// let express = calculator.corridor("Y").unwrap();
/// let skipped: Vec<&str> = express.skipped.iter().map(|s| s.as_str()).collect();
/// assert_eq!(skipped, vec!["B", "C"]);
/// ```
#[derive(Debug, Clone)]
pub struct CorridorCalculator {
    dataset: Arc<Dataset>,
    adjacency: StationAdjacency,
}

impl CorridorCalculator {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let adjacency = StationAdjacency::from_dataset(&dataset);
        debug!(
            stations = adjacency.len(),
            source = ?adjacency.source(),
            "Built station adjacency"
        );
        Self { dataset, adjacency }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn adjacency(&self) -> &StationAdjacency {
        &self.adjacency
    }

    /// Fewest-hops physical path; see [`StationAdjacency::shortest_station_path`].
    pub fn shortest_station_path(&self, start: &str, end: &str) -> Option<Vec<Station>> {
        self.adjacency.shortest_station_path(start, end)
    }

    /// Corridor of the route with `code`, or `None` if there is no such route.
    ///
    /// Each segment between consecutive stops collects the stations that every
    /// other in-service route places strictly between the same two stops
    /// (first occurrences, in the same direction). Longer contributions are
    /// merged first; a station not yet placed goes straight after the nearest
    /// preceding station of its contributing route that is already placed.
    /// Stations the route itself stops at are never treated as passed
    /// through, so stops stay a subsequence of the corridor.
    pub fn corridor(&self, code: &str) -> Option<RouteCorridor> {
        let (route_code, route) = self.dataset.routes.get_key_value(code)?;
        let stops = route.stations.clone();

        if stops.len() < 2 {
            return Some(self.assemble(route_code, route, stops.clone(), stops, Vec::new()));
        }

        let stop_set: HashSet<&Station> = stops.iter().collect();
        let segments: Vec<SegmentCorridor> = stops
            .windows(2)
            .map(|pair| self.segment(route_code, &pair[0], &pair[1], &stop_set))
            .collect();

        let mut seen = HashSet::new();
        let corridor: Vec<Station> = segments
            .iter()
            .flat_map(|segment| segment.stations.iter())
            .filter(|station| seen.insert(*station))
            .cloned()
            .collect();

        Some(self.assemble(route_code, route, stops, corridor, segments))
    }

    fn assemble(
        &self,
        route_code: &RouteCode,
        route: &Route,
        stops: Vec<Station>,
        corridor: Vec<Station>,
        segments: Vec<SegmentCorridor>,
    ) -> RouteCorridor {
        let stop_set: HashSet<&Station> = stops.iter().collect();
        let skipped: Vec<Station> = corridor
            .iter()
            .filter(|station| !stop_set.contains(station))
            .cloned()
            .collect();

        debug!(
            route = %route_code,
            stops = stops.len(),
            corridor = corridor.len(),
            skipped = skipped.len(),
            "Computed route corridor"
        );

        RouteCorridor {
            route_code: route_code.clone(),
            operator: route.operator.clone(),
            route_type: route.route_type.clone(),
            origin: route.origin().cloned(),
            destination: route.destination().cloned(),
            price: route.price.clone(),
            travel_time: route.travel_time.clone(),
            stops,
            corridor,
            skipped,
            segments,
        }
    }

    fn segment(
        &self,
        target: &RouteCode,
        from: &Station,
        to: &Station,
        stops: &HashSet<&Station>,
    ) -> SegmentCorridor {
        let mut contributions: Vec<(&RouteCode, &[Station])> = self
            .dataset
            .routes
            .iter()
            .filter(|(code, route)| *code == target || !route.is_removed())
            .filter_map(|(code, route)| {
                route
                    .slice_between(from.as_str(), to.as_str())
                    .map(|slice| (code, slice))
            })
            .collect();
        // Stable, so equal lengths keep route-code order.
        contributions.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let mut stations = vec![from.clone()];
        if to != from {
            stations.push(to.clone());
        }
        let mut served_by: BTreeMap<Station, Vec<RouteCode>> = BTreeMap::new();

        for (code, slice) in contributions {
            let mut anchor = 0;
            for station in &slice[1..slice.len() - 1] {
                if stops.contains(station) {
                    continue;
                }
                match stations.iter().position(|s| s == station) {
                    Some(index) => anchor = index,
                    None => {
                        anchor += 1;
                        stations.insert(anchor, station.clone());
                    }
                }
                let codes = served_by.entry(station.clone()).or_default();
                if !codes.contains(code) {
                    codes.push(code.clone());
                }
            }
        }

        trace!(
            from = %from,
            to = %to,
            passed = stations.len().saturating_sub(2),
            "Merged segment corridor"
        );

        SegmentCorridor {
            from: from.clone(),
            to: to.clone(),
            stations,
            served_by,
        }
    }

    /// Stations the route passes through without stopping.
    pub fn skipped_stations(&self, code: &str) -> Option<Vec<Station>> {
        self.corridor(code).map(|corridor| corridor.skipped)
    }

    /// Compare the skipped stations of two routes.
    pub fn compare(&self, first: &str, second: &str) -> Option<CorridorComparison> {
        let a = self.corridor(first)?;
        let b = self.corridor(second)?;
        let skipped_a: BTreeSet<Station> = a.skipped.into_iter().collect();
        let skipped_b: BTreeSet<Station> = b.skipped.into_iter().collect();

        Some(CorridorComparison {
            common_skipped: skipped_a.intersection(&skipped_b).cloned().collect(),
            only_first: skipped_a.difference(&skipped_b).cloned().collect(),
            only_second: skipped_b.difference(&skipped_a).cloned().collect(),
            first: a.route_code,
            second: b.route_code,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn pool() -> Vec<String> {
        (0..10).map(|i| format!("S{i}")).collect()
    }

    fn stop_list() -> impl Strategy<Value = Vec<String>> {
        (Just(pool()).prop_shuffle(), 0usize..8).prop_map(|(stations, n)| stations[..n].to_vec())
    }

    fn calculator(lists: &[Vec<String>]) -> CorridorCalculator {
        let routes = lists
            .iter()
            .enumerate()
            .map(|(i, stops)| {
                let stations = stops.iter().map(|s| Station::parse(s).unwrap()).collect();
                (
                    RouteCode::parse(&format!("R{i}")).unwrap(),
                    Route::new("Metro", "Stopper", stations),
                )
            })
            .collect();
        CorridorCalculator::new(Arc::new(Dataset {
            routes,
            ..Dataset::default()
        }))
    }

    proptest! {
        #[test]
        fn stops_are_a_subsequence_and_skips_are_disjoint(
            lists in prop::collection::vec(stop_list(), 1..6)
        ) {
            let calc = calculator(&lists);
            for code in calc.dataset().routes.keys() {
                let corridor = calc.corridor(code.as_str()).unwrap();

                let mut positions = corridor.stops.iter().map(|stop| {
                    corridor.corridor.iter().position(|s| s == stop)
                });
                let mut last = None;
                for position in positions.by_ref() {
                    prop_assert!(position.is_some());
                    prop_assert!(last < position);
                    last = position;
                }

                for skipped in &corridor.skipped {
                    prop_assert!(!corridor.stops.contains(skipped));
                    prop_assert!(corridor.corridor.contains(skipped));
                }
                prop_assert_eq!(
                    corridor.corridor.len(),
                    corridor.stops.len() + corridor.skipped.len()
                );
            }
        }

        #[test]
        fn station_paths_are_minimal_walks(
            lists in prop::collection::vec(stop_list(), 1..6),
            a in 0usize..10,
            b in 0usize..10,
        ) {
            let calc = calculator(&lists);
            let (a, b) = (format!("S{a}"), format!("S{b}"));
            if let Some(path) = calc.shortest_station_path(&a, &b) {
                prop_assert_eq!(path.first().map(Station::as_str), Some(a.as_str()));
                prop_assert_eq!(path.last().map(Station::as_str), Some(b.as_str()));
                for pair in path.windows(2) {
                    prop_assert!(calc.adjacency().neighbours(pair[0].as_str()).any(|n| n == &pair[1]));
                }
                let reverse = calc.shortest_station_path(&b, &a).unwrap();
                prop_assert_eq!(reverse.len(), path.len());
            }
        }
    }
}
