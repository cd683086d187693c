//! Ranking for alternative itineraries.

use std::collections::HashSet;

use crate::domain::{Journey, RouteCode, Station};

/// Rank journeys by preference.
///
/// Journeys are ranked by:
/// 1. Number of interchanges (fewer is better)
/// 2. Total travel time (shorter is better)
///
/// The sort is stable, so equal journeys keep discovery order.
pub fn rank_alternatives(mut journeys: Vec<Journey>) -> Vec<Journey> {
    journeys.sort_by(|a, b| {
        a.interchanges()
            .cmp(&b.interchanges())
            .then_with(|| a.travel_time().cmp(&b.travel_time()))
    });
    journeys
}

/// Remove journeys with the same station path and route codes.
///
/// Keeps the first occurrence.
pub fn deduplicate(journeys: Vec<Journey>) -> Vec<Journey> {
    let mut seen: HashSet<(Vec<Station>, Vec<RouteCode>)> = HashSet::new();
    journeys
        .into_iter()
        .filter(|journey| seen.insert((journey.stations().to_vec(), journey.route_codes())))
        .collect()
}
