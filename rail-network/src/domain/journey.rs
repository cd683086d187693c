//! Journey types.
//!
//! A `Journey` is an ordered sequence of legs from an origin to a
//! destination. Interchanges are counted purely by route code: whenever two
//! consecutive legs carry different codes, the traveller is assumed to change
//! trains. A service continuing under a new code therefore counts as an
//! interchange too.

use std::fmt;

use super::{JourneyError, Leg, Minutes, RouteCode, Station};

/// Count route-code changes between consecutive legs.
pub fn count_interchanges(legs: &[Leg]) -> usize {
    legs.windows(2)
        .filter(|pair| pair[0].route != pair[1].route)
        .count()
}

/// A stretch of a journey spent on one route code.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    /// Route code ridden
    pub route: RouteCode,
    /// Operating company
    pub operator: String,
    /// Service class
    pub service_type: String,
    /// Stations passed, boarding and alighting stations included
    pub stations: Vec<Station>,
    /// Time spent on this ride
    pub time: Minutes,
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - The first leg starts at `origin`
/// - Consecutive legs connect (destination of one = origin of next)
/// - `stations` is the origin followed by each leg's destination
/// - A journey with no legs has `origin == destination`
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    origin: Station,
    destination: Station,
    legs: Vec<Leg>,
    stations: Vec<Station>,
    travel_time: Minutes,
    interchanges: usize,
    cost: Minutes,
}

impl Journey {
    /// A journey that goes nowhere: no legs, zero time, zero interchanges.
    pub fn stationary(station: Station) -> Self {
        Self {
            origin: station.clone(),
            destination: station.clone(),
            legs: Vec::new(),
            stations: vec![station],
            travel_time: Minutes::ZERO,
            interchanges: 0,
            cost: Minutes::ZERO,
        }
    }

    /// Constructs a journey from legs.
    ///
    /// The cost is the summed leg time plus `interchange_penalty` for every
    /// route-code change.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the first leg does not leave from `origin` or if
    /// consecutive legs don't connect.
    pub fn from_legs(
        origin: Station,
        legs: Vec<Leg>,
        interchange_penalty: Minutes,
    ) -> Result<Self, JourneyError> {
        let Some(first) = legs.first() else {
            return Ok(Self::stationary(origin));
        };
        if first.from != origin {
            return Err(JourneyError::WrongOrigin {
                expected: origin,
                found: first.from.clone(),
            });
        }

        for pair in legs.windows(2) {
            if pair[0].to != pair[1].from {
                return Err(JourneyError::LegsNotConnected(
                    pair[0].to.clone(),
                    pair[1].from.clone(),
                ));
            }
        }

        let mut stations = Vec::with_capacity(legs.len() + 1);
        stations.push(origin.clone());
        stations.extend(legs.iter().map(|leg| leg.to.clone()));

        let travel_time: Minutes = legs.iter().map(|leg| leg.time).sum();
        let interchanges = count_interchanges(&legs);
        let destination = stations[stations.len() - 1].clone();

        Ok(Self {
            origin,
            destination,
            legs,
            stations,
            travel_time,
            interchanges,
            cost: travel_time + interchange_penalty.times(interchanges),
        })
    }

    /// Returns the origin station.
    pub fn origin(&self) -> &Station {
        &self.origin
    }

    /// Returns the destination station.
    pub fn destination(&self) -> &Station {
        &self.destination
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns every station visited, origin first.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Returns the sum of leg times, without interchange penalties.
    pub fn travel_time(&self) -> Minutes {
        self.travel_time
    }

    /// Returns the number of route-code changes.
    pub fn interchanges(&self) -> usize {
        self.interchanges
    }

    /// Returns travel time plus interchange penalties.
    pub fn cost(&self) -> Minutes {
        self.cost
    }

    /// Returns true if the journey has no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Returns the ordered route codes of each leg.
    pub fn route_codes(&self) -> Vec<RouteCode> {
        self.legs.iter().map(|leg| leg.route.clone()).collect()
    }

    /// Group consecutive legs on the same route code into rides.
    pub fn rides(&self) -> Vec<Ride> {
        let mut rides: Vec<Ride> = Vec::new();

        for leg in &self.legs {
            match rides.last_mut() {
                Some(ride) if ride.route == leg.route => {
                    ride.stations.push(leg.to.clone());
                    ride.time += leg.time;
                }
                _ => rides.push(Ride {
                    route: leg.route.clone(),
                    operator: leg.operator.clone(),
                    service_type: leg.service_type.clone(),
                    stations: vec![leg.from.clone(), leg.to.clone()],
                    time: leg.time,
                }),
            }
        }

        rides
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.interchanges {
            0 => write!(f, "{} (direct)", self.travel_time)?,
            1 => write!(f, "{} (1 transfer)", self.travel_time)?,
            n => write!(f, "{} ({n} transfers)", self.travel_time)?,
        }

        for ride in self.rides() {
            let names: Vec<&str> = ride.stations.iter().map(Station::as_str).collect();
            write!(
                f,
                "\n  {} ({}): {}",
                ride.route,
                ride.operator,
                names.join(" → ")
            )?;
        }

        Ok(())
    }
}
