//! Planner configuration and search caps.

use crate::domain::Minutes;

/// Longest path, in stations, the alternatives search will extend.
pub const MAX_PATH_STATIONS: usize = 15;

/// Most itineraries returned by the alternatives search.
pub const MAX_ALTERNATIVES: usize = 100;

/// The alternatives search stops once it has collected more than this many paths.
pub const MAX_COLLECTED_PATHS: usize = 1000;

/// The alternatives search stops after popping this many frontier states.
pub const MAX_EXPLORED_STATES: usize = 200_000;

/// Branches slower than this multiple of the best time found with as few or
/// fewer transfers are pruned.
pub const PRUNE_FACTOR: f64 = 1.5;

/// Configuration parameters for journey planning.
///
/// The search caps above are fixed so results are reproducible; only the
/// interchange penalty and transfer limit are tunable.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Cost charged for each route-code change (minutes).
    pub interchange_penalty_mins: f64,

    /// Maximum number of transfers explored by the alternatives search.
    pub max_transfers: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(interchange_penalty_mins: f64, max_transfers: usize) -> Self {
        Self {
            interchange_penalty_mins,
            max_transfers,
        }
    }

    /// Returns the interchange penalty; invalid values count as zero.
    pub fn interchange_penalty(&self) -> Minutes {
        Minutes::new(self.interchange_penalty_mins).unwrap_or(Minutes::ZERO)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            interchange_penalty_mins: 4.0,
            max_transfers: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.interchange_penalty_mins, 4.0);
        assert_eq!(config.max_transfers, 2);
        assert_eq!(config.interchange_penalty(), Minutes::new(4.0).unwrap());
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(0.0, 5);

        assert_eq!(config.interchange_penalty(), Minutes::ZERO);
        assert_eq!(config.max_transfers, 5);
    }

    #[test]
    fn negative_penalty_is_zero() {
        let config = PlannerConfig::new(-3.0, 1);
        assert_eq!(config.interchange_penalty(), Minutes::ZERO);
    }
}
