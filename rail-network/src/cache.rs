//! Caching layer for corridor results.
//!
//! The dataset never changes after loading, so entries never go stale; the
//! capacity bound only keeps memory proportional to the routes actually
//! queried. Unknown route codes are cached as `None` as well.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use crate::corridor::{CorridorCalculator, RouteCorridor};
use crate::domain::{RouteCode, Station};

type CorridorEntry = Option<Arc<RouteCorridor>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached route codes.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn new(max_capacity: u64) -> Self {
        Self { max_capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 1000 }
    }
}

/// Corridor calculator with memoised results.
///
/// Cloning is cheap and clones share the same cache.
#[derive(Clone)]
pub struct CachedCorridors {
    calculator: Arc<CorridorCalculator>,
    corridors: MokaCache<String, CorridorEntry>,
}

impl CachedCorridors {
    /// Create a new cache in front of `calculator`.
    pub fn new(calculator: CorridorCalculator, config: &CacheConfig) -> Self {
        let corridors = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self {
            calculator: Arc::new(calculator),
            corridors,
        }
    }

    /// Corridor for `code`, computed at most once per cached entry.
    pub fn corridor(&self, code: &str) -> Option<Arc<RouteCorridor>> {
        self.corridors.get_with_by_ref(code, || {
            self.calculator.corridor(code).map(Arc::new)
        })
    }

    pub fn skipped_stations(&self, code: &str) -> Option<Vec<Station>> {
        self.corridor(code).map(|corridor| corridor.skipped.clone())
    }

    /// Warm the cache with every route in the dataset.
    pub fn preload(&self) {
        let codes: Vec<RouteCode> = self.calculator.dataset().routes.keys().cloned().collect();
        for code in codes {
            self.corridor(code.as_str());
        }
    }

    /// Access the underlying calculator for uncached queries.
    pub fn calculator(&self) -> &CorridorCalculator {
        &self.calculator
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.corridors.run_pending_tasks();
        self.corridors.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.corridors.invalidate_all();
    }
}
