//! Cache Statistics Module
//!
//! Counters describing how well the lookup cache is serving reads.

use serde::Serialize;

// == Cache Stats ==
/// Lookup cache metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Compound reads answered from the cache
    pub hits: u64,
    /// Compound reads that had to walk the items
    pub misses: u64,
    /// Paths dropped to respect the capacity bound
    pub evictions: u64,
    /// Paths dropped because a mutation made them stale
    pub invalidations: u64,
    /// Paths currently memoized
    pub cached_paths: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any compound read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn set_cached_paths(&mut self, count: usize) {
        self.cached_paths = count;
    }
}
