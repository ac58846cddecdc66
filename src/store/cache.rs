//! Lookup Cache Module
//!
//! Flat memo of resolved paths, optionally bounded with least recently used
//! eviction. The cache knows nothing about the items it mirrors; the store
//! decides what to drop after each mutation.

use std::collections::{HashMap, VecDeque};

use serde_json::Value;
use tracing::trace;

use crate::store::path;
use crate::store::CacheStats;

// == Path Cache ==
/// Memo from full path to the value last resolved there.
#[derive(Debug, Clone, Default)]
pub struct PathCache {
    /// Memoized values by full path
    entries: HashMap<String, Value>,
    /// Recency order, front = most recent; only kept when bounded
    order: VecDeque<String>,
    /// Maximum number of memoized paths
    capacity: Option<usize>,
    stats: CacheStats,
}

impl PathCache {
    /// Creates an empty cache. `Some(0)` disables memoization.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Returns false when the cache never stores anything.
    pub fn is_enabled(&self) -> bool {
        self.capacity != Some(0)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    // == Get ==
    /// Returns the memoized value, counting a hit and refreshing its recency.
    pub fn get(&mut self, path: &str) -> Option<&Value> {
        if !self.entries.contains_key(path) {
            return None;
        }
        self.stats.record_hit();
        self.touch(path);
        trace!("lookup cache hit for '{}'", path);
        self.entries.get(path)
    }

    /// Returns the memoized value without touching stats or recency.
    pub fn peek(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    pub fn record_miss(&mut self) {
        self.stats.record_miss();
    }

    // == Insert ==
    /// Memoizes `value` at `path`, evicting the least recently used path when
    /// the bound is reached.
    pub fn insert(&mut self, path: String, value: Value) {
        if !self.is_enabled() {
            return;
        }

        if let Some(capacity) = self.capacity {
            if !self.entries.contains_key(&path) && self.entries.len() >= capacity {
                if let Some(evicted) = self.order.pop_back() {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                    trace!("evicted cached path '{}'", evicted);
                }
            }
        }

        self.touch(&path);
        self.entries.insert(path, value);
        self.stats.set_cached_paths(self.entries.len());
    }

    // == Invalidate ==
    /// Drops every memo for `path`, its ancestors and its descendants.
    ///
    /// Returns the number of paths dropped.
    pub fn invalidate(&mut self, path: &str, delimiter: char) -> usize {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|cached| path::is_related(cached, path, delimiter))
            .cloned()
            .collect();

        for cached in &stale {
            self.entries.remove(cached);
            self.forget(cached);
        }

        if !stale.is_empty() {
            trace!("invalidated {} cached paths around '{}'", stale.len(), path);
        }
        self.stats.record_invalidations(stale.len());
        self.stats.set_cached_paths(self.entries.len());
        stale.len()
    }

    // == Clear ==
    /// Drops every memo. Returns the number of paths dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.record_invalidations(dropped);
        self.stats.set_cached_paths(0);
        dropped
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_cached_paths(self.entries.len());
        stats
    }

    // == Recency ==
    fn touch(&mut self, path: &str) {
        if self.capacity.is_none() {
            return;
        }
        self.forget(path);
        self.order.push_front(path.to_string());
    }

    fn forget(&mut self, path: &str) {
        if self.capacity.is_some() {
            self.order.retain(|p| p != path);
        }
    }
}
