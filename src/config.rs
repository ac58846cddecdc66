//! Configuration Module
//!
//! Tunables for a [`PathStore`](crate::store::PathStore). There is no
//! environment lookup; hosts that keep settings in files deserialize a
//! `StoreConfig` with serde and hand it to `PathStore::with_config`.

use serde::{Deserialize, Serialize};

/// Default path separator.
pub const DEFAULT_DELIMITER: char = '.';

/// Store configuration parameters.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Character separating path segments. Keys containing it literally are
    /// only reachable as exact top-level keys; pick another delimiter if that
    /// matters.
    pub delimiter: char,
    /// Upper bound on memoized paths, `None` for unbounded, `Some(0)` to
    /// disable memoization
    pub cache_capacity: Option<usize>,
}

impl StoreConfig {
    /// Returns a config using `delimiter` as the path separator.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Bounds the lookup cache to `capacity` paths with LRU eviction.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Turns memoization off; every compound read walks the items.
    pub fn without_cache(self) -> Self {
        self.with_cache_capacity(0)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            cache_capacity: None,
        }
    }
}
