//! Path Store Module
//!
//! Nested items addressed by delimited paths, with a flat memo of resolved
//! compound paths in front of them.
//!
//! Two rules govern every operation:
//! - An exact top-level key always wins over path traversal, for reads and
//!   for writes, even when the key contains the delimiter.
//! - `get` never answers from the memo with anything a fresh walk of the
//!   items would not produce. Mutations drop or refresh the affected memo
//!   entries before returning.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::store::json::{self, JsonOptions};
use crate::store::{merge, node, path, CacheStats, Iter, PathCache};

// == Path Store ==
/// Nested key-value container with dot-path addressing.
#[derive(Debug, Clone)]
pub struct PathStore {
    /// Root container, always an object or an array
    items: Value,
    /// Memo of compound paths resolved by `get` or written by `set`
    cache: PathCache,
    config: StoreConfig,
}

impl PathStore {
    // == Constructors ==
    /// Creates an empty store with the default config.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given config.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            items: Value::Object(Map::new()),
            cache: PathCache::new(config.cache_capacity),
            config,
        }
    }

    /// Replaces the items of a fresh store with `source`, coerced to a
    /// container.
    pub fn hydrate(mut self, source: impl Into<Value>) -> Self {
        self.items = merge::coerce(source.into());
        self.cache.clear();
        self
    }

    /// Builds a store from any serializable record, using its field names as
    /// top-level keys.
    pub fn from_serialize<T: Serialize + ?Sized>(source: &T) -> Result<Self> {
        let value = serde_json::to_value(source).map_err(StoreError::Encoding)?;
        Ok(Self::new().hydrate(value))
    }

    /// Copies the items and config of `other`; the lookup cache starts empty.
    pub fn from_store(other: &PathStore) -> Self {
        Self::with_config(other.config.clone()).hydrate(other.items.clone())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // == Has ==
    /// Returns true if `key` names an existing top-level entry or a path that
    /// resolves through nested containers.
    pub fn has(&self, key: &str) -> bool {
        if self.cache.contains(key) || node::child(&self.items, key).is_some() {
            return true;
        }
        node::resolve(&self.items, path::segments(key, self.config.delimiter)).is_some()
    }

    // == Get ==
    /// Returns the value at `key`, memoizing compound paths on success.
    pub fn get(&mut self, key: &str) -> Option<&Value> {
        if let Some(value) = node::child(&self.items, key) {
            return Some(value);
        }
        if self.cache.contains(key) {
            return self.cache.get(key);
        }

        let delimiter = self.config.delimiter;
        if !path::is_compound(key, delimiter) {
            return None;
        }

        self.cache.record_miss();
        if !self.cache.is_enabled() {
            return node::resolve(&self.items, path::segments(key, delimiter));
        }
        let resolved = node::resolve(&self.items, path::segments(key, delimiter))?.clone();
        self.cache.insert(key.to_string(), resolved);
        self.cache.peek(key)
    }

    /// Returns the value at `key`, or `default` when nothing resolves.
    pub fn get_or<'a>(&'a mut self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Deserializes the value at `key` into `T`.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Resolves `key` by walking the items, without consulting or filling the
    /// cache.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        node::child(&self.items, key)
            .or_else(|| node::resolve(&self.items, path::segments(key, self.config.delimiter)))
    }

    // == Set ==
    /// Writes `value` at `key`, creating intermediate objects as needed.
    ///
    /// Non-container values found along the path are replaced by objects.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        let delimiter = self.config.delimiter;
        let memo = self.cache.is_enabled().then(|| value.clone());

        if node::child(&self.items, key).is_some() || !path::is_compound(key, delimiter) {
            *node::slot(&mut self.items, key) = value;
        } else {
            let segments: Vec<&str> = path::segments(key, delimiter).collect();
            *node::vivify(&mut self.items, &segments) = value;
        }

        self.cache.invalidate(key, delimiter);
        if let Some(memo) = memo {
            self.cache.insert(key.to_string(), memo);
        }
        trace!("set '{}'", key);
        self
    }

    // == Remove ==
    /// Deletes the exact top-level `key` and the entry its path resolves to.
    ///
    /// Missing intermediates make the nested part a no-op. Removing an array
    /// element shifts the elements after it.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        let delimiter = self.config.delimiter;

        let root_is_array = self.items.is_array();
        let removed_top = node::remove_child(&mut self.items, key).is_some();

        let mut shifted_parent = None;
        if let Some((parent_path, last)) = path::split_last(key, delimiter) {
            let parent = node::resolve_mut(&mut self.items, path::segments(parent_path, delimiter));
            if let Some(parent) = parent {
                let parent_is_array = parent.is_array();
                if node::remove_child(parent, last).is_some() && parent_is_array {
                    shifted_parent = Some(parent_path);
                }
            }
        }

        if removed_top && root_is_array {
            let dropped = self.cache.clear();
            trace!("root index shift after removing '{}' dropped {} cached paths", key, dropped);
        } else {
            if let Some(parent_path) = shifted_parent {
                self.cache.invalidate(parent_path, delimiter);
            }
            self.cache.invalidate(key, delimiter);
        }
        self
    }

    // == Merge ==
    /// Merges `source` into the items and drops the whole cache.
    ///
    /// A shallow merge replaces top-level entries wholesale; a recursive one
    /// combines nested containers and keeps keys only present here.
    pub fn merge(&mut self, source: impl Into<Value>, recursive: bool) -> &mut Self {
        let source = merge::coerce(source.into());
        if recursive {
            merge::recursive(&mut self.items, source);
        } else {
            merge::shallow(&mut self.items, source);
        }

        let dropped = self.cache.clear();
        debug!(
            "merge (recursive={}) dropped {} cached paths",
            recursive, dropped
        );
        self
    }

    /// Shorthand for `merge(source, true)`.
    pub fn merge_recursive(&mut self, source: impl Into<Value>) -> &mut Self {
        self.merge(source, true)
    }

    /// Merges a serializable record, using its field names as keys.
    pub fn merge_serialize<T: Serialize + ?Sized>(
        &mut self,
        source: &T,
        recursive: bool,
    ) -> Result<&mut Self> {
        let value = serde_json::to_value(source).map_err(StoreError::Encoding)?;
        Ok(self.merge(value, recursive))
    }

    // == Create From ==
    /// Builds a new store around the value at `key`.
    ///
    /// A `null` value yields an empty store. The new store shares this
    /// store's config.
    pub fn create_from(&self, key: &str) -> Result<PathStore> {
        if !self.has(key) {
            return Err(StoreError::KeyNotFound(key.to_string()));
        }
        let value = self.lookup(key).cloned().unwrap_or(Value::Null);
        Ok(Self::with_config(self.config.clone()).hydrate(value))
    }

    // == Clear ==
    /// Empties the items and the cache.
    pub fn clear(&mut self) -> &mut Self {
        self.items = Value::Object(Map::new());
        let dropped = self.cache.clear();
        debug!("store cleared, dropped {} cached paths", dropped);
        self
    }

    // == Counting ==
    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        node::len(&self.items).unwrap_or(0)
    }

    /// Number of direct children of the container at `key`.
    pub fn count_at(&self, key: &str) -> Result<usize> {
        self.lookup(key)
            .and_then(node::len)
            .ok_or_else(|| StoreError::NotCountable(key.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Structural Access ==
    /// Iterates the top-level entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.items)
    }

    /// Borrows the whole nested structure.
    pub fn items(&self) -> &Value {
        &self.items
    }

    pub fn into_items(self) -> Value {
        self.items
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // == JSON ==
    /// Renders the value at `key`, or the whole store, as JSON.
    ///
    /// A key that does not resolve renders as `null`.
    pub fn to_json(&self, key: Option<&str>, options: JsonOptions) -> Result<String> {
        match key {
            Some(key) => json::render(self.lookup(key).unwrap_or(&Value::Null), options),
            None => json::render(&self.items, options),
        }
    }

    // == Index Support ==
    /// Slot for `key`, created as `null` if missing. The returned reference
    /// can rewrite anything beneath it, so the whole cache is dropped first.
    pub(crate) fn slot_mut(&mut self, key: &str) -> &mut Value {
        self.cache.clear();
        let delimiter = self.config.delimiter;
        if node::child(&self.items, key).is_some() || !path::is_compound(key, delimiter) {
            return node::slot(&mut self.items, key);
        }
        let segments: Vec<&str> = path::segments(key, delimiter).collect();
        node::vivify(&mut self.items, &segments)
    }
}

impl Default for PathStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PathStore {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

// == Conversions ==
impl From<Value> for PathStore {
    fn from(value: Value) -> Self {
        Self::new().hydrate(value)
    }
}

impl From<Map<String, Value>> for PathStore {
    fn from(map: Map<String, Value>) -> Self {
        Self::new().hydrate(Value::Object(map))
    }
}

impl From<PathStore> for Value {
    fn from(store: PathStore) -> Self {
        store.items
    }
}

impl From<&PathStore> for Value {
    fn from(store: &PathStore) -> Self {
        store.items.clone()
    }
}

impl<K, V> FromIterator<(K, V)> for PathStore
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map: Map<String, Value> = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::from(map)
    }
}

impl<'a> IntoIterator for &'a PathStore {
    type Item = <Iter<'a> as Iterator>::Item;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// == Serde ==
impl Serialize for PathStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(PathStore::from)
    }
}

impl fmt::Display for PathStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items)
    }
}
