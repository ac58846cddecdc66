//! Indexing sugar: `store["a.b"]` reads and writes through paths.

use std::ops::{Index, IndexMut};

use serde_json::Value;

use crate::store::PathStore;

static NULL: Value = Value::Null;

/// Reads never memoize; a missing path reads as `null`.
impl Index<&str> for PathStore {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.lookup(key).unwrap_or(&NULL)
    }
}

/// Creates the path with a `null` leaf when missing, like `serde_json`.
impl IndexMut<&str> for PathStore {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.slot_mut(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_read() {
        let store = PathStore::from(json!({"a": {"b": [10, 20]}}));
        assert_eq!(store["a.b.1"], 20);
        assert_eq!(store["a.missing"], Value::Null);
    }

    #[test]
    fn test_index_write_creates_path() {
        let mut store = PathStore::new();
        store["a.b"] = json!("x");
        assert_eq!(store.items(), &json!({"a": {"b": "x"}}));

        store["a.b"] = json!("y");
        assert_eq!(store["a.b"], "y");
    }

    #[test]
    fn test_index_write_keeps_cache_coherent() {
        let mut store = PathStore::from(json!({"a": {"b": {"c": 1}}}));
        assert_eq!(store.get("a.b.c"), Some(&json!(1)));

        store["a.b"]["c"] = json!(2);
        assert_eq!(store.get("a.b.c"), Some(&json!(2)));
    }
}
