//! Merge Module
//!
//! Coercion of heterogeneous sources into a root container, and the shallow
//! and recursive merge strategies.

use serde_json::{Map, Value};

use crate::store::node;

// == Coerce ==
/// Turns any value into a valid root container.
///
/// Objects and arrays pass through, `null` becomes an empty object and any
/// other scalar is wrapped as a single-element array.
pub fn coerce(value: Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => value,
        Value::Null => Value::Object(Map::new()),
        scalar => Value::Array(vec![scalar]),
    }
}

// == Shallow ==
/// Replaces each top-level entry of `target` named in `source` wholesale.
pub fn shallow(target: &mut Value, source: Value) {
    for (key, value) in node::into_entries(source) {
        *node::slot(target, &key) = value;
    }
}

// == Recursive ==
/// Combines containers key by key; any other pairing lets `source` win.
///
/// Keys only present in `target` survive at every depth.
pub fn recursive(target: &mut Value, source: Value) {
    for (key, value) in node::into_entries(source) {
        let slot = node::slot(target, &key);
        if node::is_container(slot) && node::is_container(&value) {
            recursive(slot, value);
        } else {
            *slot = value;
        }
    }
}
