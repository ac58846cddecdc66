//! Node Module
//!
//! Single-level operations on container values. Objects are addressed by key,
//! arrays by canonical decimal index; everything else is a leaf.

use serde_json::{Map, Value};

// == Container Check ==
/// Returns true for values a path can descend into.
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Number of direct children, or None for a leaf.
pub fn len(value: &Value) -> Option<usize> {
    match value {
        Value::Object(map) => Some(map.len()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

// == Array Index ==
/// Parses `segment` as an array index.
///
/// Only the canonical form counts: `"01"` and `"+1"` are plain keys.
pub fn array_index(segment: &str) -> Option<usize> {
    let index: usize = segment.parse().ok()?;
    (index.to_string() == segment).then_some(index)
}

// == Child ==
/// Returns the direct child of `node` named by `segment`.
pub fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Mutable counterpart of [`child`].
pub fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => array_index(segment).and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

// == Resolve ==
/// Walks `segments` from `root`, failing at the first missing segment or leaf.
pub fn resolve<'a, 'k>(
    root: &'a Value,
    segments: impl IntoIterator<Item = &'k str>,
) -> Option<&'a Value> {
    segments
        .into_iter()
        .try_fold(root, |node, segment| child(node, segment))
}

/// Mutable counterpart of [`resolve`]. Never creates anything.
pub fn resolve_mut<'a, 'k>(
    root: &'a mut Value,
    segments: impl IntoIterator<Item = &'k str>,
) -> Option<&'a mut Value> {
    segments
        .into_iter()
        .try_fold(root, |node, segment| child_mut(node, segment))
}

// == Object Promotion ==
/// Turns `node` into an object and returns its map.
///
/// Arrays keep their elements under stringified indices; leaves are replaced
/// by an empty object.
pub fn as_object_mut(node: &mut Value) -> &mut Map<String, Value> {
    match node {
        Value::Object(map) => map,
        other => {
            let map = match other.take() {
                Value::Array(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(i, value)| (i.to_string(), value))
                    .collect(),
                _ => Map::new(),
            };
            *other = Value::Object(map);
            as_object_mut(other)
        }
    }
}

// == Slot ==
/// Returns the child slot for `segment`, creating it as `null` if absent.
///
/// Arrays are written in place for an existing index and appended to for
/// index == len; any other segment promotes the array to an object first.
/// A leaf `node` is replaced by an empty object.
pub fn slot<'a>(node: &'a mut Value, segment: &str) -> &'a mut Value {
    let position = match &*node {
        Value::Array(items) => array_index(segment).filter(|&i| i <= items.len()),
        _ => None,
    };

    match (node, position) {
        (Value::Array(items), Some(i)) => {
            if i == items.len() {
                items.push(Value::Null);
            }
            &mut items[i]
        }
        (other, _) => as_object_mut(other).entry(segment).or_insert(Value::Null),
    }
}

// == Vivify ==
/// Returns the slot at the end of `segments`, creating every missing or
/// non-container intermediate as an empty object.
pub fn vivify<'a>(root: &'a mut Value, segments: &[&str]) -> &'a mut Value {
    let Some((last, parents)) = segments.split_last() else {
        return root;
    };

    let mut cursor = root;
    for segment in parents {
        let descend = child(cursor, segment).is_some_and(is_container);
        let next = slot(cursor, segment);
        if !descend {
            *next = Value::Object(Map::new());
        }
        cursor = next;
    }
    slot(cursor, last)
}

// == Remove Child ==
/// Removes the direct child named by `segment`.
///
/// Object order is preserved; later array elements shift down by one.
pub fn remove_child(node: &mut Value, segment: &str) -> Option<Value> {
    match node {
        Value::Object(map) => map.shift_remove(segment),
        Value::Array(items) => match array_index(segment) {
            Some(i) if i < items.len() => Some(items.remove(i)),
            _ => None,
        },
        _ => None,
    }
}

// == Entries ==
/// Consumes a container into `(key, value)` pairs; a leaf yields nothing.
pub fn into_entries(value: Value) -> Vec<(String, Value)> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, value)| (i.to_string(), value))
            .collect(),
        _ => Vec::new(),
    }
}
