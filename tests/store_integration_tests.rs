//! Integration Tests for the Path Store
//!
//! Exercises the public API end to end: construction, path reads and writes,
//! merging, projection and cache behavior.

use std::sync::{Arc, Mutex};
use std::thread;

use dotpath_store::{JsonOptions, PathStore, StoreConfig, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn person_store() -> PathStore {
    PathStore::from(json!({
        "name": {"first": "John", "last": "Doe"},
        "emails": ["john@example.com", "jd@example.com"],
        "age": 42
    }))
}

// == Read / Write ==

#[test]
fn test_set_then_get_and_has() {
    init_tracing();
    let mut store = PathStore::new();

    store.set("server.http.port", 8080).set("server.name", "edge");

    assert_eq!(store.get("server.http.port"), Some(&json!(8080)));
    assert!(store.has("server.http.port"));
    assert!(store.has("server.http"));
    assert_eq!(
        store.get("server"),
        Some(&json!({"http": {"port": 8080}, "name": "edge"}))
    );
}

#[test]
fn test_missing_keys_fall_back() {
    let mut store = person_store();
    let fallback = json!("n/a");

    assert!(!store.has("name.middle"));
    assert_eq!(store.get_or("name.middle", &fallback), &fallback);
    assert_eq!(store.get("nickname"), None);
    assert!(!store.has("age.years"));
}

#[test]
fn test_repeated_reads_are_stable() {
    let mut store = person_store();

    let first = store.get("name.last").cloned();
    let second = store.get("name.last").cloned();
    assert_eq!(first, second);
    assert_eq!(first, Some(json!("Doe")));

    let stats = store.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_array_elements_by_index() {
    let mut store = person_store();

    assert_eq!(store.get("emails.1"), Some(&json!("jd@example.com")));
    store.set("emails.2", "third@example.com");
    assert_eq!(store.count_at("emails").unwrap(), 3);
}

#[test]
fn test_remove_sequence_element() {
    let mut store = PathStore::new();
    store.set("n", json!([1, 2, 3, 4]));

    store.remove("n.1");

    let remaining = store.get("n").cloned().unwrap();
    assert_eq!(remaining, json!([1, 3, 4]));
    assert!(!remaining.as_array().unwrap().contains(&json!(2)));
}

#[test]
fn test_remove_invalidates_cached_descendants() {
    let mut store = person_store();
    assert_eq!(store.get("name.first"), Some(&json!("John")));

    store.remove("name");

    assert_eq!(store.get("name.first"), None);
    assert!(!store.has("name.first"));
}

#[test]
fn test_literal_dotted_top_level_key() {
    let mut store = PathStore::from(json!({"example.com": {"ttl": 60}}));

    assert!(store.has("example.com"));
    assert_eq!(store.get("example.com"), Some(&json!({"ttl": 60})));
    // Segments cannot reach inside a key that contains the delimiter
    assert!(!store.has("example.com.ttl"));

    let mut slashed = PathStore::with_config(StoreConfig::default().with_delimiter('/'))
        .hydrate(json!({"example.com": {"ttl": 60}}));
    assert_eq!(slashed.get("example.com/ttl"), Some(&json!(60)));
}

// == Merge ==

#[test]
fn test_shallow_merge() {
    let mut store = PathStore::from(json!({"first": "John", "last": "Doe"}));
    store.merge(json!({"first": "Johnny"}), false);
    assert_eq!(store.items(), &json!({"first": "Johnny", "last": "Doe"}));
}

#[test]
fn test_recursive_merge() {
    let mut store = PathStore::from(json!({"name": {"first": "John", "last": "Doe"}}));
    store.merge_recursive(json!({"name": {"first": "Johnny"}}));

    assert_eq!(store.get("name.first"), Some(&json!("Johnny")));
    assert_eq!(store.get("name.last"), Some(&json!("Doe")));
}

#[test]
fn test_shallow_merge_replaces_nested_wholesale() {
    let mut store = PathStore::from(json!({"name": {"first": "John", "last": "Doe"}}));
    store.merge(json!({"name": {"first": "Johnny"}}), false);
    assert!(!store.has("name.last"));
}

#[test]
fn test_merge_serialized_record() {
    #[derive(Serialize)]
    struct Overrides {
        age: u32,
        city: &'static str,
    }

    let mut store = person_store();
    store
        .merge_serialize(&Overrides { age: 43, city: "Lyon" }, false)
        .unwrap();

    assert_eq!(store.get("age"), Some(&json!(43)));
    assert_eq!(store.get("city"), Some(&json!("Lyon")));
    assert_eq!(store.get("name.first"), Some(&json!("John")));
}

// == Construction ==

#[test]
fn test_construction_sources() {
    assert_eq!(PathStore::from(json!([1, 2, 3, 4])).len(), 4);
    assert_eq!(PathStore::from(json!(7)).items(), &json!([7]));
    assert!(PathStore::from(Value::Null).is_empty());

    let pairs = PathStore::from_iter([("b", 1), ("a", 2)]);
    let keys: Vec<String> = pairs.iter().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn test_create_from() {
    let store = person_store();

    let name = store.create_from("name").unwrap();
    assert_eq!(name.items(), &json!({"first": "John", "last": "Doe"}));

    let missing = PathStore::new().create_from("missing");
    assert!(matches!(missing, Err(StoreError::KeyNotFound(_))));
}

#[test]
fn test_clear_and_empty() {
    let mut store = person_store();
    store.get("name.first");

    store.clear();

    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.get("name.first"), None);
}

// == Projection ==

#[test]
fn test_to_json_roundtrip() {
    let store = person_store();

    let text = store.to_json(None, JsonOptions::pretty()).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(&parsed, store.items());

    assert_eq!(
        store.to_json(Some("name"), JsonOptions::compact()).unwrap(),
        r#"{"first":"John","last":"Doe"}"#
    );
}

#[test]
fn test_serialize_exposes_items_only() {
    let mut store = person_store();
    store.get("name.first");

    let value = serde_json::to_value(&store).unwrap();
    assert_eq!(&value, store.items());
}

#[test]
fn test_typed_access() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Name {
        first: String,
        last: String,
    }

    let mut store = person_store();
    let name: Option<Name> = store.get_as("name").unwrap();
    assert_eq!(
        name,
        Some(Name {
            first: "John".to_string(),
            last: "Doe".to_string()
        })
    );
}

#[test]
fn test_index_sugar() {
    let mut store = person_store();

    assert_eq!(store["name.first"], "John");
    store["name.middle"] = json!("Q");
    assert_eq!(store.get("name.middle"), Some(&json!("Q")));
}

// == Concurrency ==

#[test]
fn test_shared_store_behind_lock() {
    let store = Arc::new(Mutex::new(PathStore::new()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut guard = store.lock().unwrap();
                guard.set(&format!("workers.{i}.done"), true);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut guard = store.lock().unwrap();
    assert_eq!(guard.count_at("workers").unwrap(), 4);
    assert_eq!(guard.get("workers.3.done"), Some(&json!(true)));
}
