//! Error types for the path store
//!
//! Provides unified error handling using thiserror. Traversal misses are not
//! errors: `get`, `has` and `remove` degrade to `None`, `false` or a no-op.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the path store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// `create_from` was asked for a path that does not resolve
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// `count_at` hit a missing value or one that is not an object or array
    #[error("Value at '{0}' is not countable")]
    NotCountable(String),

    /// A value could not be projected to JSON
    #[error("JSON encoding failed: {0}")]
    Encoding(#[source] serde_json::Error),

    /// A stored value could not be converted into the requested type
    #[error("Value at '{key}' could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the path store.
pub type Result<T> = std::result::Result<T, StoreError>;
