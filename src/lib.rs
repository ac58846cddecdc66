//! Dotpath Store - A nested key-value container with dot-path addressing
//!
//! Reads and writes address nested objects and arrays with keys such as
//! `"server.ports.0"`. Compound reads are memoized in a flat lookup cache that
//! every mutation keeps coherent with the items.

pub mod config;
pub mod error;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::{CacheStats, JsonOptions, PathStore};
