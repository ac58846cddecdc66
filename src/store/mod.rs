//! Store Module
//!
//! Nested key-value storage addressed by delimited paths, with a memoizing
//! lookup cache kept coherent across mutations.

mod cache;
mod index;
mod iter;
mod json;
mod merge;
mod node;
mod path;
mod path_store;
mod stats;


// Re-export public types
pub(crate) use cache::PathCache;
pub use iter::Iter;
pub use json::{JsonOptions, DEFAULT_INDENT};
pub use path_store::PathStore;
pub use stats::CacheStats;
