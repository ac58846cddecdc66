//! Path Module
//!
//! Splitting of delimited keys and the ancestor/descendant relation the
//! lookup cache uses for invalidation.

use std::str::Split;

// == Segments ==
/// Splits `key` into its segments. A key without the delimiter is a single
/// segment.
pub fn segments(key: &str, delimiter: char) -> Split<'_, char> {
    key.split(delimiter)
}

// == Is Compound ==
/// Returns true if `key` names more than one segment.
pub fn is_compound(key: &str, delimiter: char) -> bool {
    key.contains(delimiter)
}

// == Parent ==
/// Splits a compound key into its parent path and last segment.
///
/// Returns None for a single-segment key.
pub fn split_last(key: &str, delimiter: char) -> Option<(&str, &str)> {
    key.rsplit_once(delimiter)
}

// == Is Descendant ==
/// Returns true if `path` lies strictly below `ancestor`.
///
/// `a.bc` is not below `a.b`; only whole segments count.
pub fn is_descendant(path: &str, ancestor: &str, delimiter: char) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(delimiter)
}

// == Is Related ==
/// Returns true if `a` and `b` are the same path or one lies below the other.
pub fn is_related(a: &str, b: &str, delimiter: char) -> bool {
    a == b || is_descendant(a, b, delimiter) || is_descendant(b, a, delimiter)
}
