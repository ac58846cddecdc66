//! Iteration over the top-level entries of a store.

use std::borrow::Cow;
use std::iter::Enumerate;
use std::slice;

use serde_json::{map, Value};

/// Iterator over `(key, value)` pairs at the top level, in insertion order.
///
/// Array roots yield their indices as keys.
pub struct Iter<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Object(map::Iter<'a>),
    Array(Enumerate<slice::Iter<'a, Value>>),
    Empty,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(root: &'a Value) -> Self {
        let inner = match root {
            Value::Object(map) => Inner::Object(map.iter()),
            Value::Array(items) => Inner::Array(items.iter().enumerate()),
            _ => Inner::Empty,
        };
        Self { inner }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Cow<'a, str>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Object(entries) => entries
                .next()
                .map(|(key, value)| (Cow::Borrowed(key.as_str()), value)),
            Inner::Array(items) => items
                .next()
                .map(|(i, value)| (Cow::Owned(i.to_string()), value)),
            Inner::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Object(entries) => entries.size_hint(),
            Inner::Array(items) => items.size_hint(),
            Inner::Empty => (0, Some(0)),
        }
    }
}
