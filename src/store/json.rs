//! JSON Projection Module
//!
//! Rendering of stored values through serde_json.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{Result, StoreError};

/// Default indent width for pretty output.
pub const DEFAULT_INDENT: usize = 4;

// == Json Options ==
/// Formatting options for [`PathStore::to_json`](crate::store::PathStore::to_json).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOptions {
    /// Emit newlines and indentation
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set
    pub indent: usize,
}

impl JsonOptions {
    /// Single-line output.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Multi-line output with the default indent.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

// == Render ==
/// Encodes `value` as a JSON document.
pub fn render(value: &Value, options: JsonOptions) -> Result<String> {
    if !options.pretty {
        return serde_json::to_string(value).map_err(StoreError::Encoding);
    }

    let indent = vec![b' '; options.indent];
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    value
        .serialize(&mut serializer)
        .map_err(StoreError::Encoding)?;

    String::from_utf8(buf).map_err(|err| StoreError::Encoding(serde_json::Error::custom(err)))
}
