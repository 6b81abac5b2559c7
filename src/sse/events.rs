//! Event types produced by the SSE decoding pipeline.
//!
//! The decoder yields [`RawEvent`]s, untyped JSON values lifted from `data: `
//! lines. The interpreter turns each of those into exactly one
//! [`SemanticDelta`].

use serde::{Deserialize, Serialize};

/// Literal prefix that marks a payload-carrying SSE line.
pub const DATA_PREFIX: &str = "data: ";

/// A JSON payload extracted from one `data: ` line.
///
/// No schema is assumed; shape recognition happens in the interpreter.
pub type RawEvent = serde_json::Value;

/// Semantic outcome of a single decoded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SemanticDelta {
    /// Text to append to the in-progress model message
    TextAppend(String),
    /// The in-progress model message is finished
    SegmentComplete,
    /// The event carried nothing actionable
    Noop,
}

impl SemanticDelta {
    /// Text carried by a `TextAppend`, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            SemanticDelta::TextAppend(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, SemanticDelta::Noop)
    }
}
