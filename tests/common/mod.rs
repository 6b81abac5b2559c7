//! Common test utilities for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use streamchat::config::ClientConfig;

/// One `data: ` line carrying `payload`, newline-terminated.
pub fn data_line(payload: &Value) -> String {
    format!("data: {}\n", payload)
}

/// A `content_block_delta` text event.
pub fn text_delta(text: &str) -> Value {
    json!({
        "type": "content_block_delta",
        "delta": {"type": "text_delta", "text": text}
    })
}

pub fn message_stop() -> Value {
    json!({"type": "message_stop"})
}

/// An SSE body made of one `data: ` line per event, with blank separators.
pub fn sse_body(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("{}\n", data_line(event)))
        .collect()
}

/// Client config pointed at a mock server.
pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(base_url)
        .with_request_timeout_secs(5)
}
