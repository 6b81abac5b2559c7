//! Stream and session error types.
//!
//! Payload problems are absorbed by the decoder and only ever logged; the
//! session errors are raised before a request is sent.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// A `data: ` payload that is not valid JSON.
    InvalidJson { payload: String, message: String },

    /// A send was attempted while another stream is still in flight.
    AlreadyStreaming,

    /// A send was attempted with blank input.
    EmptyMessage,
}

impl StreamError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::InvalidJson { .. } => {
                "Received invalid data from server.".to_string()
            }
            StreamError::AlreadyStreaming => {
                "Please wait for the current response to complete before sending another message."
                    .to_string()
            }
            StreamError::EmptyMessage => "Message is empty.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::AlreadyStreaming => "E_STREAM_BUSY",
            StreamError::EmptyMessage => "E_STREAM_EMPTY",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::InvalidJson { payload, message } => {
                write!(f, "Invalid JSON in SSE data ({}): {}", message, payload)
            }
            StreamError::AlreadyStreaming => write!(f, "A response is already streaming"),
            StreamError::EmptyMessage => write!(f, "Message is empty"),
        }
    }
}

impl std::error::Error for StreamError {}
