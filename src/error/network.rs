//! Transport error types.
//!
//! Everything that can go wrong between sending the run request and reading
//! the last byte of the response body. These are the only errors that end a
//! stream and reach the caller.

use std::fmt;

/// Transport-level failure.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// Non-2xx response. `message` is the response body, or the status reason
    /// when the body is empty.
    HttpStatus { status: u16, message: String },

    /// The response carried no readable body.
    MissingBody,

    /// Reading the body failed part-way through the stream.
    BodyRead { message: String },

    /// The request URL could not be built.
    InvalidUrl { url: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::MissingBody => true,
            NetworkError::BodyRead { .. } => true,
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check that it is running.".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} timed out. The server may be slow or unreachable.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid.".to_string(),
                401 | 403 => "The server refused the request.".to_string(),
                404 => "The chat endpoint was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::MissingBody => "The server sent an empty response.".to_string(),
            NetworkError::BodyRead { .. } => {
                "The response stream was interrupted.".to_string()
            }
            NetworkError::InvalidUrl { url } => format!("Invalid server URL '{}'.", url),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::MissingBody => "E_NET_NOBODY",
            NetworkError::BodyRead { .. } => "E_NET_BODY",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            NetworkError::MissingBody => write!(f, "Response body is null."),
            NetworkError::BodyRead { message } => {
                write!(f, "Failed to read response body: {}", message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout {
            operation: "HTTP request".to_string(),
        }
    } else if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_builder() {
        NetworkError::InvalidUrl {
            url: url.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        NetworkError::BodyRead {
            message: err.to_string(),
        }
    } else if let Some(status) = err.status() {
        NetworkError::HttpStatus {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        NetworkError::Other {
            message: err.to_string(),
        }
    }
}
