//! Error category classification.
//!
//! Categories drive retry decisions and the hint shown next to an error.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, interrupted body.
    /// Generally transient and retryable.
    Network,

    /// Backend-side errors (HTTP 5xx, missing body).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (rejected request, malformed payload).
    /// Not retryable without a change.
    Client,

    /// User action required (empty input, send already in flight).
    User,

    /// Missing or invalid configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested recovery action.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and try again",
            ErrorCategory::Server => "The server may be experiencing issues. Please try again later",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Configuration => "Check your configuration settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
