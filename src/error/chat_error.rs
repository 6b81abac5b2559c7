//! Unified error type for the chat client.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::config::ConfigError;

/// Unified error type.
///
/// Only [`ChatError::Network`] ever terminates a running stream; the other
/// variants are raised before a request goes out.
#[derive(Debug)]
pub enum ChatError {
    /// Transport failures.
    Network(NetworkError),

    /// Stream/session errors.
    Stream(StreamError),

    /// Configuration errors.
    Config(ConfigError),
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
                NetworkError::HttpStatus { .. } => ErrorCategory::Client,
                NetworkError::MissingBody => ErrorCategory::Server,
                NetworkError::InvalidUrl { .. } => ErrorCategory::Configuration,
                _ => ErrorCategory::Network,
            },
            ChatError::Stream(err) => match err {
                StreamError::InvalidJson { .. } => ErrorCategory::Client,
                StreamError::AlreadyStreaming | StreamError::EmptyMessage => ErrorCategory::User,
            },
            ChatError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Network(err) => err.is_retryable(),
            ChatError::Stream(_) => false,
            ChatError::Config(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
            ChatError::Config(err) => format!("Configuration problem: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::Config(_) => "E_CONFIG",
        }
    }

    /// Recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// The transport error, if this is one.
    pub fn as_network(&self) -> Option<&NetworkError> {
        match self {
            ChatError::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(err) => write!(f, "{}", err),
            ChatError::Stream(err) => write!(f, "{}", err),
            ChatError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Network(err) => Some(err),
            ChatError::Stream(err) => Some(err),
            ChatError::Config(err) => Some(err),
        }
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<NetworkError> for ChatError {
    fn from(err: NetworkError) -> Self {
        ChatError::Network(err)
    }
}

impl From<StreamError> for ChatError {
    fn from(err: StreamError) -> Self {
        ChatError::Stream(err)
    }
}

impl From<ConfigError> for ChatError {
    fn from(err: ConfigError) -> Self {
        ChatError::Config(err)
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ChatError::Network(super::network::classify_reqwest_error(&err, &url))
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Stream(StreamError::InvalidJson {
            payload: String::new(),
            message: err.to_string(),
        })
    }
}
