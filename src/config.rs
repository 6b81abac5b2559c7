//! Client configuration.
//!
//! Identifiers sent with every run request, plus where to send it. Values are
//! layered: built-in defaults, then an optional JSON config file, then
//! `STREAMCHAT_*` environment variables, then command-line flags.
//!
//! # Example
//!
//! ```
//! use streamchat::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("http://localhost:9000")
//!     .with_session_id("session_42");
//! assert_eq!(config.run_url(), "http://localhost:9000/run_sse");
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_RUN_PATH: &str = "/run_sse";
pub const DEFAULT_APP_NAME: &str = "chat_app";
pub const DEFAULT_USER_ID: &str = "user_1";
pub const DEFAULT_SESSION_ID: &str = "session_1";

pub const ENV_BASE_URL: &str = "STREAMCHAT_BASE_URL";
pub const ENV_APP_NAME: &str = "STREAMCHAT_APP_NAME";
pub const ENV_USER_ID: &str = "STREAMCHAT_USER_ID";
pub const ENV_SESSION_ID: &str = "STREAMCHAT_SESSION_ID";
pub const ENV_TIMEOUT_SECS: &str = "STREAMCHAT_TIMEOUT_SECS";

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Connection settings and the identifiers carried in each run request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the chat backend
    pub base_url: String,
    /// Path of the streaming run endpoint
    pub run_path: String,
    /// Application identifier
    pub app_name: String,
    /// User identifier
    pub user_id: String,
    /// Session identifier
    pub session_id: String,
    /// Whole-request timeout; `None` leaves it to the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            run_path: DEFAULT_RUN_PATH.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            session_id: DEFAULT_SESSION_ID.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_run_path(mut self, path: impl Into<String>) -> Self {
        self.run_path = path.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Full URL of the run endpoint.
    pub fn run_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.run_path.starts_with('/') {
            format!("{}{}", base, self.run_path)
        } else {
            format!("{}/{}", base, self.run_path)
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Default config file location: `~/.streamchat/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".streamchat").join("config.json"))
    }

    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from [`default_path`](Self::default_path) if that file exists,
    /// otherwise fall back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Defaults overridden by `STREAMCHAT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    /// Override fields from `STREAMCHAT_*` environment variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(app_name) = lookup(ENV_APP_NAME) {
            self.app_name = app_name;
        }
        if let Some(user_id) = lookup(ENV_USER_ID) {
            self.user_id = user_id;
        }
        if let Some(session_id) = lookup(ENV_SESSION_ID) {
            self.session_id = session_id;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(self)
    }
}
