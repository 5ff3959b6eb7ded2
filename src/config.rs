//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "SMARTCAREER_API_BASE_URL";
pub const STATE_DIR_ENV: &str = "SMARTCAREER_STATE_DIR";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_STATE_DIR: &str = ".smartcareer";
pub const SESSION_FILE_NAME: &str = "session.json";

/// Every request is bounded by this timeout. Not configurable per call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub state_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned(), state_dir: PathBuf::from(DEFAULT_STATE_DIR) }
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SMARTCAREER_API_BASE_URL`: default `http://localhost:5000`
    /// - `SMARTCAREER_STATE_DIR`: default `.smartcareer`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        let state_dir = std::env::var(STATE_DIR_ENV).ok().filter(|v| !v.trim().is_empty());
        Self::new(base_url.as_deref(), state_dir.map(PathBuf::from))
    }

    /// Build config from explicit overrides, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL.
    pub fn new(base_url: Option<&str>, state_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url.unwrap_or(DEFAULT_API_BASE_URL))?;
        let state_dir = state_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
        Ok(Self { base_url, state_dir })
    }

    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE_NAME)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
