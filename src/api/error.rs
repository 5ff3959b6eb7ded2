//! API client errors.

use serde_json::Value;

use crate::config::REQUEST_TIMEOUT;

/// Errors produced by [`super::ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request did not complete within the client timeout.
    #[error("request timed out after {}s", REQUEST_TIMEOUT.as_secs())]
    Timeout,

    /// Connection, TLS, or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// A request part (e.g. an upload's MIME type) could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The backend answered 401. The session has already been cleared and a
    /// full reload to `/login` issued by the time the caller sees this.
    #[error("unauthorized: session cleared")]
    Unauthorized { body: Value },

    /// Any other non-success status, passed through with its body.
    #[error("API response error: status {status}")]
    Status { status: u16, body: Value },
}

impl ApiError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() { Self::Timeout } else { Self::Transport(e) }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message carried in the response body, if any (`message`, then `error`).
    #[must_use]
    pub fn body_message(&self) -> Option<&str> {
        let body = match self {
            Self::Unauthorized { body } | Self::Status { body, .. } => body,
            _ => return None,
        };
        ["message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .filter(|m| !m.trim().is_empty())
    }

    /// Text suitable for the originating view: the body message when the
    /// backend sent one, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.body_message().unwrap_or(fallback).to_owned()
    }
}
