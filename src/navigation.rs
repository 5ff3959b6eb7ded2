//! Client-side navigation seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages, the route guard, and the API client all redirect through a
//! `Navigator`. Two kinds of transition exist and are kept distinct:
//! `navigate` is a routed transition that keeps in-memory state, while
//! `hard_redirect` forces a full reload of the shell (process-wide
//! initialization runs again). The 401 path uses the latter.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::sync::Mutex;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// One-shot message shown by the destination view.
    pub flash: Option<String>,
}

impl NavigateOptions {
    #[must_use]
    pub fn replace() -> Self {
        Self { replace: true, flash: None }
    }

    #[must_use]
    pub fn with_flash(message: impl Into<String>) -> Self {
        Self { replace: false, flash: Some(message.into()) }
    }
}

/// A transition requested by the client core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Routed { path: String, options: NavigateOptions },
    FullReload { path: String },
}

impl Navigation {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Routed { path, .. } | Self::FullReload { path } => path,
        }
    }
}

pub trait Navigator: Send + Sync {
    /// Routed transition inside the running shell.
    fn navigate(&self, path: &str, options: NavigateOptions);

    /// Full reload at `path`, discarding in-memory state.
    fn hard_redirect(&self, path: &str);
}

/// Navigator that records every transition in order.
///
/// The CLI shell inspects the log after each command to decide what to tell
/// the user; tests use it to assert redirects.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    log: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Navigation> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<Navigation> {
        self.log.lock().ok().and_then(|log| log.last().cloned())
    }

    /// Drain the recorded transitions.
    pub fn take(&self) -> Vec<Navigation> {
        self.log.lock().map(|mut log| std::mem::take(&mut *log)).unwrap_or_default()
    }

    fn push(&self, nav: Navigation) {
        tracing::debug!(path = nav.path(), full_reload = matches!(nav, Navigation::FullReload { .. }), "navigate");
        if let Ok(mut log) = self.log.lock() {
            log.push(nav);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        self.push(Navigation::Routed { path: path.to_owned(), options });
    }

    fn hard_redirect(&self, path: &str) {
        self.push(Navigation::FullReload { path: path.to_owned() });
    }
}
