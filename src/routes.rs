//! Route table and the guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation resolves a path to a `Route`. Protected routes are gated
//! by `RouteGuard`, which checks the session on every evaluation and sends
//! unauthenticated users to `/login` without remembering where they were
//! going.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::sync::Arc;

use crate::navigation::{DASHBOARD_PATH, LOGIN_PATH, NavigateOptions, Navigator, REGISTER_PATH, ROOT_PATH};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Resume,
    Jobs,
    Skills,
    Profile,
}

impl Route {
    pub const ALL: [Self; 7] =
        [Self::Login, Self::Register, Self::Dashboard, Self::Resume, Self::Jobs, Self::Skills, Self::Profile];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Register => REGISTER_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::Resume => "/resume",
            Self::Jobs => "/jobs",
            Self::Skills => "/skills",
            Self::Profile => "/profile",
        }
    }

    /// Exact-match lookup. A single trailing slash is tolerated.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = if path.len() > 1 { path.strip_suffix('/').unwrap_or(path) } else { path };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render the route's view.
    Render(Route),
    /// Replace the current location with another path.
    Redirect(&'static str),
}

// =============================================================================
// GUARD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Redirected { to: &'static str },
}

/// Gate for protected views. Holds no decision state between evaluations.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    #[must_use]
    pub fn evaluate(&self) -> GuardDecision {
        if self.session.is_authenticated() {
            GuardDecision::Allowed
        } else {
            GuardDecision::Redirected { to: LOGIN_PATH }
        }
    }

    /// Render `view` only for an authenticated session.
    ///
    /// On redirect the view closure is never called; a replacing navigation
    /// to `/login` is issued instead.
    pub fn render<T>(&self, view: impl FnOnce() -> T) -> Option<T> {
        match self.evaluate() {
            GuardDecision::Allowed => Some(view()),
            GuardDecision::Redirected { to } => {
                tracing::debug!(to, "guard redirect");
                self.navigator.navigate(to, NavigateOptions::replace());
                None
            }
        }
    }

    /// Map a requested path onto a view or a redirect.
    ///
    /// `/` goes to the dashboard or the login page depending on the session;
    /// unknown paths go back to `/`. Public routes always render.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        if path == ROOT_PATH || path.is_empty() {
            return if self.session.is_authenticated() {
                Resolution::Redirect(DASHBOARD_PATH)
            } else {
                Resolution::Redirect(LOGIN_PATH)
            };
        }
        match Route::from_path(path) {
            None => Resolution::Redirect(ROOT_PATH),
            Some(route) if !route.is_protected() => Resolution::Render(route),
            Some(route) => match self.evaluate() {
                GuardDecision::Allowed => Resolution::Render(route),
                GuardDecision::Redirected { to } => Resolution::Redirect(to),
            },
        }
    }

    /// Follow redirects from `path` until a view renders, issuing the
    /// replacing navigations along the way.
    pub fn open(&self, path: &str) -> Route {
        let mut current = path.to_owned();
        // Every redirect chain ends at /login or /dashboard within three hops.
        for _ in 0..4 {
            match self.resolve(&current) {
                Resolution::Render(route) => return route,
                Resolution::Redirect(to) => {
                    self.navigator.navigate(to, NavigateOptions::replace());
                    current = to.to_owned();
                }
            }
        }
        Route::Login
    }
}
