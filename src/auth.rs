//! Login, registration, and logout flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Glue between the form views, the API client, the session store, and the
//! navigator. Validation runs first and short-circuits before any request.
//! Backend failures come back as one user-facing message with a fixed
//! fallback when the body carries none. A 401 is the exception: the API
//! client has already signed the user out, so it surfaces as
//! `SessionExpired` with no message.
//!
//! The demo account bypasses the backend entirely and mints a local
//! `demo-token-<millis>` session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::api::auth::LoginResponse;
use crate::api::{ApiClient, ApiError};
use crate::forms::{EMAIL, FormKind, FormState, PASSWORD};
use crate::navigation::{DASHBOARD_PATH, LOGIN_PATH, NavigateOptions};
use crate::session::{SessionError, User};

pub const DEMO_EMAIL: &str = "demo@smartcareer.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_USER_ID: &str = "demo-001";
pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_TOKEN_PREFIX: &str = "demo-token-";

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const REGISTERED_FLASH: &str = "Registration successful! Please sign in.";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Field errors are on the form; nothing was sent.
    #[error("form has invalid fields")]
    InvalidForm,
    /// The request failed for a reason the view should show.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },
    /// The backend answered 401. The session is already cleared and a full
    /// reload to `/login` issued; there is nothing for the view to show.
    #[error("signed out by the server")]
    SessionExpired {
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// How a login completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Demo(User),
    Backend { user: Option<User> },
}

#[must_use]
pub fn demo_user() -> User {
    User { id: DEMO_USER_ID.to_owned(), name: DEMO_USER_NAME.to_owned(), email: DEMO_EMAIL.to_owned() }
}

fn demo_token() -> String {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis());
    format!("{DEMO_TOKEN_PREFIX}{millis}")
}

/// Pre-fill the login form with the demo account.
pub fn fill_demo_credentials(form: &mut FormState) {
    form.set(EMAIL, DEMO_EMAIL);
    form.set(PASSWORD, DEMO_PASSWORD);
}

pub struct AuthFlow<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthFlow<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Validate and submit the login form.
    ///
    /// On success the session holds the new token (and user when the backend
    /// sent one), the form is reset, and the user is sent to `/dashboard`.
    ///
    /// # Errors
    ///
    /// `InvalidForm` when validation fails, `SessionExpired` on a 401,
    /// `Rejected` when the backend call otherwise fails, `Session` when the
    /// session cannot be written.
    pub async fn login(&self, form: &mut FormState) -> Result<LoginOutcome, AuthError> {
        debug_assert_eq!(form.kind(), FormKind::Login);
        if !form.validate() {
            return Err(AuthError::InvalidForm);
        }
        let (email, password) = (form.value(EMAIL).to_owned(), form.value(PASSWORD).to_owned());
        let session = self.client.session();

        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            let user = demo_user();
            session.establish(&demo_token(), &user)?;
            tracing::info!("demo login");
            self.finish(form, DASHBOARD_PATH, NavigateOptions::default());
            return Ok(LoginOutcome::Demo(user));
        }

        let body = self
            .client
            .auth()
            .login(&email, &password)
            .await
            .map_err(|e| rejected(e, LOGIN_FAILED))?;
        let LoginResponse { token, user } = LoginResponse::from_body(&body);
        if let Some(token) = &token {
            session.set_token(token)?;
        }
        if let Some(user) = &user {
            session.set_user(user)?;
        }
        tracing::info!(has_token = token.is_some(), has_user = user.is_some(), "login succeeded");
        self.finish(form, DASHBOARD_PATH, NavigateOptions::default());
        Ok(LoginOutcome::Backend { user })
    }

    /// Validate and submit the registration form, then send the user to
    /// `/login` with a success flash. The session is not touched.
    ///
    /// # Errors
    ///
    /// `InvalidForm` when validation fails, `Rejected` when the backend call
    /// fails.
    pub async fn register(&self, form: &mut FormState) -> Result<Value, AuthError> {
        debug_assert_eq!(form.kind(), FormKind::Register);
        if !form.validate() {
            return Err(AuthError::InvalidForm);
        }
        let body = self
            .client
            .auth()
            .register(&form.register_request())
            .await
            .map_err(|e| rejected(e, REGISTER_FAILED))?;
        self.finish(form, LOGIN_PATH, NavigateOptions::with_flash(REGISTERED_FLASH));
        Ok(body)
    }

    /// Tell the backend (best effort), clear the session, go to `/login`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Err(e) = self.client.auth().logout().await {
            tracing::warn!(error = %e, "logout request failed; clearing session anyway");
        }
        self.client.session().clear_auth()?;
        self.client.navigator().navigate(LOGIN_PATH, NavigateOptions::default());
        Ok(())
    }

    /// Fetch `/auth/me` and store the user when the body carries one, either
    /// bare or under `user`.
    ///
    /// # Errors
    ///
    /// `SessionExpired` on a 401, `Rejected` when the call otherwise fails,
    /// `Session` when the user cannot be stored.
    pub async fn refresh_user(&self) -> Result<Option<User>, AuthError> {
        let body = self
            .client
            .auth()
            .current_user()
            .await
            .map_err(|e| rejected(e, "Could not load your profile."))?;
        let user = body
            .get("user")
            .and_then(|u| serde_json::from_value::<User>(u.clone()).ok())
            .or_else(|| serde_json::from_value::<User>(body.clone()).ok());
        if let Some(user) = &user {
            self.client.session().set_user(user)?;
        }
        Ok(user)
    }

    fn finish(&self, form: &mut FormState, path: &str, options: NavigateOptions) {
        form.reset();
        self.client.navigator().navigate(path, options);
    }
}

fn rejected(source: ApiError, fallback: &str) -> AuthError {
    if source.is_unauthorized() {
        return AuthError::SessionExpired { source };
    }
    let message = source.user_message(fallback);
    tracing::warn!(error = %source, %message, "auth request failed");
    AuthError::Rejected { message, source }
}
