//! `/auth/*` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::session::User;

pub struct AuthApi<'a> {
    pub(super) client: &'a ApiClient,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registration payload. The password confirmation never leaves the form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The parts of a login response the session cares about. Either may be
/// missing; the rest of the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl LoginResponse {
    /// Pick `token` and `user` out of a raw login body. A `user` of the wrong
    /// shape is dropped rather than failing the login.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let token = body.get("token").and_then(Value::as_str).map(str::to_owned);
        let user = body.get("user").and_then(|u| serde_json::from_value(u.clone()).ok());
        Self { token, user }
    }
}

impl AuthApi<'_> {
    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.client.post(&["auth", "login"], &LoginRequest { email, password }).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        self.client.post(&["auth", "register"], request).await
    }

    /// `POST /auth/logout`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.client.post_empty(&["auth", "logout"]).await
    }

    /// `GET /auth/me`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn current_user(&self) -> Result<Value, ApiError> {
        self.client.get(&["auth", "me"]).await
    }
}
