//! Gateway client for the Smart Career REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through one `ApiClient`. The endpoint groups in
//! the submodules (`auth`, `resume`, `jobs`, `skills`, `dashboard`) are thin
//! pass-throughs: they pick a verb, a path, and a body, and hand the parsed
//! response back verbatim.
//!
//! DESIGN
//! ======
//! Two interception points wrap every call:
//! - outbound: `authorize` reads the session token right before the request
//!   is built and attaches `Authorization: Bearer <token>` when present.
//! - inbound: `screen` inspects the status before the body is read. A 401
//!   clears the session and forces a full reload to `/login`, then still
//!   fails the call. Other failures pass through untouched.
//!
//! There are no retries. The client-level timeout is the only cancellation.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod jobs;
pub mod resume;
pub mod skills;

#[cfg(test)]
pub(crate) mod test_backend;


use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

pub use error::ApiError;

use crate::config::{ClientConfig, REQUEST_TIMEOUT};
use crate::navigation::{LOGIN_PATH, Navigator};
use crate::session::SessionStore;

pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build a client for `config.base_url` bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::HttpClientBuild(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::HttpClientBuild(format!("invalid base URL '{}'", config.base_url)));
        }
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base, base_url: config.base_url.clone(), session, navigator })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    #[must_use]
    pub fn auth(&self) -> auth::AuthApi<'_> {
        auth::AuthApi { client: self }
    }

    #[must_use]
    pub fn resume(&self) -> resume::ResumeApi<'_> {
        resume::ResumeApi { client: self }
    }

    #[must_use]
    pub fn jobs(&self) -> jobs::JobsApi<'_> {
        jobs::JobsApi { client: self }
    }

    #[must_use]
    pub fn skills(&self) -> skills::SkillsApi<'_> {
        skills::SkillsApi { client: self }
    }

    #[must_use]
    pub fn dashboard(&self) -> dashboard::DashboardApi<'_> {
        dashboard::DashboardApi { client: self }
    }

    // =========================================================================
    // VERBS
    // =========================================================================
    //
    // `path` is a list of raw segments; each one is percent-encoded on its own,
    // so caller-supplied ids cannot add segments or a query.

    pub(crate) async fn get(&self, path: &[&str]) -> Result<Value, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &[&str],
        query: &Q,
    ) -> Result<Value, ApiError> {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &[&str], body: &B) -> Result<Value, ApiError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_empty(&self, path: &[&str]) -> Result<Value, ApiError> {
        self.execute(self.request(Method::POST, path)).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &[&str],
        form: reqwest::multipart::Form,
    ) -> Result<Value, ApiError> {
        self.execute(self.request(Method::POST, path).multipart(form)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &[&str], body: &B) -> Result<Value, ApiError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized>(&self, path: &[&str], body: &B) -> Result<Value, ApiError> {
        self.execute(self.request(Method::PATCH, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &[&str]) -> Result<Value, ApiError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Base URL with `segments` appended after any path it already has.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this branch always runs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, path: &[&str]) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");
        self.authorize(self.http.request(method, url))
    }

    /// Outbound interceptor.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.get_token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status().as_u16();
        if self.screen(status) {
            // The session is already gone; a body that fails to arrive must
            // not turn this back into a transport error.
            let body = response.text().await.map_or(Value::Null, |text| parse_body(&text));
            return Err(ApiError::Unauthorized { body });
        }
        let body = parse_body(&response.text().await.map_err(ApiError::from_transport)?);
        if (200..300).contains(&status) { Ok(body) } else { Err(ApiError::Status { status, body }) }
    }

    /// Inbound interceptor. Runs on the status line alone, before the body
    /// is read. Returns `true` when the call was a 401 and the session has
    /// been expired.
    fn screen(&self, status: u16) -> bool {
        if status != 401 {
            return false;
        }
        tracing::warn!("backend rejected credentials; clearing session");
        if let Err(e) = self.session.clear_auth() {
            tracing::warn!(error = %e, "failed to clear session after 401");
        }
        self.navigator.hard_redirect(LOGIN_PATH);
        true
    }
}

/// Empty bodies read as `Null`; bodies that are not JSON come back as text.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}
