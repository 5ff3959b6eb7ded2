//! `/dashboard/*` endpoints.

use serde_json::Value;

use super::{ApiClient, ApiError};

pub struct DashboardApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl DashboardApi<'_> {
    /// `GET /dashboard/stats`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn stats(&self) -> Result<Value, ApiError> {
        self.client.get(&["dashboard", "stats"]).await
    }

    /// `GET /dashboard/progress`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn progress(&self) -> Result<Value, ApiError> {
        self.client.get(&["dashboard", "progress"]).await
    }

    /// `GET /dashboard/activity`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn activity(&self) -> Result<Value, ApiError> {
        self.client.get(&["dashboard", "activity"]).await
    }
}
