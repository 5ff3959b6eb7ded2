//! `/jobs/*` endpoints.

use serde::Serialize;
use serde_json::{Value, json};

use super::{ApiClient, ApiError};
use crate::jobs::JobStatus;

pub struct JobsApi<'a> {
    pub(super) client: &'a ApiClient,
}

/// Query filters for `GET /jobs`. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl JobsApi<'_> {
    /// `POST /jobs`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn create(&self, job: &Value) -> Result<Value, ApiError> {
        self.client.post(&["jobs"], job).await
    }

    /// `GET /jobs?{filters}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn list(&self, filters: &JobFilters) -> Result<Value, ApiError> {
        self.client.get_with_query(&["jobs"], filters).await
    }

    /// `GET /jobs/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn get(&self, job_id: &str) -> Result<Value, ApiError> {
        self.client.get(&["jobs", job_id]).await
    }

    /// `PUT /jobs/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn update(&self, job_id: &str, job: &Value) -> Result<Value, ApiError> {
        self.client.put(&["jobs", job_id], job).await
    }

    /// `DELETE /jobs/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn delete(&self, job_id: &str) -> Result<Value, ApiError> {
        self.client.delete(&["jobs", job_id]).await
    }

    /// `PATCH /jobs/{id}/status {status}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn update_status(&self, job_id: &str, status: JobStatus) -> Result<Value, ApiError> {
        self.client
            .patch(&["jobs", job_id, "status"], &json!({ "status": status }))
            .await
    }
}
