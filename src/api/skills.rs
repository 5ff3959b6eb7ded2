//! `/skills/*` endpoints.

use serde_json::Value;

use super::{ApiClient, ApiError};

pub struct SkillsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl SkillsApi<'_> {
    /// `GET /skills`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get(&["skills"]).await
    }

    /// `GET /skills/user`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn user_skills(&self) -> Result<Value, ApiError> {
        self.client.get(&["skills", "user"]).await
    }

    /// `POST /skills`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn add(&self, skill: &Value) -> Result<Value, ApiError> {
        self.client.post(&["skills"], skill).await
    }

    /// `DELETE /skills/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn delete(&self, skill_id: &str) -> Result<Value, ApiError> {
        self.client.delete(&["skills", skill_id]).await
    }
}
