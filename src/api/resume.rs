//! `/resume/*` endpoints.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{ApiClient, ApiError};

/// Multipart field name the backend reads the upload from.
pub const UPLOAD_FIELD: &str = "file";

pub struct ResumeApi<'a> {
    pub(super) client: &'a ApiClient,
}

/// A resume document ready for upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    #[must_use]
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime: "application/pdf".to_owned(), bytes }
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::InvalidRequest(format!("bad MIME type '{}': {e}", self.mime)))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

impl ResumeApi<'_> {
    /// `POST /resume/upload` (multipart)
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for an unusable MIME type;
    /// otherwise propagates any [`ApiError`] unchanged.
    pub async fn upload(&self, file: ResumeFile) -> Result<Value, ApiError> {
        let form = file.into_form()?;
        self.client.post_multipart(&["resume", "upload"], form).await
    }

    /// `POST /resume/analyze/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn analyze(&self, resume_id: &str) -> Result<Value, ApiError> {
        self.client.post_empty(&["resume", "analyze", resume_id]).await
    }

    /// `GET /resume`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get(&["resume"]).await
    }

    /// `GET /resume/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn get(&self, resume_id: &str) -> Result<Value, ApiError> {
        self.client.get(&["resume", resume_id]).await
    }

    /// `DELETE /resume/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] unchanged.
    pub async fn delete(&self, resume_id: &str) -> Result<Value, ApiError> {
        self.client.delete(&["resume", resume_id]).await
    }
}
