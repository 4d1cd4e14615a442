use std::path::PathBuf;

use shared::error::ApiException;
use thiserror::Error;

pub const LOOKUP_FAILED: &str = "Student not found or API error";
pub const ENROLLMENT_FAILED: &str = "Enrollment failed";
pub const STUDENT_ID_REQUIRED: &str = "Please enter a Student ID";

/// Transport-level failure talking to the admin API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ClientError {
    /// Server-provided `detail` text, when the API answered with one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api(api) => api.detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(api) => Some(api.status),
            ClientError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("Please enter a Student ID")]
    Validation,
    #[error("Student not found or API error")]
    Lookup(#[source] ClientError),
    #[error("{message}")]
    Commit {
        message: String,
        #[source]
        source: ClientError,
    },
}

impl EnrollmentError {
    pub(crate) fn commit(source: ClientError) -> Self {
        let message = source
            .detail()
            .map(str::to_owned)
            .unwrap_or_else(|| ENROLLMENT_FAILED.to_string());
        EnrollmentError::Commit { message, source }
    }
}

/// Request-level failure of a batch upload. Per-file rejections are not errors.
#[derive(Debug, Error)]
#[error("Upload failed: {message}")]
pub struct UploadError {
    pub message: String,
    #[source]
    pub source: ClientError,
}

impl From<ClientError> for UploadError {
    fn from(source: ClientError) -> Self {
        let message = source
            .detail()
            .map(str::to_owned)
            .unwrap_or_else(|| source.to_string());
        Self { message, source }
    }
}
