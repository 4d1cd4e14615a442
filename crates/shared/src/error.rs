use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the admin API on a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDetail {
    /// Best-effort decode of an error body; anything unparseable yields no detail.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
#[error("HTTP {status}: {}", detail.as_deref().unwrap_or("no detail"))]
pub struct ApiException {
    pub status: u16,
    pub detail: Option<String>,
}

impl ApiException {
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }
}
