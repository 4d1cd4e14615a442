use std::fs;

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const SETTINGS_FILE: &str = "admin_client.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
}

/// Defaults, then `admin_client.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_settings(&mut settings, &raw);
    }
    apply_env_settings(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_settings(settings: &mut Settings, raw: &str) {
    match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.api_base_url {
                settings.api_base_url = normalize_base_url(&v);
            }
        }
        Err(err) => tracing::warn!("ignoring malformed {SETTINGS_FILE}: {err}"),
    }
}

pub(crate) fn apply_env_settings(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("ADMIN_API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v);
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v);
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().api_base_url;
    }
    trimmed.to_string()
}

/// Rejects anything that cannot carry path segments (e.g. `mailto:`).
pub fn validate_base_url(raw: &str) -> Result<String, ClientError> {
    let normalized = normalize_base_url(raw);
    let parsed = Url::parse(&normalized).map_err(|err| ClientError::InvalidBaseUrl {
        url: normalized.clone(),
        reason: err.to_string(),
    })?;
    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: normalized,
            reason: "expected an http or https URL".to_string(),
        });
    }
    Ok(normalized)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
