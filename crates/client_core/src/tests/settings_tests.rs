use super::*;

#[test]
fn defaults_to_local_api() {
    assert_eq!(Settings::default().api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "api_base_url = \"https://admin.school.test/\"\n");
    assert_eq!(settings.api_base_url, "https://admin.school.test");
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "api_base_url = [");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_settings(&mut settings, |key| match key {
        "ADMIN_API_BASE_URL" => Some("http://plain.test".to_string()),
        "APP__API_BASE_URL" => Some("http://prefixed.test//".to_string()),
        _ => None,
    });
    assert_eq!(settings.api_base_url, "http://prefixed.test");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(normalize_base_url("   "), DEFAULT_API_BASE_URL);
}

#[test]
fn validation_rejects_non_http_urls() {
    assert!(validate_base_url("http://127.0.0.1:8000/api/").is_ok());
    assert!(matches!(
        validate_base_url("mailto:admin@school.test"),
        Err(ClientError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        validate_base_url("not a url"),
        Err(ClientError::InvalidBaseUrl { .. })
    ));
}
