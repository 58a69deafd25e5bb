//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&NyaiConfig::default()).is_ok());
}

#[test]
fn catches_non_http_base_url() {
    let mut config = NyaiConfig::default();
    config.provider.base_url = "ftp://example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.base_url"));
}

#[test]
fn catches_timeout_out_of_range() {
    let mut config = NyaiConfig::default();
    config.provider.timeout_secs = 601;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.timeout_secs"));
}

#[test]
fn catches_empty_api_key_env() {
    let mut config = NyaiConfig::default();
    config.provider.api_key_env = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.api_key_env"));
}

#[test]
fn catches_blank_model() {
    let mut config = NyaiConfig::default();
    config.session.model = Some(String::new());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.model"));
}

#[test]
fn log_level_is_case_insensitive() {
    let mut config = NyaiConfig::default();
    config.logging.level = "DEBUG".into();
    assert!(validate(&config).is_ok());

    config.logging.level = "verbose".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("logging.level"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = NyaiConfig::default();
    config.provider.connect_timeout_secs = 0;
    config.logging.level = "nope".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("provider.connect_timeout_secs"));
    assert!(err.contains("logging.level"));
    assert!(err.contains("; "));
}
