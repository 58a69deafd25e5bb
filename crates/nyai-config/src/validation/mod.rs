//! Full configuration validation.
//!
//! Each section has its own check; errors are collected into a single
//! `ConfigError` so the user sees every problem at once.

mod helpers;

#[cfg(test)]
mod tests;

use nyai_common::ConfigError;

use crate::schema::NyaiConfig;

use helpers::validate_range;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NyaiConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_session(&mut errors, config);
    validate_provider(&mut errors, config);
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_session(errors: &mut Vec<String>, config: &NyaiConfig) {
    if let Some(model) = &config.session.model {
        if model.trim().is_empty() {
            errors.push("session.model must not be empty when set".into());
        }
    }
}

fn validate_provider(errors: &mut Vec<String>, config: &NyaiConfig) {
    let provider = &config.provider;
    if !(provider.base_url.starts_with("http://") || provider.base_url.starts_with("https://")) {
        errors.push(format!(
            "provider.base_url = {:?} must start with http:// or https://",
            provider.base_url
        ));
    }
    if provider.api_key_env.trim().is_empty() {
        errors.push("provider.api_key_env must not be empty".into());
    }
    validate_range(
        errors,
        "provider.connect_timeout_secs",
        provider.connect_timeout_secs,
        1,
        600,
    );
    validate_range(errors, "provider.timeout_secs", provider.timeout_secs, 1, 600);
}

fn validate_logging(errors: &mut Vec<String>, config: &NyaiConfig) {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = {:?} must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}
