//! nyai configuration.
//!
//! TOML-based configuration for session defaults, the completion provider
//! and logging. Every section uses serde defaults, so a partial (or empty)
//! file works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let config = nyai_config::load_config(None).expect("failed to load config");
//! println!("{}", nyai_config::config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LoggingConfig, NyaiConfig, ProviderConfig, SessionConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{create_default_config, default_config_path, load_default, load_from_path};

use std::path::Path;

use nyai_common::ConfigError;

/// Load config from `path`, or from the platform default location when
/// `path` is `None`, then validate it.
pub fn load_config(path: Option<&Path>) -> Result<NyaiConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &NyaiConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
