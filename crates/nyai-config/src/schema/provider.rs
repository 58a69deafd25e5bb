//! Completion provider connection settings.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible endpoint settings.
///
/// The API key itself never lives in the file; `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub organization: Option<String>,
    pub connect_timeout_secs: u32,
    pub timeout_secs: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            organization: None,
            connect_timeout_secs: 10,
            timeout_secs: 120,
        }
    }
}
