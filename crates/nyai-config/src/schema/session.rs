//! Conversation session defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Defaults applied to every new conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Model used when a call does not name one. No default.
    pub model: Option<String>,
    /// System prompt sent ahead of the history.
    pub system: String,
    /// Whether exchanges are appended to the history unless a call says otherwise.
    pub remember: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: None,
            system: DEFAULT_SYSTEM_PROMPT.into(),
            remember: true,
        }
    }
}
