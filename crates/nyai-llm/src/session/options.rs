//! Per-call options and their resolution against session defaults.

use serde_json::{Map, Value};

use crate::lmc::LmcOptions;
use crate::message::{LmcMessage, OneOrMany, Role};

/// Options for one `chat`/`stream` call. Unset values fall back to the
/// session defaults once, when the call starts.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Context to send instead of the session history.
    pub messages: Option<Vec<LmcMessage>>,
    /// System prompt for this call only.
    pub system: Option<String>,
    pub model: Option<String>,
    /// Shorthand for `lmc_input` + `lmc_output`.
    pub lmc: bool,
    /// The message is already canonical.
    pub lmc_input: bool,
    /// Return canonical messages instead of plain text.
    pub lmc_output: bool,
    /// Return the provider's unprocessed response (or chunks).
    pub raw: bool,
    /// Role of the new message; `user` when unset.
    pub role: Option<Role>,
    pub author: Option<String>,
    pub attachments: Option<OneOrMany>,
    pub attachment_types: Option<OneOrMany>,
    pub content_type: Option<String>,
    /// `chat` only: hand the call over to `stream`.
    pub stream: bool,
    pub max_tokens: Option<u32>,
    /// Append the exchange to the history; the session default when unset.
    pub remember: Option<bool>,
    /// Provider-specific request options, passed through untouched.
    pub extra: Map<String, Value>,
}

/// Flags after defaults and shorthands are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedFlags {
    pub lmc_input: bool,
    pub lmc_output: bool,
    pub raw: bool,
    pub stream: bool,
    pub remember: bool,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(mut self, messages: Vec<LmcMessage>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn lmc(mut self) -> Self {
        self.lmc = true;
        self
    }

    pub fn lmc_input(mut self) -> Self {
        self.lmc_input = true;
        self
    }

    pub fn lmc_output(mut self) -> Self {
        self.lmc_output = true;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_attachments(mut self, attachments: impl Into<OneOrMany>) -> Self {
        self.attachments = Some(attachments.into());
        self
    }

    pub fn with_attachment_types(mut self, types: impl Into<OneOrMany>) -> Self {
        self.attachment_types = Some(types.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_remember(mut self, remember: bool) -> Self {
        self.remember = Some(remember);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn resolve(&self, remember_by_default: bool) -> ResolvedFlags {
        ResolvedFlags {
            lmc_input: self.lmc || self.lmc_input,
            lmc_output: self.lmc || self.lmc_output,
            raw: self.raw,
            stream: self.stream,
            remember: self.remember.unwrap_or(remember_by_default),
        }
    }

    pub(crate) fn lmc_options(&self) -> LmcOptions {
        let mut options = LmcOptions::new(self.role.clone().unwrap_or(Role::User));
        options.attachments = self.attachments.clone();
        if let Some(types) = &self.attachment_types {
            options.attachment_types = types.clone();
        }
        if let Some(content_type) = &self.content_type {
            options.content_type = content_type.clone();
        }
        options.author = self.author.clone();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lmc_shorthand_sets_both_directions() {
        let flags = ChatOptions::new().lmc().resolve(true);
        assert!(flags.lmc_input);
        assert!(flags.lmc_output);
    }

    #[test]
    fn remember_falls_back_to_session_default() {
        assert!(ChatOptions::new().resolve(true).remember);
        assert!(!ChatOptions::new().resolve(false).remember);
        assert!(!ChatOptions::new().with_remember(false).resolve(true).remember);
        assert!(ChatOptions::new().with_remember(true).resolve(false).remember);
    }

    #[test]
    fn lmc_options_default_to_user_text() {
        let options = ChatOptions::new().lmc_options();
        assert_eq!(options, LmcOptions::default());
    }

    #[test]
    fn lmc_options_carry_call_settings() {
        let options = ChatOptions::new()
            .with_role(Role::Assistant)
            .with_author("bot")
            .with_attachments("u1")
            .with_attachment_types("audio_url")
            .with_content_type("input_text")
            .lmc_options();
        assert_eq!(options.role, Role::Assistant);
        assert_eq!(options.author.as_deref(), Some("bot"));
        assert_eq!(options.attachments, Some(OneOrMany::One("u1".into())));
        assert_eq!(options.attachment_types, OneOrMany::One("audio_url".into()));
        assert_eq!(options.content_type, "input_text");
    }
}
