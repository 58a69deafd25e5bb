//! Session struct and conversation state.

use std::fmt;
use std::sync::Arc;

use crate::lmc::to_canonical;
use crate::message::{LmcMessage, MessageInput};
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::LlmError;

use super::options::{ChatOptions, ResolvedFlags};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// A conversation with a completion provider.
///
/// Calls take `&mut self`, so one session serves one exchange at a time;
/// run independent sessions for concurrent conversations.
pub struct Session {
    pub(super) provider: Arc<dyn CompletionProvider>,
    /// Conversation message history, in canonical form.
    pub(super) history: Vec<LmcMessage>,
    /// Sent as the first message of every request unless a call overrides it.
    pub(super) system_prompt: String,
    pub(super) default_model: Option<String>,
    pub(super) remember_by_default: bool,
}

/// A call after normalization and default resolution, ready to send.
pub(super) struct Prepared {
    pub message: LmcMessage,
    pub request: CompletionRequest,
    pub flags: ResolvedFlags,
}

impl Session {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            history: Vec::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            default_model: None,
            remember_by_default: true,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_history(mut self, history: Vec<LmcMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_remember(mut self, remember: bool) -> Self {
        self.remember_by_default = remember;
        self
    }

    /// Normalize the message, resolve model and flags, and assemble the
    /// outbound request. Fails before any provider interaction.
    pub(super) fn prepare(
        &self,
        message: MessageInput,
        options: &ChatOptions,
    ) -> Result<Prepared, LlmError> {
        let flags = options.resolve(self.remember_by_default);

        let message = match message {
            MessageInput::Canonical(message) => message,
            MessageInput::PlainText(_) if flags.lmc_input => {
                return Err(LlmError::Validation(
                    "lmc_input is set but the message is plain text".into(),
                ));
            }
            text @ MessageInput::PlainText(_) => to_canonical(text, &options.lmc_options())?,
        };

        let model = options
            .model
            .clone()
            .or_else(|| self.default_model.clone())
            .ok_or(LlmError::MissingModel)?;

        let system = LmcMessage::system(
            options
                .system
                .clone()
                .unwrap_or_else(|| self.system_prompt.clone()),
        );
        let context = options.messages.as_deref().unwrap_or(&self.history);

        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.push(system.to_wire());
        messages.extend(context.iter().map(LmcMessage::to_wire));
        messages.push(message.to_wire());

        Ok(Prepared {
            message,
            request: CompletionRequest {
                model,
                messages,
                stream: flags.stream,
                max_tokens: options.max_tokens,
                extra: options.extra.clone(),
            },
            flags,
        })
    }

    /// Get the full conversation history.
    pub fn history(&self) -> &[LmcMessage] {
        &self.history
    }

    /// Replace the history wholesale.
    pub fn set_history(&mut self, history: Vec<LmcMessage>) {
        self.history = history;
    }

    /// Clear conversation history.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Number of messages in history.
    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Change the stored system prompt for all later calls.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = prompt.into();
    }

    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    pub fn set_default_model(&mut self, model: Option<String>) {
        self.default_model = model;
    }

    pub fn remember_by_default(&self) -> bool {
        self.remember_by_default
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history.len())
            .field("system_prompt", &self.system_prompt)
            .field("default_model", &self.default_model)
            .field("remember_by_default", &self.remember_by_default)
            .finish_non_exhaustive()
    }
}
