//! Single-shot exchanges.

use tracing::debug;

use crate::message::{LmcMessage, MessageInput};
use crate::LlmError;

use super::manager::Session;
use super::options::ChatOptions;
use super::output::{ChatOutput, ChatReply};

impl Session {
    /// Send `message` and wait for the full reply.
    ///
    /// With `options.stream` the call is handed to the streaming path after
    /// normalization and a [`ChatReply::Streaming`] is returned instead.
    ///
    /// When the exchange is remembered, the user message and the assistant
    /// reply are appended together after the provider answered; a failed
    /// request leaves the history untouched.
    pub async fn chat(
        &mut self,
        message: impl Into<MessageInput>,
        options: ChatOptions,
    ) -> Result<ChatReply<'_>, LlmError> {
        let prepared = self.prepare(message.into(), &options)?;
        if prepared.flags.stream {
            return self.open_stream(prepared).await.map(ChatReply::Streaming);
        }

        debug!(
            model = %prepared.request.model,
            messages = prepared.request.messages.len(),
            "chat request"
        );
        let response = self.provider.complete(&prepared.request).await?;
        let completion = response
            .completion_text()
            .ok_or(LlmError::EmptyResponse)?
            .to_string();
        let reply = LmcMessage::assistant(completion.clone());
        let flags = prepared.flags;

        if flags.remember {
            self.history.push(prepared.message);
            self.history.push(reply.clone());
            if flags.lmc_output {
                return Ok(ChatReply::Complete(ChatOutput::Lmc(reply)));
            }
        }

        let output = if flags.raw {
            ChatOutput::Raw(response)
        } else if flags.lmc_output {
            ChatOutput::Lmc(reply)
        } else {
            ChatOutput::Text(completion)
        };
        Ok(ChatReply::Complete(output))
    }
}
