//! Incremental exchanges.

use async_stream::stream;
use futures_util::StreamExt;
use tracing::debug;

use crate::message::{LmcMessage, MessageInput};
use crate::LlmError;

use super::manager::{Prepared, Session};
use super::options::ChatOptions;
use super::output::{ChatStream, LmcChunk, StreamOutput};

impl Session {
    /// Send `message` and return the reply as a lazy stream of increments.
    ///
    /// When the exchange is remembered, the user message is appended as soon
    /// as the provider accepts the request and the assistant message once the
    /// stream is exhausted. Dropping the stream early, or a transport error
    /// mid-stream, leaves the user turn without a reply in the history.
    pub async fn stream(
        &mut self,
        message: impl Into<MessageInput>,
        options: ChatOptions,
    ) -> Result<ChatStream<'_>, LlmError> {
        let prepared = self.prepare(message.into(), &options)?;
        self.open_stream(prepared).await
    }

    pub(super) async fn open_stream(
        &mut self,
        prepared: Prepared,
    ) -> Result<ChatStream<'_>, LlmError> {
        let Prepared {
            message,
            mut request,
            flags,
        } = prepared;
        request.stream = true;

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "stream request"
        );
        let mut chunks = self.provider.complete_streaming(&request).await?;

        if flags.remember {
            self.history.push(message);
        }
        let history = &mut self.history;

        Ok(Box::pin(stream! {
            let mut completion = String::new();

            while let Some(chunk) = chunks.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };
                let increment = chunk.delta_text().to_string();
                completion.push_str(&increment);

                if flags.lmc_output {
                    yield Ok(StreamOutput::Lmc(LmcChunk {
                        message: LmcMessage::assistant(completion.clone()),
                        chunk: increment,
                    }));
                } else if flags.raw {
                    yield Ok(StreamOutput::Raw(chunk));
                } else {
                    yield Ok(StreamOutput::Text(increment));
                }
            }

            debug!(chars = completion.len(), "stream finished");
            if flags.remember {
                history.push(LmcMessage::assistant(completion));
            }
        }))
    }
}
