//! CompletionProvider implementation for OpenAiClient (complete + streaming).

use async_stream::stream;
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};

use crate::provider::{ChunkStream, CompletionChunk, CompletionProvider, CompletionRequest, CompletionResponse};
use crate::streaming::{response_events, SseEvent};
use crate::LlmError;

use super::client::OpenAiClient;

const DONE_MARKER: &str = "[DONE]";

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let response = self.send(request).await?;
        response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))
    }

    async fn complete_streaming(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, LlmError> {
        let response = self.send(request).await?;
        Ok(chunk_stream(response_events(response)))
    }
}

/// Decode chat-completion chunks from SSE events, stopping at `[DONE]`.
pub(crate) fn chunk_stream<S>(events: S) -> ChunkStream
where
    S: Stream<Item = Result<SseEvent, LlmError>> + Send + 'static,
{
    Box::pin(stream! {
        futures_util::pin_mut!(events);
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            let data = event.data.trim();
            if data == DONE_MARKER {
                break;
            }
            yield decode_chunk(data);
        }
    })
}

fn decode_chunk(data: &str) -> Result<CompletionChunk, LlmError> {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|e| LlmError::Parse(e.to_string()))?;
    if let Some(err) = value.get("error") {
        let message = err
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| err.to_string());
        return Err(LlmError::Stream(message));
    }
    serde_json::from_value(value).map_err(|e| LlmError::Parse(e.to_string()))
}
