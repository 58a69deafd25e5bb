//! The completion provider seam and its OpenAI-shaped request/response types.
//!
//! Unknown response fields are kept in `extra` so a raw response handed
//! back to the caller is what the provider sent.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::message::{Role, WireMessage};
use crate::LlmError;

/// Lazily delivered completion chunks, in provider order.
pub type ChunkStream = BoxStream<'static, Result<CompletionChunk, LlmError>>;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit one request and wait for the whole completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Open a streaming request. Chunks are only pulled from the transport
    /// as the returned stream is polled.
    async fn complete_streaming(&self, request: &CompletionRequest)
        -> Result<ChunkStream, LlmError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Provider-specific options (temperature, top_p, ...), sent as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full (non-streamed) completion response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompletionResponse {
    /// A response with a single assistant choice.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: ResponseMessage {
                    role: Some(Role::Assistant),
                    content: Some(content.into()),
                },
                finish_reason: Some("stop".into()),
                ..Choice::default()
            }],
            ..Self::default()
        }
    }

    /// Text of the first choice; `None` when there is no choice at all.
    pub fn completion_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: Delta,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One increment of a streamed completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompletionChunk {
    /// A chunk carrying `content` as its only delta.
    pub fn with_delta(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ChunkChoice {
                delta: Delta {
                    role: None,
                    content: Some(content.into()),
                },
                ..ChunkChoice::default()
            }],
            ..Self::default()
        }
    }

    /// Incremental text of the first choice. Control chunks (role-only,
    /// finish markers, usage) yield an empty string.
    pub fn delta_text(&self) -> &str {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_flattens_extra_options() {
        let mut extra = Map::new();
        extra.insert("temperature".into(), json!(0.2));
        let request = CompletionRequest {
            model: "m1".into(),
            messages: vec![],
            stream: false,
            max_tokens: None,
            extra,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"model": "m1", "messages": [], "stream": false, "temperature": 0.2})
        );
    }

    #[test]
    fn response_keeps_unknown_fields() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "m1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop",
                "logprobs": null
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
        }))
        .unwrap();

        assert_eq!(response.completion_text(), Some("Hello!"));
        assert_eq!(response.extra["object"], json!("chat.completion"));
        assert!(response.choices[0].extra.contains_key("logprobs"));
        assert_eq!(response.usage.as_ref().unwrap().total_tokens, 12);
    }

    #[test]
    fn null_content_reads_as_empty_text() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(response.completion_text(), Some(""));
        assert_eq!(CompletionResponse::default().completion_text(), None);
    }

    #[test]
    fn control_chunks_have_empty_delta() {
        let role_only: CompletionChunk = serde_json::from_value(json!({
            "choices": [{"index": 0, "delta": {"role": "assistant"}}]
        }))
        .unwrap();
        assert_eq!(role_only.delta_text(), "");

        let finish: CompletionChunk = serde_json::from_value(json!({
            "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
        }))
        .unwrap();
        assert_eq!(finish.delta_text(), "");

        let usage_only: CompletionChunk =
            serde_json::from_value(json!({"choices": [], "usage": {"total_tokens": 4}})).unwrap();
        assert_eq!(usage_only.delta_text(), "");
    }

    #[test]
    fn with_delta_builds_text_chunk() {
        assert_eq!(CompletionChunk::with_delta("Hel").delta_text(), "Hel");
    }
}
