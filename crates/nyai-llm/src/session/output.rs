//! Result shapes of `chat` and `stream`.

use std::fmt;
use std::pin::Pin;

use futures_util::Stream;
use serde::{Deserialize, Serialize};

use crate::message::LmcMessage;
use crate::provider::{CompletionChunk, CompletionResponse};
use crate::LlmError;

/// What a completed `chat` call returns, chosen by the call's flags.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutput {
    Text(String),
    Lmc(LmcMessage),
    Raw(CompletionResponse),
}

impl ChatOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ChatOutput::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_lmc(self) -> Option<LmcMessage> {
        match self {
            ChatOutput::Lmc(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_raw(self) -> Option<CompletionResponse> {
        match self {
            ChatOutput::Raw(response) => Some(response),
            _ => None,
        }
    }
}

/// Canonical snapshot of the assistant message so far, plus the increment
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmcChunk {
    #[serde(flatten)]
    pub message: LmcMessage,
    pub chunk: String,
}

/// One item of a streamed reply.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutput {
    Text(String),
    Lmc(LmcChunk),
    Raw(CompletionChunk),
}

impl StreamOutput {
    /// The increment carried by this item.
    pub fn increment(&self) -> &str {
        match self {
            StreamOutput::Text(text) => text,
            StreamOutput::Lmc(chunk) => &chunk.chunk,
            StreamOutput::Raw(chunk) => chunk.delta_text(),
        }
    }
}

/// Lazy, single-pass reply stream. It borrows the session so it can record
/// the assistant turn once the provider is done.
pub type ChatStream<'a> = Pin<Box<dyn Stream<Item = Result<StreamOutput, LlmError>> + Send + 'a>>;

/// `chat` result: a finished reply, or a stream when the call asked for one.
pub enum ChatReply<'a> {
    Complete(ChatOutput),
    Streaming(ChatStream<'a>),
}

impl<'a> ChatReply<'a> {
    pub fn into_output(self) -> Option<ChatOutput> {
        match self {
            ChatReply::Complete(output) => Some(output),
            ChatReply::Streaming(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<ChatStream<'a>> {
        match self {
            ChatReply::Complete(_) => None,
            ChatReply::Streaming(stream) => Some(stream),
        }
    }
}

impl fmt::Debug for ChatReply<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatReply::Complete(output) => f.debug_tuple("Complete").field(output).finish(),
            ChatReply::Streaming(_) => f.write_str("Streaming(..)"),
        }
    }
}
