//! Conversational sessions over an OpenAI-style chat-completion API.
//!
//! Provides:
//! - Canonical ("LMC") messages and the normalizer that builds them
//! - A `Session` keeping the running history, with single-shot `chat`
//!   and incremental `stream` calls
//! - The `CompletionProvider` seam plus an OpenAI-compatible HTTP client
//! - A lazy Server-Sent Events parser

pub mod lmc;
pub mod message;
pub mod openai;
pub mod provider;
pub mod session;
pub mod streaming;

pub use lmc::{to_canonical, to_wire, LmcOptions};
pub use message::{Content, ContentPart, LmcMessage, MessageInput, OneOrMany, PartPayload, Role, WireMessage};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use provider::{
    ChunkStream, CompletionChunk, CompletionProvider, CompletionRequest, CompletionResponse,
};
pub use session::{ChatOptions, ChatOutput, ChatReply, ChatStream, LmcChunk, Session, StreamOutput};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),
    #[error("Model param is missing: set a session default or pass one per call")]
    MissingModel,
    #[error("Provider returned no completion choices")]
    EmptyResponse,
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Stream error: {0}")]
    Stream(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<LlmError> for nyai_common::NyaiError {
    fn from(err: LlmError) -> Self {
        nyai_common::NyaiError::Llm(err.to_string())
    }
}
