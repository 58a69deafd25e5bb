//! Conversation session management.
//!
//! A `Session` holds the conversation history, the system prompt and the
//! call defaults, and runs single-shot (`chat`) or incremental (`stream`)
//! exchanges against a completion provider.

mod chat;
mod manager;
mod options;
mod output;
mod stream;


pub use manager::{Session, DEFAULT_SYSTEM_PROMPT};
pub use options::ChatOptions;
pub use output::{ChatOutput, ChatReply, ChatStream, LmcChunk, StreamOutput};
