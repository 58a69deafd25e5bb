//! OpenAI-compatible chat-completions client.
//!
//! Implements `CompletionProvider` against `{base_url}/chat/completions`,
//! which also covers local servers and gateways speaking the same API.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
