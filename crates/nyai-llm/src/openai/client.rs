//! OpenAI client struct and HTTP plumbing.

use tracing::{debug, error};

use crate::provider::CompletionRequest;
use crate::LlmError;

use super::config::OpenAiConfig;

/// Longest slice of an error body kept in `LlmError::Api`.
const ERROR_BODY_LIMIT: usize = 500;

/// OpenAI-compatible API client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// POST `request` and check the status; the body is left to the caller.
    pub(crate) async fn send(&self, request: &CompletionRequest) -> Result<reqwest::Response, LlmError> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            stream = request.stream,
            "OpenAI API request"
        );

        let mut builder = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(request);
        if let Some(ref org) = self.config.organization {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let message = error_message(response.text().await);
            error!(status = %status, "OpenAI API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

/// Truncated error body, or the reason it could not be read.
fn error_message<E: std::fmt::Display>(body: Result<String, E>) -> String {
    match body {
        Ok(text) => text.chars().take(ERROR_BODY_LIMIT).collect(),
        Err(e) => format!("failed to read error body: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_handles_trailing_slash() {
        let client =
            OpenAiClient::new(OpenAiConfig::new("k").with_base_url("http://localhost:1234/v1/"))
                .unwrap();
        assert_eq!(client.completions_url(), "http://localhost:1234/v1/chat/completions");

        let client = OpenAiClient::new(OpenAiConfig::new("k")).unwrap();
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn error_message_truncates_body() {
        let body = "x".repeat(ERROR_BODY_LIMIT + 20);
        let message = error_message::<String>(Ok(body));
        assert_eq!(message.chars().count(), ERROR_BODY_LIMIT);
    }

    #[test]
    fn error_message_reports_unreadable_body() {
        let message = error_message::<&str>(Err("connection closed"));
        assert_eq!(message, "failed to read error body: connection closed");
    }
}
