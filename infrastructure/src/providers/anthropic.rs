//! Anthropic messages backend

use super::BackendSettings;
use super::http::{endpoint, send_json};
use async_trait::async_trait;
use consensus_application::{GatewayError, LlmBackend};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// `max_tokens` is mandatory for this API; used when the agent sets none
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Concatenate all text blocks
    fn into_text(self) -> Result<String, GatewayError> {
        let mut text_blocks = self
            .content
            .into_iter()
            .filter(|b| b.kind == "text")
            .filter_map(|b| b.text)
            .peekable();

        if text_blocks.peek().is_none() {
            return Err(GatewayError::MalformedResponse(
                "no text content in response".to_string(),
            ));
        }

        Ok(text_blocks.collect())
    }
}

/// Single-turn `POST /v1/messages` authenticated with `x-api-key`
pub struct AnthropicBackend {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl AnthropicBackend {
    pub fn new(client: reqwest::Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl LlmBackend for AnthropicBackend {
    fn describe(&self) -> String {
        format!("anthropic/{}", self.settings.model)
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.settings.model, max_tokens = body.max_tokens, "Sending messages request");

        let request = self
            .client
            .post(endpoint(&self.settings.base_url, "/v1/messages"))
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        send_json::<MessagesResponse>(request).await?.into_text()
    }
}
