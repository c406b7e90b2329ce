//! OpenAI chat completions backend

use super::BackendSettings;
use super::http::{endpoint, send_json};
use async_trait::async_trait;
use consensus_application::{GatewayError, LlmBackend};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String, GatewayError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".to_string()))
    }
}

/// Single-turn `POST /v1/chat/completions` with bearer authentication
pub struct OpenAiBackend {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl OpenAiBackend {
    pub fn new(client: reqwest::Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    fn describe(&self) -> String {
        format!("openai/{}", self.settings.model)
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.settings.max_tokens,
        };

        debug!(model = %self.settings.model, "Sending chat completion request");

        let request = self
            .client
            .post(endpoint(&self.settings.base_url, "/v1/chat/completions"))
            .bearer_auth(&self.settings.api_key)
            .json(&body);

        send_json::<ChatResponse>(request).await?.into_text()
    }
}
