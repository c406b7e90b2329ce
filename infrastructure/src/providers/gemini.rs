//! Google Gemini generateContent backend

use super::BackendSettings;
use super::http::{endpoint, send_json};
use async_trait::async_trait;
use consensus_application::{GatewayError, LlmBackend};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, GatewayError> {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        let text: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            return Err(GatewayError::MalformedResponse(
                "no candidate text in response".to_string(),
            ));
        }
        Ok(text.concat())
    }
}

/// Single-turn `POST /v1beta/models/{model}:generateContent`
///
/// The key travels in the `x-goog-api-key` header so it never ends up in a
/// logged URL.
pub struct GeminiBackend {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl GeminiBackend {
    pub fn new(client: reqwest::Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    fn describe(&self) -> String {
        format!("gemini/{}", self.settings.model)
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: self
                .settings
                .max_tokens
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        };

        debug!(model = %self.settings.model, "Sending generateContent request");

        let path = format!("/v1beta/models/{}:generateContent", self.settings.model);
        let request = self
            .client
            .post(endpoint(&self.settings.base_url, &path))
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body);

        send_json::<GenerateResponse>(request).await?.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::http::stub::{serve_once, stub_client};

    #[test]
    fn test_request_body() {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: "hi" }],
            }],
            generation_config: Some(GenerationConfig {
                max_output_tokens: 64,
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 64);
    }

    #[test]
    fn test_response_concatenates_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"False\n"},{"text":"it depends"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "False\nit depends");
    }

    #[test]
    fn test_blocked_response() {
        // Safety-blocked prompts come back without candidates
        let response: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_against_stub() {
        let (base_url, request) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"True\nok"}]}}]}"#,
        )
        .await;
        let backend = GeminiBackend::new(
            stub_client(),
            BackendSettings::new("gemini-2.0-flash", "g-test", base_url),
        );

        assert_eq!(backend.complete("q").await.unwrap(), "True\nok");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: g-test"));
    }
}
