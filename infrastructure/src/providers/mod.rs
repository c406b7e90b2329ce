//! LLM provider backends
//!
//! Each backend implements [`LlmBackend`](consensus_application::LlmBackend)
//! for one HTTP API. [`AgentFactory`] turns `[[agents]]` configuration into
//! a ready [`AgentRegistry`](consensus_application::AgentRegistry).

pub mod anthropic;
pub mod factory;
pub mod gemini;
mod http;
pub mod openai;

pub use anthropic::AnthropicBackend;
pub use factory::{AgentFactory, ProviderError, select_agents};
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

use std::fmt;

/// Connection settings shared by all backends
#[derive(Clone)]
pub struct BackendSettings {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub max_tokens: Option<u32>,
}

impl BackendSettings {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let settings = BackendSettings::new("m", "sk-secret", "http://x");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
