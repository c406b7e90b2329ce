//! Agent configuration from TOML (`[[agents]]` array)
//!
//! Each entry names one participant, the provider API that backs it and the
//! model to ask. Order in the file is registration order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider API backing an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages
    Anthropic,
    /// Google Gemini generateContent
    Gemini,
}

impl ProviderKind {
    /// Environment variable read for the API key when the entry names none
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_enabled() -> bool {
    true
}

/// One `[[agents]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAgentConfig {
    /// Display name, also the agent's identity in prompts
    pub name: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Environment variable holding the API key (provider default if absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Override of the provider's API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FileAgentConfig {
    pub fn new(name: impl Into<String>, provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider,
            model: model.into(),
            api_key_env: None,
            base_url: None,
            max_tokens: None,
            enabled: true,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

/// The three agents used when no `[[agents]]` are configured.
pub fn default_agents() -> Vec<FileAgentConfig> {
    vec![
        FileAgentConfig::new("ChatGPT", ProviderKind::OpenAi, "gpt-4o-mini-2024-07-18"),
        FileAgentConfig::new("Gemini", ProviderKind::Gemini, "gemini-2.0-flash"),
        FileAgentConfig::new("Claude", ProviderKind::Anthropic, "claude-3-5-haiku-latest")
            .with_max_tokens(1000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_agents_order() {
        let names: Vec<_> = default_agents().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["ChatGPT", "Gemini", "Claude"]);
    }

    #[test]
    fn test_provider_defaults() {
        let agent = FileAgentConfig::new("x", ProviderKind::Anthropic, "m");
        assert_eq!(agent.api_key_env(), "ANTHROPIC_API_KEY");
        assert_eq!(agent.base_url(), "https://api.anthropic.com");
    }

    #[test]
    fn test_overrides() {
        let toml_str = r#"
[[agents]]
name = "Local"
provider = "openai"
model = "llama3"
api_key_env = "LOCAL_KEY"
base_url = "http://localhost:11434"
enabled = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let agent = &config.agents[0];
        assert_eq!(agent.provider, ProviderKind::OpenAi);
        assert_eq!(agent.api_key_env(), "LOCAL_KEY");
        assert_eq!(agent.base_url(), "http://localhost:11434");
        assert!(!agent.enabled);
        assert_eq!(agent.max_tokens, None);
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let toml_str = r#"
[[agents]]
name = "G"
provider = "gemini"
model = "gemini-2.0-flash"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.agents[0].enabled);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let toml_str = r#"
[[agents]]
name = "X"
provider = "mistral"
model = "m"
"#;
        let result: Result<super::super::FileConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }
}
