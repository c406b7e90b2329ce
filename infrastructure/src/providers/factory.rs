//! Agent registry construction from configuration
//!
//! Selection, API key resolution and backend wiring. All missing keys are
//! collected and reported together before any agent is built.

use super::{AnthropicBackend, BackendSettings, GeminiBackend, OpenAiBackend};
use crate::config::{FileAgentConfig, ProviderKind};
use consensus_application::{AgentRegistry, BackendAgent, LlmBackend};
use consensus_domain::{AgentId, DomainError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors while turning configuration into agents
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(
        "Missing API keys: {}. Please set these environment variables in a .env file or your shell",
        .0.join(", ")
    )]
    MissingApiKeys(Vec<String>),

    #[error("Unknown agent '{name}' (configured: {configured})")]
    UnknownAgent { name: String, configured: String },

    #[error("No agents selected")]
    NoAgentsSelected,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Pick the agents taking part in a run.
///
/// With an empty `names` list every enabled agent is used. Otherwise each
/// name must match a configured agent (case-insensitively, enabled or not).
/// The configured order is kept either way.
pub fn select_agents<'a>(
    agents: &'a [FileAgentConfig],
    names: &[String],
) -> Result<Vec<&'a FileAgentConfig>, ProviderError> {
    let selected: Vec<&FileAgentConfig> = if names.is_empty() {
        agents.iter().filter(|a| a.enabled).collect()
    } else {
        if let Some(unknown) = names
            .iter()
            .find(|n| !agents.iter().any(|a| a.name.eq_ignore_ascii_case(n)))
        {
            return Err(ProviderError::UnknownAgent {
                name: unknown.clone(),
                configured: agents
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        agents
            .iter()
            .filter(|a| names.iter().any(|n| a.name.eq_ignore_ascii_case(n)))
            .collect()
    };

    if selected.is_empty() {
        return Err(ProviderError::NoAgentsSelected);
    }
    Ok(selected)
}

/// Builds provider-backed agents sharing one HTTP client
pub struct AgentFactory {
    client: reqwest::Client,
}

impl AgentFactory {
    pub fn new() -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("llm-consensus/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Build a registry, reading API keys from the process environment.
    pub fn build_registry(
        &self,
        agents: &[FileAgentConfig],
        names: &[String],
    ) -> Result<AgentRegistry, ProviderError> {
        self.build_registry_with(agents, names, |var| std::env::var(var).ok())
    }

    /// Build a registry with an explicit API key lookup.
    ///
    /// Blank values count as missing.
    pub fn build_registry_with<F>(
        &self,
        agents: &[FileAgentConfig],
        names: &[String],
        lookup: F,
    ) -> Result<AgentRegistry, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let selected = select_agents(agents, names)?;

        let mut missing: Vec<String> = Vec::new();
        let mut keyed = Vec::with_capacity(selected.len());
        for agent in selected {
            let var = agent.api_key_env();
            match lookup(var).filter(|k| !k.trim().is_empty()) {
                Some(key) => keyed.push((agent, key)),
                None => {
                    if !missing.iter().any(|m| m == var) {
                        missing.push(var.to_string());
                    }
                }
            }
        }
        if !missing.is_empty() {
            return Err(ProviderError::MissingApiKeys(missing));
        }

        let mut registry = AgentRegistry::new();
        for (agent, key) in keyed {
            let backend = self.create_backend(agent, key);
            debug!(agent = %agent.name, backend = %backend.describe(), "Registering agent");
            registry.register(
                AgentId::new(agent.name.as_str())?,
                Arc::new(BackendAgent::new(backend)),
            )?;
        }

        info!(
            "Registered {} agents: {}",
            registry.len(),
            registry
                .ids()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(registry)
    }

    fn create_backend(&self, agent: &FileAgentConfig, api_key: String) -> Arc<dyn LlmBackend> {
        let settings = BackendSettings::new(agent.model.as_str(), api_key, agent.base_url())
            .with_max_tokens(agent.max_tokens);
        let client = self.client.clone();

        match agent.provider {
            ProviderKind::OpenAi => Arc::new(OpenAiBackend::new(client, settings)),
            ProviderKind::Anthropic => Arc::new(AnthropicBackend::new(client, settings)),
            ProviderKind::Gemini => Arc::new(GeminiBackend::new(client, settings)),
        }
    }
}
