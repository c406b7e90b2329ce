//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod consensus;
mod output;

pub use agents::{FileAgentConfig, ProviderKind, default_agents};
pub use consensus::FileConsensusConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use consensus_domain::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("consensus.max_iterations must be at least 1")]
    InvalidMaxIterations,

    #[error("consensus.agent_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("no enabled agents configured")]
    NoEnabledAgents,

    #[error("invalid agent name '{0}'")]
    InvalidAgentName(String),

    #[error("agent '{0}' is configured more than once")]
    DuplicateAgent(String),

    #[error("model name cannot be empty (agent '{0}')")]
    EmptyModelName(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Convergence loop settings
    pub consensus: FileConsensusConfig,
    /// Participating agents, in registration order
    pub agents: Vec<FileAgentConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            consensus: FileConsensusConfig::default(),
            agents: default_agents(),
            output: FileOutputConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.consensus.max_iterations == 0 {
            return Err(ConfigValidationError::InvalidMaxIterations);
        }

        if self.consensus.agent_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if AgentId::new(agent.name.as_str()).is_err() {
                return Err(ConfigValidationError::InvalidAgentName(agent.name.clone()));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigValidationError::DuplicateAgent(agent.name.clone()));
            }
            if agent.model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(agent.name.clone()));
            }
        }

        if self.enabled_agents().next().is_none() {
            return Err(ConfigValidationError::NoEnabledAgents);
        }

        Ok(())
    }

    /// Agents taking part in a run, in registration order.
    pub fn enabled_agents(&self) -> impl Iterator<Item = &FileAgentConfig> {
        self.agents.iter().filter(|a| a.enabled)
    }

    /// Render the effective configuration (for `--show-config`)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[consensus]
max_iterations = 3
agent_timeout_seconds = 60
parallel = true

[[agents]]
name = "ChatGPT"
provider = "openai"
model = "gpt-4o-mini-2024-07-18"

[[agents]]
name = "Claude"
provider = "anthropic"
model = "claude-3-5-haiku-latest"
max_tokens = 1000

[output]
format = "full"
preview_chars = 80
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.max_iterations, 3);
        assert_eq!(config.consensus.agent_timeout_seconds, 60);
        assert!(config.consensus.parallel);
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[1].max_tokens, Some(1000));
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert_eq!(config.output.preview_chars, 80);
        assert!(!config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.agents.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rendered_config_reads_back() {
        let config = FileConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[[agents]]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_agents_array_replaces_defaults() {
        let toml_str = r#"
[[agents]]
name = "Solo"
provider = "gemini"
model = "gemini-2.0-flash"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agents.len(), 1);
        assert_eq!(config.agents[0].name, "Solo");
    }

    #[test]
    fn test_validate_zero_iterations() {
        let mut config = FileConfig::default();
        config.consensus.max_iterations = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxIterations)
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.consensus.agent_timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_duplicate_agent() {
        let mut config = FileConfig::default();
        config.agents.push(config.agents[0].clone());
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateAgent("ChatGPT".to_string()))
        );
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = FileConfig::default();
        config.agents[1].model = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName("Gemini".to_string()))
        );
    }

    #[test]
    fn test_validate_blank_name() {
        let mut config = FileConfig::default();
        config.agents[0].name = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidAgentName(_))
        ));
    }

    #[test]
    fn test_validate_all_disabled() {
        let mut config = FileConfig::default();
        for agent in &mut config.agents {
            agent.enabled = false;
        }
        assert_eq!(config.validate(), Err(ConfigValidationError::NoEnabledAgents));
        assert_eq!(config.enabled_agents().count(), 0);
    }
}
