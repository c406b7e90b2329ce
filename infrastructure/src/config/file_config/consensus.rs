//! Convergence loop configuration from TOML (`[consensus]` section)

use consensus_application::config::{
    ConsensusParams, DEFAULT_AGENT_TIMEOUT, DEFAULT_MAX_ITERATIONS, DispatchMode,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consensus configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Upper bound on rounds
    pub max_iterations: usize,
    /// Per-agent call timeout in seconds
    pub agent_timeout_seconds: u64,
    /// Ask the agents of a round concurrently
    pub parallel: bool,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            agent_timeout_seconds: DEFAULT_AGENT_TIMEOUT.as_secs(),
            parallel: false,
        }
    }
}

impl FileConsensusConfig {
    /// Convert to application-level parameters.
    pub fn to_params(&self) -> ConsensusParams {
        let dispatch = if self.parallel {
            DispatchMode::Concurrent
        } else {
            DispatchMode::Sequential
        };

        ConsensusParams::default()
            .with_max_iterations(self.max_iterations)
            .with_agent_timeout(Some(Duration::from_secs(self.agent_timeout_seconds)))
            .with_dispatch(dispatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let params = FileConsensusConfig::default().to_params();
        assert_eq!(params, ConsensusParams::default());
    }

    #[test]
    fn test_parallel_selects_concurrent_dispatch() {
        let config = FileConsensusConfig {
            parallel: true,
            agent_timeout_seconds: 30,
            max_iterations: 3,
        };
        let params = config.to_params();
        assert_eq!(params.dispatch, DispatchMode::Concurrent);
        assert_eq!(params.agent_timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.max_iterations, 3);
    }

    #[test]
    fn test_partial_section() {
        let toml_str = r#"
[consensus]
max_iterations = 8
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.max_iterations, 8);
        assert_eq!(config.consensus.agent_timeout_seconds, 120);
        assert!(!config.consensus.parallel);
    }
}
