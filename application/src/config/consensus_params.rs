//! Consensus parameters — convergence loop control.
//!
//! [`ConsensusParams`] groups the static parameters that control
//! [`RunConsensusUseCase`](crate::use_cases::run_consensus::RunConsensusUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound on the number of rounds
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Default per-call timeout for a single agent
pub const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(120);

/// How the agents of one round are queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One agent at a time, in registration order
    #[default]
    Sequential,
    /// All agents of a round at once; results recombined by agent identity
    Concurrent,
}

/// Convergence loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Maximum number of rounds (must be at least 1)
    pub max_iterations: usize,
    /// Timeout applied to every single agent call
    pub agent_timeout: Option<Duration>,
    /// Sequential or concurrent fan-out within a round
    pub dispatch: DispatchMode,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            agent_timeout: Some(DEFAULT_AGENT_TIMEOUT),
            dispatch: DispatchMode::Sequential,
        }
    }
}

impl ConsensusParams {
    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ConsensusParams::default();
        assert_eq!(params.max_iterations, 5);
        assert_eq!(params.agent_timeout, Some(Duration::from_secs(120)));
        assert_eq!(params.dispatch, DispatchMode::Sequential);
    }

    #[test]
    fn test_builder() {
        let params = ConsensusParams::default()
            .with_max_iterations(3)
            .with_agent_timeout(None)
            .with_dispatch(DispatchMode::Concurrent);

        assert_eq!(params.max_iterations, 3);
        assert!(params.agent_timeout.is_none());
        assert_eq!(params.dispatch, DispatchMode::Concurrent);
    }
}
