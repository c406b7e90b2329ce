//! Progress notification port
//!
//! Defines the interface for reporting progress while the convergence loop runs.
//! This is also the side channel through which "converged" and "exhausted"
//! become observable.

use consensus_domain::{AgentId, AgentResponse, ConsensusOutcome, PromptKind, RoundResult};

/// Callback for progress updates during a consensus run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain text, nothing).
pub trait ConsensusProgressNotifier: Send + Sync {
    /// Called before any agent is asked in a round (0-based iteration)
    fn on_round_start(&self, iteration: usize, kind: PromptKind, total_agents: usize);

    /// Called when an agent has answered
    fn on_agent_response(&self, iteration: usize, agent: &AgentId, response: &AgentResponse);

    /// Called once all agents of a round have answered
    fn on_round_complete(&self, iteration: usize, round: &RoundResult, consensus: bool);

    /// Called right before an agent is asked
    fn on_agent_start(&self, _iteration: usize, _agent: &AgentId) {}

    /// Called once the loop reached a terminal state
    fn on_finished(&self, _outcome: &ConsensusOutcome) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConsensusProgressNotifier for NoProgress {
    fn on_round_start(&self, _iteration: usize, _kind: PromptKind, _total_agents: usize) {}
    fn on_agent_response(&self, _iteration: usize, _agent: &AgentId, _response: &AgentResponse) {}
    fn on_round_complete(&self, _iteration: usize, _round: &RoundResult, _consensus: bool) {}
}
