//! Run Consensus use case
//!
//! Drives the convergence loop: one round per iteration until every agent
//! agrees or the iteration bound is reached.

use crate::config::ConsensusParams;
use crate::ports::progress::{ConsensusProgressNotifier, NoProgress};
use crate::registry::AgentRegistry;
use crate::use_cases::execute_round::RoundExecutor;
use consensus_domain::{
    ConsensusOutcome, ConvergenceState, ConvergenceStatus, DomainError,
    PromptKind, Question, has_consensus,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration errors detected when building the use case.
///
/// A constructed [`RunConsensusUseCase`] never fails afterwards.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunConsensusError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Agent timeout must be greater than zero")]
    ZeroTimeout,
}

/// Use case for running the convergence protocol
pub struct RunConsensusUseCase {
    registry: Arc<AgentRegistry>,
    params: ConsensusParams,
    executor: RoundExecutor,
    initial_state: ConvergenceState,
}

impl RunConsensusUseCase {
    /// Validate the agent set and parameters and build the use case.
    pub fn new(
        registry: AgentRegistry,
        params: ConsensusParams,
    ) -> Result<Self, RunConsensusError> {
        if registry.is_empty() {
            return Err(DomainError::NoAgents.into());
        }
        if params.agent_timeout.is_some_and(|t| t.is_zero()) {
            return Err(RunConsensusError::ZeroTimeout);
        }
        let initial_state = ConvergenceState::new(params.max_iterations)?;

        let registry = Arc::new(registry);
        let executor = RoundExecutor::new(
            Arc::clone(&registry),
            params.dispatch,
            params.agent_timeout,
        );

        Ok(Self {
            registry,
            params,
            executor,
            initial_state,
        })
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    /// Run the protocol and return only the final answer.
    ///
    /// Always yields a string: the agreed answer, or the best available
    /// fallback when the iteration bound is reached.
    pub async fn get_consensus(&self, question: impl Into<Question>) -> String {
        self.execute(question.into()).await.answer
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, question: Question) -> ConsensusOutcome {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: Question,
        progress: &dyn ConsensusProgressNotifier,
    ) -> ConsensusOutcome {
        info!(
            "Starting consensus with {} agents (max {} iterations)",
            self.registry.len(),
            self.params.max_iterations
        );

        let mut state = self.initial_state.clone();
        let mut iteration = 0;

        let (status, answer) = loop {
            progress.on_round_start(
                iteration,
                PromptKind::for_iteration(iteration),
                self.registry.len(),
            );

            let round = self
                .executor
                .execute(iteration, &question, state.last_round(), progress)
                .await;

            let agreed = has_consensus(&round);
            info!(
                "Iteration {}: {} ({}/{} agree)",
                iteration + 1,
                round.vote_summary(),
                round.agree_count(),
                round.len()
            );
            progress.on_round_complete(iteration, &round, agreed);

            match ConvergenceStatus::from_phase(state.record_round(round)) {
                Some((status, answer)) => break (status, answer.to_string()),
                None => iteration += 1,
            }
        };

        match status {
            ConvergenceStatus::Converged => {
                info!("Consensus reached after {} rounds", state.rounds_executed())
            }
            ConvergenceStatus::Exhausted => warn!(
                "Maximum iterations ({}) reached without consensus",
                self.params.max_iterations
            ),
        }

        let iterations = state.rounds_executed();
        let outcome = ConsensusOutcome::new(
            question,
            answer,
            status,
            iterations,
            self.params.max_iterations,
            state.into_last_round().unwrap_or_default(),
        );
        progress.on_finished(&outcome);
        outcome
    }
}
