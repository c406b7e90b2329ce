//! Round Executor
//!
//! Asks every registered agent once with the prompt of the current
//! iteration and collects one response per agent.

use crate::config::DispatchMode;
use crate::ports::agent_gateway::AgentGateway;
use crate::ports::progress::ConsensusProgressNotifier;
use crate::registry::AgentRegistry;
use consensus_domain::{AgentId, AgentResponse, PromptTemplate, Question, RoundResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Runs one round of the convergence loop.
///
/// The resulting [`RoundResult`] always holds exactly the registered agent
/// set, in registration order, whatever individual agents did.
pub struct RoundExecutor {
    registry: Arc<AgentRegistry>,
    dispatch: DispatchMode,
    agent_timeout: Option<Duration>,
}

impl RoundExecutor {
    pub fn new(
        registry: Arc<AgentRegistry>,
        dispatch: DispatchMode,
        agent_timeout: Option<Duration>,
    ) -> Self {
        Self {
            registry,
            dispatch,
            agent_timeout,
        }
    }

    /// Execute the round for `iteration`.
    ///
    /// `previous` is the round before this one (`None` for iteration 0).
    pub async fn execute(
        &self,
        iteration: usize,
        question: &Question,
        previous: Option<&RoundResult>,
        progress: &dyn ConsensusProgressNotifier,
    ) -> RoundResult {
        let prompt = PromptTemplate::for_iteration(iteration, question, previous);
        debug!(iteration, prompt_bytes = prompt.len(), "Built round prompt");

        match self.dispatch {
            DispatchMode::Sequential => self.execute_sequential(iteration, prompt, progress).await,
            DispatchMode::Concurrent => self.execute_concurrent(iteration, prompt, progress).await,
        }
    }

    async fn execute_sequential(
        &self,
        iteration: usize,
        prompt: String,
        progress: &dyn ConsensusProgressNotifier,
    ) -> RoundResult {
        let prompt: Arc<str> = Arc::from(prompt);
        let mut round = RoundResult::with_capacity(self.registry.len());

        for agent in self.registry.iter() {
            progress.on_agent_start(iteration, &agent.id);

            // One task per call so a panicking agent only loses its own answer
            let id = agent.id.clone();
            let gateway = Arc::clone(&agent.gateway);
            let task_prompt = Arc::clone(&prompt);
            let timeout = self.agent_timeout;
            let handle = tokio::spawn(async move {
                ask(&id, gateway.as_ref(), &task_prompt, timeout).await
            });

            let response = match handle.await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Agent task join error: {}", e);
                    AgentResponse::unavailable()
                }
            };
            progress.on_agent_response(iteration, &agent.id, &response);
            round.insert(agent.id.clone(), response);
        }

        round
    }

    async fn execute_concurrent(
        &self,
        iteration: usize,
        prompt: String,
        progress: &dyn ConsensusProgressNotifier,
    ) -> RoundResult {
        let prompt: Arc<str> = Arc::from(prompt);
        let mut join_set = JoinSet::new();

        for agent in self.registry.iter() {
            progress.on_agent_start(iteration, &agent.id);

            let id = agent.id.clone();
            let gateway = Arc::clone(&agent.gateway);
            let prompt = Arc::clone(&prompt);
            let timeout = self.agent_timeout;

            join_set.spawn(async move {
                let response = ask(&id, gateway.as_ref(), &prompt, timeout).await;
                (id, response)
            });
        }

        let mut arrived: HashMap<AgentId, AgentResponse> = HashMap::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((id, response)) => {
                    arrived.insert(id, response);
                }
                Err(e) => {
                    warn!("Agent task join error: {}", e);
                }
            }
        }

        // Recombine by identity in registration order; a lost task disagrees.
        let mut round = RoundResult::with_capacity(self.registry.len());
        for agent in self.registry.iter() {
            let response = arrived
                .remove(&agent.id)
                .unwrap_or_else(AgentResponse::unavailable);
            progress.on_agent_response(iteration, &agent.id, &response);
            round.insert(agent.id.clone(), response);
        }

        round
    }
}

/// Ask one agent, mapping a timeout to the unavailable response.
async fn ask(
    id: &AgentId,
    gateway: &dyn AgentGateway,
    prompt: &str,
    timeout: Option<Duration>,
) -> AgentResponse {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, gateway.respond(prompt)).await {
            Ok(response) => response,
            Err(_) => {
                warn!("Agent {} timed out after {:?}", id, limit);
                AgentResponse::unavailable()
            }
        },
        None => gateway.respond(prompt).await,
    }
}
