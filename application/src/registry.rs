//! Registered agent set.
//!
//! An ordered list of `(AgentId, gateway)` pairs. Registration order is the
//! order agents are asked and listed in prompts, and the first-registered
//! agent supplies the candidate answer.

use crate::ports::agent_gateway::AgentGateway;
use consensus_domain::{AgentId, DomainError};
use std::sync::Arc;

/// An agent taking part in consensus
#[derive(Clone)]
pub struct RegisteredAgent {
    pub id: AgentId,
    pub gateway: Arc<dyn AgentGateway>,
}

impl std::fmt::Debug for RegisteredAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredAgent")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Ordered set of agents with unique identifiers
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<RegisteredAgent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent at the end of the order.
    pub fn register(
        &mut self,
        id: AgentId,
        gateway: Arc<dyn AgentGateway>,
    ) -> Result<(), DomainError> {
        if self.contains(&id) {
            return Err(DomainError::DuplicateAgent(id.to_string()));
        }
        self.agents.push(RegisteredAgent { id, gateway });
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_agent(
        mut self,
        id: AgentId,
        gateway: Arc<dyn AgentGateway>,
    ) -> Result<Self, DomainError> {
        self.register(id, gateway)?;
        Ok(self)
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.agents.iter().any(|a| &a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAgent> {
        self.agents.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &AgentId> {
        self.agents.iter().map(|a| &a.id)
    }

    pub fn first(&self) -> Option<&RegisteredAgent> {
        self.agents.first()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
