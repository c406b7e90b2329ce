//! Per-round collection of agent responses.

use crate::agent::{AgentId, AgentResponse};
use serde::{Deserialize, Serialize};

/// The responses of every registered agent for a single round.
///
/// Keeps registration order: the first entry is always the first-registered
/// agent, independent of the order in which answers actually arrived.
/// A `RoundResult` is replaced wholesale every iteration; nothing carries
/// over from one round to the next.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundResult {
    entries: Vec<(AgentId, AgentResponse)>,
}

impl RoundResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Record an agent's response.
    ///
    /// A second insert for the same agent replaces the earlier response in
    /// place, so the agent keeps its original position.
    pub fn insert(&mut self, agent: AgentId, response: AgentResponse) {
        match self.entries.iter_mut().find(|(id, _)| *id == agent) {
            Some((_, existing)) => *existing = response,
            None => self.entries.push((agent, response)),
        }
    }

    pub fn get(&self, agent: &AgentId) -> Option<&AgentResponse> {
        self.entries
            .iter()
            .find(|(id, _)| id == agent)
            .map(|(_, r)| r)
    }

    /// The first-registered agent and its response
    pub fn first(&self) -> Option<(&AgentId, &AgentResponse)> {
        self.entries.first().map(|(id, r)| (id, r))
    }

    /// Text of the first-registered agent's response
    pub fn first_text(&self) -> Option<&str> {
        self.first().map(|(_, r)| r.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &AgentResponse)> {
        self.entries.iter().map(|(id, r)| (id, r))
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = &AgentId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of agents that declared agreement
    pub fn agree_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.agrees).count()
    }

    /// Visual vote summary in registration order (e.g. `"[●●○]"`)
    pub fn vote_summary(&self) -> String {
        let marks: String = self
            .entries
            .iter()
            .map(|(_, r)| if r.agrees { '●' } else { '○' })
            .collect();
        format!("[{}]", marks)
    }
}

impl FromIterator<(AgentId, AgentResponse)> for RoundResult {
    fn from_iter<I: IntoIterator<Item = (AgentId, AgentResponse)>>(iter: I) -> Self {
        let mut round = RoundResult::new();
        for (agent, response) in iter {
            round.insert(agent, response);
        }
        round
    }
}

impl IntoIterator for RoundResult {
    type Item = (AgentId, AgentResponse);
    type IntoIter = std::vec::IntoIter<(AgentId, AgentResponse)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
