//! Agent identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stable identifier of a registered agent (e.g. `"ChatGPT"`, `"Claude"`).
///
/// Unique within a run and used as the section heading for that agent's
/// answer in merge and feedback prompts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Create an identifier, rejecting blank names and names containing
    /// line breaks (they would corrupt the prompt layout).
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() || name.contains(['\n', '\r']) {
            return Err(DomainError::InvalidAgentId(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AgentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
