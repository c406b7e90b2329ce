//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are configuration-time failures. A running consensus loop never
/// produces a `DomainError`: disagreement is a normal outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents registered for consensus")]
    NoAgents,

    #[error("Duplicate agent identifier: {0}")]
    DuplicateAgent(String),

    #[error("Invalid agent identifier: {0:?}")]
    InvalidAgentId(String),

    #[error("max_iterations must be at least 1 (got {0})")]
    InvalidMaxIterations(usize),
}
