//! Domain layer for llm-consensus
//!
//! This crate contains the convergence protocol itself: how answers are
//! parsed, how rounds are recorded, when agreement is reached and what
//! each round asks. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Agent**: an unreliable oracle identified by an [`AgentId`], answering
//!   in the two-part `True`/`False` + text wire format ([`AgentResponse`]).
//! - **Round**: one response per registered agent ([`RoundResult`]).
//! - **Convergence**: a bounded state machine ([`ConvergenceState`]) that
//!   stops as soon as every agent agrees.

pub mod agent;
pub mod config;
pub mod consensus;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use agent::{AGREE_TOKEN, AgentId, AgentResponse};
pub use config::OutputFormat;
pub use consensus::{
    ConsensusOutcome, ConvergencePhase, ConvergenceState, ConvergenceStatus, MERGE_ITERATION,
    RoundResult, has_consensus,
};
pub use core::{
    error::DomainError,
    question::Question,
    string::{DEFAULT_PREVIEW_CHARS, truncate},
};
pub use prompt::{PromptKind, PromptTemplate};
