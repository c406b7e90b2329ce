//! Application layer for llm-consensus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConsensusParams, DispatchMode};
pub use ports::{
    agent_gateway::{AgentGateway, BackendAgent},
    llm_backend::{GatewayError, LlmBackend},
    progress::{ConsensusProgressNotifier, NoProgress},
};
pub use registry::{AgentRegistry, RegisteredAgent};
pub use use_cases::execute_round::RoundExecutor;
pub use use_cases::run_consensus::{RunConsensusError, RunConsensusUseCase};
