//! Infrastructure layer for llm-consensus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP backends for the supported LLM
//! providers and configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileConsensusConfig,
    FileOutputConfig, FileOutputFormat, ProviderKind,
};
pub use providers::{
    AgentFactory, AnthropicBackend, BackendSettings, GeminiBackend, OpenAiBackend, ProviderError,
};
