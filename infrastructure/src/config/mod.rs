//! Configuration file loading for llm-consensus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LLM_CONSENSUS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./consensus.toml` or `./.consensus.toml`
//! 4. Global: `~/.config/llm-consensus/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig,
    FileConsensusConfig, FileOutputConfig, FileOutputFormat, ProviderKind, default_agents,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
