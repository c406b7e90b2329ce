//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters implement.

pub mod agent_gateway;
pub mod llm_backend;
pub mod progress;
