//! LLM Backend port
//!
//! Defines the transport-level interface to a single answer-generating oracle.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to an oracle
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Transport to one backing oracle (an HTTP API, a local model, a test script).
///
/// Implementations may fail freely; [`BackendAgent`](super::agent_gateway::BackendAgent)
/// is responsible for turning failures into degraded responses before they
/// reach the consensus loop.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Short description for logs, e.g. `"openai/gpt-4o-mini"`
    fn describe(&self) -> String;

    /// Send a single-turn prompt and return the raw text answer
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}
