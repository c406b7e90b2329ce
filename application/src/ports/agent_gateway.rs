//! Agent Gateway port
//!
//! The single capability the consensus loop depends on:
//! `respond(prompt) -> AgentResponse`.
//!
//! # Contract
//!
//! Implementations must never fail across this boundary. Transport errors
//! and unparsable payloads are mapped to a disagreeing [`AgentResponse`]
//! inside the gateway; the Round Executor relies on this and only adds the
//! per-call timeout on top.

use super::llm_backend::LlmBackend;
use async_trait::async_trait;
use consensus_domain::AgentResponse;
use std::sync::Arc;
use tracing::{debug, warn};

/// Capability of answering a prompt in the two-part agreement format
#[async_trait]
pub trait AgentGateway: Send + Sync {
    async fn respond(&self, prompt: &str) -> AgentResponse;
}

/// Adapter from a fallible [`LlmBackend`] to the infallible [`AgentGateway`].
///
/// - Raw output is parsed with [`AgentResponse::parse`].
/// - A backend error becomes `{agrees: false, text: ""}`.
pub struct BackendAgent {
    backend: Arc<dyn LlmBackend>,
}

impl BackendAgent {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn LlmBackend> {
        &self.backend
    }
}

#[async_trait]
impl AgentGateway for BackendAgent {
    async fn respond(&self, prompt: &str) -> AgentResponse {
        match self.backend.complete(prompt).await {
            Ok(raw) => {
                debug!(backend = %self.backend.describe(), bytes = raw.len(), "Received raw answer");
                AgentResponse::parse(&raw)
            }
            Err(e) => {
                warn!("Backend {} failed: {}", self.backend.describe(), e);
                AgentResponse::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_backend::GatewayError;

    struct FixedBackend(Result<&'static str, &'static str>);

    #[async_trait]
    impl LlmBackend for FixedBackend {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
            self.0
                .map(str::to_string)
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_parses_backend_output() {
        let agent = BackendAgent::new(Arc::new(FixedBackend(Ok("True\nfoo bar"))));
        assert_eq!(agent.respond("q").await, AgentResponse::agree("foo bar"));
    }

    #[tokio::test]
    async fn test_unparsable_output_disagrees_with_raw_text() {
        let agent = BackendAgent::new(Arc::new(FixedBackend(Ok("garbage with no match"))));
        assert_eq!(
            agent.respond("q").await,
            AgentResponse::disagree("garbage with no match")
        );
    }

    #[tokio::test]
    async fn test_backend_error_degrades() {
        let agent = BackendAgent::new(Arc::new(FixedBackend(Err("HTTP 500"))));
        assert_eq!(agent.respond("q").await, AgentResponse::unavailable());
    }
}
