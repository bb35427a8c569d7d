//! Text Generator Port - the narrow seam to the text generation collaborator.
//!
//! The application only needs `generate(prompt) → text | UpstreamFailure`.
//! Whatever sits behind it (an LLM provider, a fixed stub) is an adapter.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::errors::ComplianceError;
use crate::domain::remediation::RemediationPrompt;

/// Produces remediation policy text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &RemediationPrompt) -> Result<String, UpstreamFailure>;
}

/// The collaborator was unreachable, errored, or returned nothing usable.
///
/// The message is human-readable and surfaced to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UpstreamFailure {
    pub message: String,
}

impl UpstreamFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<UpstreamFailure> for ComplianceError {
    fn from(err: UpstreamFailure) -> Self {
        ComplianceError::UpstreamFailure {
            message: err.message,
        }
    }
}
