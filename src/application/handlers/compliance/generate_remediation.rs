//! GenerateRemediationHandler - Command handler producing remediation text.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::domain::errors::ComplianceError;
use crate::domain::remediation::{RemediationPrompt, RemediationRequest};
use crate::ports::TextGenerator;

/// Command to generate policy text for one control.
///
/// Fields are optional so missing values are reported as `InvalidInput`
/// rather than rejected during deserialization.
#[derive(Debug, Clone, Default)]
pub struct GenerateRemediationCommand {
    pub original_document: Option<String>,
    pub target_control: Option<String>,
    pub framework: Option<String>,
}

pub struct GenerateRemediationHandler {
    generator: Arc<dyn TextGenerator>,
    max_document_chars: usize,
    timeout: Duration,
}

impl GenerateRemediationHandler {
    pub fn new(generator: Arc<dyn TextGenerator>, max_document_chars: usize, timeout: Duration) -> Self {
        Self {
            generator,
            max_document_chars,
            timeout,
        }
    }

    /// # Errors
    ///
    /// - `InvalidInput` if a field is missing or blank
    /// - `UpstreamFailure` if generation fails or times out
    pub async fn handle(&self, cmd: GenerateRemediationCommand) -> Result<String, ComplianceError> {
        let request = RemediationRequest::new(
            cmd.original_document,
            cmd.target_control,
            cmd.framework,
            self.max_document_chars,
        )?;
        let prompt = RemediationPrompt::for_request(&request);

        match timeout(self.timeout, self.generator.generate(&prompt)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => {
                warn!(control = %prompt.control, error = %err, "Remediation generation failed");
                Err(err.into())
            }
            Err(_) => Err(ComplianceError::upstream(format!(
                "Text generation timed out after {:?}",
                self.timeout
            ))),
        }
    }
}
