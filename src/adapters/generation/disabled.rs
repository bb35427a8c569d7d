use async_trait::async_trait;

use crate::domain::remediation::RemediationPrompt;
use crate::ports::{TextGenerator, UpstreamFailure};

/// Stand-in used when text generation is switched off.
///
/// Every call fails, so evaluation keeps canonical recommendations and the
/// remediation endpoint reports the feature as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &RemediationPrompt) -> Result<String, UpstreamFailure> {
        Err(UpstreamFailure::new("Text generation is disabled"))
    }
}
