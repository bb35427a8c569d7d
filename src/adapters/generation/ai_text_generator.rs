//! TextGenerator backed by an LLM provider.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::remediation::RemediationPrompt;
use crate::ports::{
    AIProvider, CompletionRequest, FinishReason, MessageRole, RequestMetadata, TextGenerator,
    UpstreamFailure,
};

const DEFAULT_MAX_TOKENS: u32 = 1200;
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Adapts any [`AIProvider`] to the [`TextGenerator`] port.
pub struct AiTextGenerator {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
    temperature: f32,
}

impl AiTextGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn to_request(&self, prompt: &RemediationPrompt) -> CompletionRequest {
        let metadata = RequestMetadata::new(Uuid::new_v4().to_string())
            .for_control(prompt.framework.clone(), prompt.control.clone());

        CompletionRequest::new(metadata)
            .with_system_prompt(prompt.system.clone())
            .with_message(MessageRole::User, prompt.user.clone())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }
}

#[async_trait]
impl TextGenerator for AiTextGenerator {
    async fn generate(&self, prompt: &RemediationPrompt) -> Result<String, UpstreamFailure> {
        let response = self
            .provider
            .complete(self.to_request(prompt))
            .await
            .map_err(|err| UpstreamFailure::new(format!("Text generation failed: {}", err)))?;

        if response.finish_reason == FinishReason::ContentFilter {
            return Err(UpstreamFailure::new(
                "Text generation failed: response was filtered",
            ));
        }

        let text = response.content.trim();
        if text.is_empty() {
            return Err(UpstreamFailure::new("Text generation returned no content"));
        }
        Ok(text.to_string())
    }
}
