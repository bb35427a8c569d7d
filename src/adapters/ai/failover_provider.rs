//! Failover AI Provider - Wrapper that provides automatic failover between providers.
//!
//! When the primary provider fails with a transient error (rate limit,
//! unavailable, network, timeout), the request is retried once on the
//! fallback provider if one is configured.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

pub struct FailoverAIProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
}

impl FailoverAIProvider {
    pub fn new(primary: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let err = match self.primary.complete(request.clone()).await {
            Ok(response) => {
                log_usage(&self.primary.provider_info(), &request, &response);
                return Ok(response);
            }
            Err(err) => err,
        };

        match &self.fallback {
            Some(fallback) if err.is_retryable() => {
                warn!(
                    trace_id = %request.metadata.trace_id,
                    primary = %self.primary.provider_info().name,
                    fallback = %fallback.provider_info().name,
                    reason = %err,
                    "AI provider failover"
                );
                let response = fallback.complete(request.clone()).await?;
                log_usage(&fallback.provider_info(), &request, &response);
                Ok(response)
            }
            _ => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

fn log_usage(info: &ProviderInfo, request: &CompletionRequest, response: &CompletionResponse) {
    info!(
        trace_id = %request.metadata.trace_id,
        provider = %info.name,
        model = %response.model,
        framework = request.metadata.framework.as_deref().unwrap_or("-"),
        control = request.metadata.control.as_deref().unwrap_or("-"),
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        "AI tokens used"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::ports::RequestMetadata;

    fn make_request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("trace-123").for_control("NIST_CSF", "ID.AM-1"))
            .with_system_prompt("sys")
    }

    #[tokio::test]
    async fn primary_success_no_fallback_used() {
        let primary = MockAIProvider::new().with_response("Primary text");
        let fallback = MockAIProvider::new().with_response("Fallback text");
        let provider = FailoverAIProvider::new(Arc::new(primary))
            .with_fallback(Arc::new(fallback.clone()));

        let response = provider.complete(make_request()).await.unwrap();

        assert_eq!(response.content, "Primary text");
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn primary_rate_limited_uses_fallback() {
        let primary = MockAIProvider::new().with_error(AIError::rate_limited(30));
        let fallback = MockAIProvider::new().with_response("Fallback text");
        let provider =
            FailoverAIProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        let response = provider.complete(make_request()).await.unwrap();
        assert_eq!(response.content, "Fallback text");
    }

    #[tokio::test]
    async fn non_retryable_error_not_fallback() {
        let primary = MockAIProvider::new().with_error(AIError::AuthenticationFailed);
        let fallback = MockAIProvider::new();
        let provider = FailoverAIProvider::new(Arc::new(primary))
            .with_fallback(Arc::new(fallback.clone()));

        let err = provider.complete(make_request()).await.unwrap_err();

        assert_eq!(err, AIError::AuthenticationFailed);
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn no_fallback_configured_returns_error() {
        let primary = MockAIProvider::new().with_error(AIError::unavailable("down"));
        let provider = FailoverAIProvider::new(Arc::new(primary));

        let err = provider.complete(make_request()).await.unwrap_err();
        assert_eq!(err, AIError::unavailable("down"));
    }

    #[tokio::test]
    async fn fallback_also_fails_returns_fallback_error() {
        let primary = MockAIProvider::new().with_error(AIError::unavailable("primary down"));
        let fallback = MockAIProvider::new().with_error(AIError::network("fallback down"));
        let provider =
            FailoverAIProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        let err = provider.complete(make_request()).await.unwrap_err();
        assert_eq!(err, AIError::network("fallback down"));
    }
}
