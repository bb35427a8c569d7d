//! Mock AI Provider for testing.
//!
//! Returns queued responses or errors in order, then a fallback response,
//! optionally after a simulated delay. Every request is recorded.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Maintain an asset inventory...")
//!     .with_error(AIError::unavailable("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider for tests and local development.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    queued: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    fallback_response: String,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            queued: Arc::new(Mutex::new(VecDeque::new())),
            fallback_response: "Mock remediation text.".to_string(),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful completion.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.queued).push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.queued).push_back(Err(error));
        self
    }

    /// Content returned once the queue is drained.
    pub fn with_fallback_response(mut self, content: impl Into<String>) -> Self {
        self.fallback_response = content.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.queued).pop_front();
        let content = match next {
            Some(result) => result?,
            None => self.fallback_response.clone(),
        };

        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(10, 20),
            model: self.info.model.clone(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
