use std::sync::Arc;

use crate::config::{AiConfig, AiProvider};
use crate::ports::{AIError, AIProvider};

use super::{
    AnthropicConfig, AnthropicProvider, FailoverAIProvider, MockAIProvider, OpenAIConfig,
    OpenAIProvider,
};

/// Builds the configured primary provider, wrapped in failover when a
/// fallback is configured.
pub fn build_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, AIError> {
    let primary = build_single(config, config.primary_provider, config.model.as_deref())?;
    match config.fallback_provider {
        Some(fallback) => {
            let fallback = build_single(config, fallback, None)?;
            Ok(Arc::new(FailoverAIProvider::new(primary).with_fallback(fallback)))
        }
        None => Ok(primary),
    }
}

fn build_single(
    config: &AiConfig,
    provider: AiProvider,
    model: Option<&str>,
) -> Result<Arc<dyn AIProvider>, AIError> {
    match provider {
        AiProvider::OpenAI => {
            let key = config
                .openai_api_key
                .as_deref()
                .ok_or(AIError::AuthenticationFailed)?;
            let mut settings = OpenAIConfig::new(key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = model {
                settings = settings.with_model(model);
            }
            Ok(Arc::new(OpenAIProvider::new(settings)?))
        }
        AiProvider::Anthropic => {
            let key = config
                .anthropic_api_key
                .as_deref()
                .ok_or(AIError::AuthenticationFailed)?;
            let mut settings = AnthropicConfig::new(key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = model {
                settings = settings.with_model(model);
            }
            Ok(Arc::new(AnthropicProvider::new(settings)?))
        }
        AiProvider::Mock => Ok(Arc::new(MockAIProvider::new())),
    }
}
