//! AI provider configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Primary AI provider
    #[serde(default)]
    pub primary_provider: AiProvider,

    /// Fallback AI provider
    pub fallback_provider: Option<AiProvider>,

    /// Model override for the primary provider
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    Anthropic,
    /// Canned responses, for local development.
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    fn has_key_for(&self, provider: AiProvider) -> bool {
        match provider {
            AiProvider::OpenAI => self.has_openai(),
            AiProvider::Anthropic => self.has_anthropic(),
            AiProvider::Mock => true,
        }
    }

    /// Validate AI configuration.
    ///
    /// Only called when text generation is enabled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_key_for(self.primary_provider) {
            if !self.has_openai() && !self.has_anthropic() {
                return Err(ValidationError::NoAiProviderConfigured);
            }
            return Err(match self.primary_provider {
                AiProvider::Anthropic => ValidationError::MissingRequired("ANTHROPIC_API_KEY"),
                _ => ValidationError::MissingRequired("OPENAI_API_KEY"),
            });
        }

        if let Some(fallback) = self.fallback_provider {
            if fallback == self.primary_provider {
                return Err(ValidationError::FallbackSameAsPrimary);
            }
            if !self.has_key_for(fallback) {
                return Err(match fallback {
                    AiProvider::Anthropic => ValidationError::MissingRequired("ANTHROPIC_API_KEY"),
                    _ => ValidationError::MissingRequired("OPENAI_API_KEY"),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("AiConfig")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("primary_provider", &self.primary_provider)
            .field("fallback_provider", &self.fallback_provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            primary_provider: AiProvider::default(),
            fallback_provider: None,
            model: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}
