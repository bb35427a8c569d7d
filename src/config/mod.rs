//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `POLICY_GAP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use policy_gap_analyzer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod catalog;
mod error;
mod evaluation;
mod features;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use evaluation::EvaluationConfig;
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// server on the built-in catalog with text generation disabled.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Framework catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Generation budgets and document limits
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `POLICY_GAP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `POLICY_GAP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `POLICY_GAP__CATALOG__PATH=/etc/frameworks.yaml` -> `catalog.path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("POLICY_GAP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// AI credentials are only checked when text generation is enabled.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.catalog.validate()?;
        self.evaluation.validate()?;
        let worst_case_secs = self.evaluation.worst_case_generation_secs();
        if worst_case_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::GenerationExceedsRequestTimeout {
                worst_case_secs,
                request_timeout_secs: self.server.request_timeout_secs,
            });
        }
        if self.features.enable_text_generation {
            self.ai.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
