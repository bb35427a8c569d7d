//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Catalog path must not be blank")]
    BlankCatalogPath,

    #[error("Invalid evaluation setting {field}: {reason}")]
    InvalidEvaluationSetting {
        field: &'static str,
        reason: &'static str,
    },

    #[error(
        "Worst-case generation time of {worst_case_secs}s must stay below the {request_timeout_secs}s request timeout"
    )]
    GenerationExceedsRequestTimeout {
        worst_case_secs: u64,
        request_timeout_secs: u64,
    },

    #[error("No AI provider configured")]
    NoAiProviderConfigured,

    #[error("Fallback provider must differ from primary provider")]
    FallbackSameAsPrimary,
}
