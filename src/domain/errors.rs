//! Compliance error taxonomy shared by catalog, evaluation and remediation.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | InvalidInput | 400 |
//! | Configuration | 500 (fatal at startup) |
//! | UpstreamFailure | 500 |

use thiserror::Error;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by compliance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceError {
    /// The requested framework is not in the catalog.
    #[error("Framework '{framework_id}' not found")]
    NotFound { framework_id: String },

    /// Malformed signals or missing request fields.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The catalog failed structural validation.
    #[error("Catalog configuration error: {0}")]
    Configuration(#[from] CatalogError),

    /// The text generation collaborator was unreachable or errored.
    #[error("{message}")]
    UpstreamFailure { message: String },
}

impl ComplianceError {
    pub fn framework_not_found(framework_id: impl Into<String>) -> Self {
        ComplianceError::NotFound {
            framework_id: framework_id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ComplianceError::InvalidInput(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ComplianceError::UpstreamFailure {
            message: message.into(),
        }
    }

    /// Maps to the foundation error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ComplianceError::NotFound { .. } => ErrorCode::FrameworkNotFound,
            ComplianceError::InvalidInput(_) => ErrorCode::InvalidInput,
            ComplianceError::Configuration(_) => ErrorCode::ConfigurationError,
            ComplianceError::UpstreamFailure { .. } => ErrorCode::UpstreamFailure,
        }
    }

    /// Request-scoped errors are the caller's fault and carry no side effects.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ComplianceError::NotFound { .. } | ComplianceError::InvalidInput(_)
        )
    }
}

impl From<ValidationError> for ComplianceError {
    fn from(err: ValidationError) -> Self {
        ComplianceError::InvalidInput(err.to_string())
    }
}

impl From<ComplianceError> for DomainError {
    fn from(err: ComplianceError) -> Self {
        let error = DomainError::new(err.code(), err.to_string());
        match err {
            ComplianceError::NotFound { framework_id } => {
                error.with_detail("frameworkId", framework_id)
            }
            _ => error,
        }
    }
}
