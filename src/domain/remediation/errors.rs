use thiserror::Error;

use crate::domain::errors::ComplianceError;

/// Errors raised while building a remediation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemediationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
}

impl From<RemediationError> for ComplianceError {
    fn from(err: RemediationError) -> Self {
        ComplianceError::InvalidInput(err.to_string())
    }
}
