use thiserror::Error;

use crate::domain::errors::ComplianceError;

/// Errors raised while validating evaluation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("signals contain a blank control id")]
    BlankControlId,

    #[error("signals reference control '{control_id}' which is not part of framework '{framework_id}'")]
    UnknownControl {
        framework_id: String,
        control_id: String,
    },

    #[error("evidence for control '{control_id}' contains a blank item")]
    BlankEvidence { control_id: String },

    #[error("evidence for control '{control_id}' is marked complete but lists no items")]
    CompleteWithoutEvidence { control_id: String },
}

impl From<EvaluationError> for ComplianceError {
    fn from(err: EvaluationError) -> Self {
        ComplianceError::InvalidInput(err.to_string())
    }
}
