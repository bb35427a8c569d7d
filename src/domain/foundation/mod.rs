//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the compliance domain.

mod control_status;
mod errors;
mod ids;
mod timestamp;

pub use control_status::ControlStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ControlId, EvaluationId, FrameworkId};
pub use timestamp::Timestamp;
