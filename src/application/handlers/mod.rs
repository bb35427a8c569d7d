//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod compliance;

pub use compliance::{
    EvaluatePolicyCommand, EvaluatePolicyHandler, EvaluationInput, EvaluationReport,
    GenerateRemediationCommand, GenerateRemediationHandler, GenerationLimits,
    GetFrameworkHandler, GetFrameworkQuery, ListFrameworksHandler,
};
