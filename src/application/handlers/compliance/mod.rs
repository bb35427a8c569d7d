//! Compliance command and query handlers.

mod evaluate_policy;
mod generate_remediation;
mod get_framework;
mod list_frameworks;

pub use evaluate_policy::{
    EvaluatePolicyCommand, EvaluatePolicyHandler, EvaluationInput, EvaluationReport,
    GenerationLimits,
};
pub use generate_remediation::{GenerateRemediationCommand, GenerateRemediationHandler};
pub use get_framework::{GetFrameworkHandler, GetFrameworkQuery};
pub use list_frameworks::ListFrameworksHandler;
