//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Query handlers read the catalog; command handlers evaluate documents and
//! call the text generator.

pub mod handlers;

pub use handlers::{
    EvaluatePolicyCommand, EvaluatePolicyHandler, EvaluationInput, EvaluationReport,
    GenerateRemediationCommand, GenerateRemediationHandler, GenerationLimits,
    GetFrameworkHandler, GetFrameworkQuery, ListFrameworksHandler,
};
