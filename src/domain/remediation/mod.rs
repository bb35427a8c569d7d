//! Remediation - validated requests and prompts for generated policy text.

mod errors;
mod prompt;
mod request;

pub use errors::RemediationError;
pub use prompt::RemediationPrompt;
pub use request::{RemediationRequest, DEFAULT_MAX_DOCUMENT_CHARS};
