//! Prompt construction for the text generation collaborator.

use serde::Serialize;

use crate::domain::evaluation::ControlResult;

use super::request::truncate_chars;
use super::RemediationRequest;

const SYSTEM_PROMPT: &str = "You are a cybersecurity compliance writer. \
Write policy text that closes the stated control gap. \
Match the tone, structure and terminology of the organization's existing policy. \
Return only the policy text, without preamble or commentary.";

/// A system/user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationPrompt {
    /// Framework the text is for.
    pub framework: String,
    /// Control the text is for.
    pub control: String,
    pub system: String,
    pub user: String,
}

impl RemediationPrompt {
    /// Prompt for an explicit remediation request.
    pub fn for_request(request: &RemediationRequest) -> Self {
        Self {
            framework: request.framework().to_string(),
            control: request.target_control().to_string(),
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "Framework: {}\nTarget control: {}\n\nExisting policy (style sample):\n{}",
                request.framework(),
                request.target_control(),
                request.original_document()
            ),
        }
    }

    /// Prompt for enriching a control result produced by an evaluation.
    ///
    /// The canonical recommendation is included so the generated text stays
    /// anchored to the catalog guidance.
    pub fn for_control(
        framework_name: &str,
        result: &ControlResult,
        document: Option<&str>,
        max_document_chars: usize,
    ) -> Self {
        let mut user = format!(
            "Framework: {}\nTarget control: {} - {}\nStatus: {}\nFinding: {}\nGuidance: {}",
            framework_name,
            result.id,
            result.control,
            result.status,
            result.details,
            result.recommendation
        );
        if let Some(document) = document.filter(|d| !d.trim().is_empty()) {
            user.push_str("\n\nExisting policy (style sample):\n");
            user.push_str(&truncate_chars(document, max_document_chars));
        }

        Self {
            framework: framework_name.to_string(),
            control: result.id.to_string(),
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}
