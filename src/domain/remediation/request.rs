use serde::Serialize;

use super::RemediationError;

/// Default number of document characters kept as a style sample.
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 4000;

/// A validated request for generated remediation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationRequest {
    original_document: String,
    target_control: String,
    framework: String,
}

impl RemediationRequest {
    /// Validates the fields and truncates the document to `max_document_chars`
    /// characters.
    ///
    /// Missing or blank fields are rejected.
    pub fn new(
        original_document: Option<String>,
        target_control: Option<String>,
        framework: Option<String>,
        max_document_chars: usize,
    ) -> Result<Self, RemediationError> {
        let original_document = require(original_document, "originalDocument")?;
        let target_control = require(target_control, "targetControl")?;
        let framework = require(framework, "framework")?;

        Ok(Self {
            original_document: truncate_chars(&original_document, max_document_chars),
            target_control: target_control.trim().to_string(),
            framework: framework.trim().to_string(),
        })
    }

    /// The (possibly truncated) style sample.
    pub fn original_document(&self) -> &str {
        &self.original_document
    }

    pub fn target_control(&self) -> &str {
        &self.target_control
    }

    pub fn framework(&self) -> &str {
        &self.framework
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, RemediationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RemediationError::MissingField { field }),
    }
}

/// Keeps the first `max` characters, never splitting a UTF-8 sequence.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
