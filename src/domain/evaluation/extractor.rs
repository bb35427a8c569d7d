//! Keyword-based signal extraction from raw document text.
//!
//! Plain case-insensitive substring matching against each control's declared
//! keywords. Whitespace runs are collapsed on both sides so line breaks in
//! the document do not split a phrase.

use crate::domain::catalog::Framework;

use super::{ControlEvidence, DocumentSignals};

/// Derives [`DocumentSignals`] from document text using catalog keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSignalExtractor;

impl KeywordSignalExtractor {
    /// Records, per control, which of its keywords appear in the document.
    ///
    /// Controls without keywords, or with no keyword present, get no entry
    /// and therefore evaluate as gaps. Evidence is complete only when every
    /// keyword was found.
    pub fn extract(&self, framework: &Framework, document: &str) -> DocumentSignals {
        let haystack = normalize(document);
        let mut signals = DocumentSignals::empty();

        for control in framework.controls() {
            let keywords: Vec<String> = control
                .keywords()
                .iter()
                .map(|keyword| normalize(keyword))
                .filter(|keyword| !keyword.is_empty())
                .collect();
            let expected = keywords.len();
            let found: Vec<String> = keywords
                .into_iter()
                .filter(|keyword| haystack.contains(keyword.as_str()))
                .collect();

            if found.is_empty() {
                continue;
            }
            let evidence = if found.len() == expected {
                ControlEvidence::sufficient(found)
            } else {
                ControlEvidence::incomplete(found)
            };
            signals = signals.with_evidence(control.id().clone(), evidence);
        }

        signals
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
