//! Document signals - per-control evidence extracted from a policy document.
//!
//! How the evidence was extracted is not this module's concern; callers may
//! supply signals directly or derive them with [`super::KeywordSignalExtractor`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::catalog::FrameworkCatalog;
use crate::domain::foundation::ControlId;

use super::EvaluationError;

/// How strongly a document evidences a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceStrength {
    None,
    Incomplete,
    Sufficient,
}

/// Evidence found for a single control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlEvidence {
    /// Excerpts or matched terms supporting the control.
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Whether the evidence fully covers the control.
    #[serde(default)]
    pub complete: bool,
}

impl ControlEvidence {
    /// Evidence that fully covers the control.
    pub fn sufficient<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            evidence: items.into_iter().map(Into::into).collect(),
            complete: true,
        }
    }

    /// Evidence that only partly covers the control.
    pub fn incomplete<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            evidence: items.into_iter().map(Into::into).collect(),
            complete: false,
        }
    }

    pub fn strength(&self) -> EvidenceStrength {
        match (self.evidence.is_empty(), self.complete) {
            (true, _) => EvidenceStrength::None,
            (false, true) => EvidenceStrength::Sufficient,
            (false, false) => EvidenceStrength::Incomplete,
        }
    }
}

/// Evidence for a document, keyed by control id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentSignals {
    #[serde(default)]
    controls: BTreeMap<ControlId, ControlEvidence>,
}

impl DocumentSignals {
    /// Signals with no evidence at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds evidence for a control, replacing any previous entry.
    pub fn with_evidence(mut self, control_id: ControlId, evidence: ControlEvidence) -> Self {
        self.controls.insert(control_id, evidence);
        self
    }

    pub fn evidence_for(&self, control_id: &ControlId) -> Option<&ControlEvidence> {
        self.controls.get(control_id)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Checks the signals are well-formed for a catalog framework.
    ///
    /// Rejects evidence for controls the framework does not declare (looked
    /// up through the catalog's control index), blank evidence items, and
    /// `complete` claims without any evidence.
    pub fn validate_against(
        &self,
        catalog: &FrameworkCatalog,
        framework_id: &str,
    ) -> Result<(), EvaluationError> {
        for (control_id, evidence) in &self.controls {
            if control_id.as_str().trim().is_empty() {
                return Err(EvaluationError::BlankControlId);
            }
            if !catalog.has_control(framework_id, control_id) {
                return Err(EvaluationError::UnknownControl {
                    framework_id: framework_id.to_string(),
                    control_id: control_id.to_string(),
                });
            }
            if evidence.evidence.iter().any(|item| item.trim().is_empty()) {
                return Err(EvaluationError::BlankEvidence {
                    control_id: control_id.to_string(),
                });
            }
            if evidence.complete && evidence.evidence.is_empty() {
                return Err(EvaluationError::CompleteWithoutEvidence {
                    control_id: control_id.to_string(),
                });
            }
        }
        Ok(())
    }
}
