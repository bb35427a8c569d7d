//! Evidence policies - pluggable predicates deciding a control's status.
//!
//! A [`PolicyRegistry`] resolves the policy for a control by checking, in
//! order, a per-control override, a per-category override, then the default.
//! Policies must be deterministic: the same control and evidence always
//! produce the same status.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::catalog::ControlTemplate;
use crate::domain::foundation::{ControlId, ControlStatus};

use super::{ControlEvidence, EvidenceStrength};

/// Decides the status of one control from its evidence.
pub trait EvidencePolicy: Send + Sync + fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Assesses the control. Missing evidence must yield `Gap`.
    fn assess(&self, control: &ControlTemplate, evidence: Option<&ControlEvidence>) -> ControlStatus;
}

/// Default policy: trusts the completeness flag carried by the signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEvidencePolicy;

impl EvidencePolicy for SignalEvidencePolicy {
    fn name(&self) -> &'static str {
        "signal"
    }

    fn assess(&self, _control: &ControlTemplate, evidence: Option<&ControlEvidence>) -> ControlStatus {
        match evidence.map(ControlEvidence::strength) {
            Some(EvidenceStrength::Sufficient) => ControlStatus::Met,
            Some(EvidenceStrength::Incomplete) => ControlStatus::Partial,
            Some(EvidenceStrength::None) | None => ControlStatus::Gap,
        }
    }
}

/// Requires a minimum number of evidence items before a control is met.
///
/// Complete evidence below the threshold is downgraded to `Partial`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdEvidencePolicy {
    min_items: usize,
}

impl ThresholdEvidencePolicy {
    /// Creates the policy. A threshold of zero is treated as one.
    pub fn new(min_items: usize) -> Self {
        Self {
            min_items: min_items.max(1),
        }
    }

    pub fn min_items(&self) -> usize {
        self.min_items
    }
}

impl EvidencePolicy for ThresholdEvidencePolicy {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn assess(&self, _control: &ControlTemplate, evidence: Option<&ControlEvidence>) -> ControlStatus {
        let Some(evidence) = evidence else {
            return ControlStatus::Gap;
        };
        match evidence.evidence.len() {
            0 => ControlStatus::Gap,
            n if evidence.complete && n >= self.min_items => ControlStatus::Met,
            _ => ControlStatus::Partial,
        }
    }
}

/// Resolves which policy applies to a control.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    default_policy: Arc<dyn EvidencePolicy>,
    category_policies: HashMap<String, Arc<dyn EvidencePolicy>>,
    control_policies: HashMap<ControlId, Arc<dyn EvidencePolicy>>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new(Arc::new(SignalEvidencePolicy))
    }
}

impl PolicyRegistry {
    /// Creates a registry with the given fallback policy.
    pub fn new(default_policy: Arc<dyn EvidencePolicy>) -> Self {
        Self {
            default_policy,
            category_policies: HashMap::new(),
            control_policies: HashMap::new(),
        }
    }

    /// Applies a policy to every control in the named category.
    pub fn with_category_policy(
        mut self,
        category: impl Into<String>,
        policy: Arc<dyn EvidencePolicy>,
    ) -> Self {
        self.category_policies.insert(category.into(), policy);
        self
    }

    /// Applies a policy to a single control, taking precedence over categories.
    pub fn with_control_policy(mut self, control_id: ControlId, policy: Arc<dyn EvidencePolicy>) -> Self {
        self.control_policies.insert(control_id, policy);
        self
    }

    /// Returns the policy for a control in a category.
    pub fn resolve(&self, category: &str, control_id: &ControlId) -> &dyn EvidencePolicy {
        let policy = self
            .control_policies
            .get(control_id)
            .or_else(|| self.category_policies.get(category))
            .unwrap_or(&self.default_policy);
        &**policy
    }
}
