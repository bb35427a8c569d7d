//! Gap evaluation engine.
//!
//! The engine is a pure function of the immutable catalog and its input:
//! no I/O, no shared mutable state, so evaluations run in parallel freely.

use std::sync::Arc;

use tracing::debug;

use crate::domain::catalog::{ControlTemplate, FrameworkCatalog};
use crate::domain::errors::ComplianceError;
use crate::domain::foundation::ControlStatus;

use super::{
    ControlEvidence, ControlResult, DocumentSignals, EvaluatedCategory, EvaluationRun,
    PolicyRegistry, RunSummary,
};

/// Assigns a status, details and recommendation to every control of a framework.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    catalog: Arc<FrameworkCatalog>,
    policies: PolicyRegistry,
}

impl EvaluationEngine {
    /// Creates an engine using the default signal policy.
    pub fn new(catalog: Arc<FrameworkCatalog>) -> Self {
        Self {
            catalog,
            policies: PolicyRegistry::default(),
        }
    }

    pub fn with_policies(mut self, policies: PolicyRegistry) -> Self {
        self.policies = policies;
        self
    }

    pub fn catalog(&self) -> &Arc<FrameworkCatalog> {
        &self.catalog
    }

    /// Evaluates a framework against a document's signals.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the framework is not in the catalog
    /// - `InvalidInput` if the signals are malformed for the framework
    pub fn evaluate(
        &self,
        framework_id: &str,
        signals: &DocumentSignals,
    ) -> Result<EvaluationRun, ComplianceError> {
        let framework = self.catalog.get_framework(framework_id)?;
        signals.validate_against(&self.catalog, framework_id)?;

        let categories: Vec<EvaluatedCategory> = framework
            .categories()
            .iter()
            .map(|category| EvaluatedCategory {
                name: category.name().to_string(),
                description: category.description().to_string(),
                results: category
                    .controls()
                    .iter()
                    .map(|control| {
                        let evidence = signals.evidence_for(control.id());
                        let status = self
                            .policies
                            .resolve(category.name(), control.id())
                            .assess(control, evidence);
                        build_result(control, status, evidence)
                    })
                    .collect(),
            })
            .collect();

        let summary = RunSummary::from_results(categories.iter().flat_map(|c| c.results.iter()));
        debug!(
            framework_id = %framework.id(),
            total = summary.total,
            met = summary.met,
            partial = summary.partial,
            gap = summary.gap,
            "Evaluated framework"
        );

        Ok(EvaluationRun {
            framework_id: framework.id().clone(),
            framework_name: framework.name().to_string(),
            categories,
            summary,
        })
    }
}

fn build_result(
    control: &ControlTemplate,
    status: ControlStatus,
    evidence: Option<&ControlEvidence>,
) -> ControlResult {
    let (details, recommendation) = match status {
        ControlStatus::Gap => (
            control.details().to_string(),
            canonical_recommendation(control),
        ),
        ControlStatus::Partial => (
            format!(
                "Policy partially addresses this control ({}). Remaining expectation: {}",
                evidence_summary(evidence),
                control.details()
            ),
            canonical_recommendation(control),
        ),
        ControlStatus::Met => (
            format!("Policy addresses this control ({}).", evidence_summary(evidence)),
            String::new(),
        ),
    };

    ControlResult {
        id: control.id().clone(),
        control: control.control().to_string(),
        status,
        details,
        recommendation,
    }
}

fn canonical_recommendation(control: &ControlTemplate) -> String {
    if control.recommendation().trim().is_empty() {
        format!(
            "Document how the organization satisfies {}: {}",
            control.id(),
            control.control()
        )
    } else {
        control.recommendation().to_string()
    }
}

fn evidence_summary(evidence: Option<&ControlEvidence>) -> String {
    match evidence {
        Some(e) if !e.evidence.is_empty() => format!("evidence: {}", e.evidence.join("; ")),
        _ => "no evidence items recorded".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Category, Framework};
    use crate::domain::evaluation::{EvidencePolicy, ThresholdEvidencePolicy};
    use crate::domain::foundation::{ControlId, FrameworkId};

    fn engine() -> EvaluationEngine {
        EvaluationEngine::new(Arc::new(FrameworkCatalog::builtin().unwrap()))
    }

    fn id(value: &str) -> ControlId {
        ControlId::new(value).unwrap()
    }

    #[test]
    fn nist_with_empty_signals_is_all_gap_with_catalog_text() {
        let engine = engine();
        let run = engine.evaluate("NIST_CSF", &DocumentSignals::empty()).unwrap();
        let nist = engine.catalog().get_framework("NIST_CSF").unwrap();

        assert_eq!(run.result_count(), 6);
        assert_eq!(run.categories.len(), 1);
        assert_eq!(run.categories[0].name, "IDENTIFY (ID)");

        for (result, template) in run.results().zip(nist.controls()) {
            assert_eq!(result.id, *template.id());
            assert_eq!(result.status, ControlStatus::Gap);
            assert_eq!(result.details, template.details());
            assert_eq!(result.recommendation, template.recommendation());
            assert!(!result.recommendation.is_empty());
        }
        assert_eq!(run.summary.gap, 6);
        assert_eq!(run.summary.coverage_percent, 0);
    }

    #[test]
    fn unknown_framework_is_not_found() {
        let err = engine()
            .evaluate("NOT_A_FRAMEWORK", &DocumentSignals::empty())
            .unwrap_err();
        assert_eq!(err, ComplianceError::framework_not_found("NOT_A_FRAMEWORK"));
    }

    #[test]
    fn evidence_drives_met_and_partial() {
        let signals = DocumentSignals::empty()
            .with_evidence(id("ID.AM-1"), ControlEvidence::sufficient(["hardware inventory"]))
            .with_evidence(id("ID.AM-2"), ControlEvidence::incomplete(["software list"]));

        let run = engine().evaluate("NIST_CSF", &signals).unwrap();
        let results: Vec<_> = run.results().collect();

        assert_eq!(results[0].status, ControlStatus::Met);
        assert!(results[0].recommendation.is_empty());
        assert!(results[0].details.contains("hardware inventory"));

        assert_eq!(results[1].status, ControlStatus::Partial);
        assert!(results[1].details.contains("software list"));
        assert!(!results[1].recommendation.is_empty());

        assert_eq!(run.summary.met, 1);
        assert_eq!(run.summary.partial, 1);
        assert_eq!(run.summary.gap, 4);
    }

    #[test]
    fn malformed_signals_are_invalid_input() {
        let signals = DocumentSignals::empty()
            .with_evidence(id("CC6.1"), ControlEvidence::sufficient(["sso"]));
        let err = engine().evaluate("NIST_CSF", &signals).unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidInput(_)));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let engine = engine();
        let signals = DocumentSignals::empty()
            .with_evidence(id("A.5.1"), ControlEvidence::incomplete(["security policy"]));
        assert_eq!(
            engine.evaluate("ISO_27001", &signals).unwrap(),
            engine.evaluate("ISO_27001", &signals).unwrap()
        );
    }

    #[test]
    fn category_policy_overrides_default() {
        let engine = engine().with_policies(PolicyRegistry::default().with_category_policy(
            "IDENTIFY (ID)",
            Arc::new(ThresholdEvidencePolicy::new(2)),
        ));
        let signals = DocumentSignals::empty()
            .with_evidence(id("ID.AM-1"), ControlEvidence::sufficient(["cmdb"]));

        let run = engine.evaluate("NIST_CSF", &signals).unwrap();
        assert_eq!(run.categories[0].results[0].status, ControlStatus::Partial);
    }

    #[derive(Debug)]
    struct AlwaysMet;

    impl EvidencePolicy for AlwaysMet {
        fn name(&self) -> &'static str {
            "always-met"
        }

        fn assess(&self, _: &ControlTemplate, _: Option<&ControlEvidence>) -> ControlStatus {
            ControlStatus::Met
        }
    }

    #[test]
    fn met_without_evidence_still_has_details() {
        let engine = engine().with_policies(PolicyRegistry::new(Arc::new(AlwaysMet)));
        let run = engine.evaluate("SOC_2", &DocumentSignals::empty()).unwrap();

        assert!(run.results().all(|r| r.status == ControlStatus::Met));
        assert!(run.results().all(|r| r.recommendation.is_empty()));
        assert_eq!(run.summary.coverage_percent, 100);
    }

    #[test]
    fn blank_template_recommendation_gets_fallback_text() {
        let framework = Framework::new(
            FrameworkId::new("TINY").unwrap(),
            "Tiny",
            "",
            vec![Category::new(
                "Only",
                "",
                vec![ControlTemplate::new(id("T-1"), "Do the thing", ControlStatus::Met, "", "")],
            )],
        );
        let catalog = FrameworkCatalog::from_frameworks(vec![framework]).unwrap();
        let run = EvaluationEngine::new(Arc::new(catalog))
            .evaluate("TINY", &DocumentSignals::empty())
            .unwrap();

        let result = &run.categories[0].results[0];
        assert_eq!(result.status, ControlStatus::Gap);
        assert_eq!(result.recommendation, "Document how the organization satisfies T-1: Do the thing");
    }
}
