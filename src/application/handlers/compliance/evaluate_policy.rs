//! EvaluatePolicyHandler - Command handler running a gap evaluation.
//!
//! Runs the pure engine, then optionally replaces canonical recommendations
//! of non-met controls with generated text. Generation is bounded by a
//! per-request budget, a concurrency cap and a per-call timeout. Any
//! generation failure keeps the canonical recommendation and adds a warning.
//! The whole generation stage also stops at a total deadline so a slow
//! collaborator never outlives the HTTP request timeout.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::domain::errors::ComplianceError;
use crate::domain::evaluation::{
    DocumentSignals, EvaluationEngine, EvaluationRun, KeywordSignalExtractor,
};
use crate::domain::foundation::{EvaluationId, Timestamp};
use crate::domain::remediation::RemediationPrompt;
use crate::ports::TextGenerator;

/// What the document is evaluated from.
#[derive(Debug, Clone)]
pub enum EvaluationInput {
    /// Evidence already extracted by the caller.
    Signals(DocumentSignals),
    /// Raw document text; signals are derived from catalog keywords.
    DocumentText(String),
}

/// Command to evaluate a document against a framework.
#[derive(Debug, Clone)]
pub struct EvaluatePolicyCommand {
    pub framework_id: String,
    pub input: EvaluationInput,
    pub generate_recommendations: bool,
}

/// Result of an evaluation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub evaluation_id: EvaluationId,
    pub evaluated_at: Timestamp,
    pub run: EvaluationRun,
    /// Non-fatal problems, e.g. degraded recommendation generation.
    pub warnings: Vec<String>,
}

/// Bounds on recommendation generation for one request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationLimits {
    pub max_generated: usize,
    pub concurrency: usize,
    /// Per-call timeout.
    pub timeout: Duration,
    /// Total time the generation stage may take.
    pub deadline: Duration,
    pub max_document_chars: usize,
}

impl From<&AppConfig> for GenerationLimits {
    fn from(config: &AppConfig) -> Self {
        let evaluation = &config.evaluation;
        Self {
            max_generated: evaluation.max_generated_recommendations,
            concurrency: evaluation.generation_concurrency.max(1),
            timeout: evaluation.generation_timeout(),
            // Leaves a quarter of the request timeout for evaluation and serialization.
            deadline: config.server.request_timeout() * 3 / 4,
            max_document_chars: evaluation.max_document_chars,
        }
    }
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

pub struct EvaluatePolicyHandler {
    engine: EvaluationEngine,
    generator: Arc<dyn TextGenerator>,
    limits: GenerationLimits,
}

impl EvaluatePolicyHandler {
    pub fn new(
        engine: EvaluationEngine,
        generator: Arc<dyn TextGenerator>,
        limits: GenerationLimits,
    ) -> Self {
        Self {
            engine,
            generator,
            limits,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the framework is not in the catalog
    /// - `InvalidInput` if the signals are malformed
    ///
    /// Generation failures never fail the request.
    pub async fn handle(&self, cmd: EvaluatePolicyCommand) -> Result<EvaluationReport, ComplianceError> {
        let framework = self.engine.catalog().get_framework(&cmd.framework_id)?;

        let (signals, document) = match cmd.input {
            EvaluationInput::Signals(signals) => (signals, None),
            EvaluationInput::DocumentText(text) => {
                let signals = KeywordSignalExtractor.extract(framework, &text);
                debug!(
                    framework_id = %cmd.framework_id,
                    controls_with_evidence = signals.len(),
                    "Extracted keyword signals"
                );
                (signals, Some(text))
            }
        };

        let mut run = self.engine.evaluate(&cmd.framework_id, &signals)?;
        let mut warnings = Vec::new();
        if cmd.generate_recommendations {
            self.enrich(&mut run, document.as_deref(), &mut warnings).await;
        }

        let report = EvaluationReport {
            evaluation_id: EvaluationId::new(),
            evaluated_at: Timestamp::now(),
            run,
            warnings,
        };
        info!(
            evaluation_id = %report.evaluation_id,
            framework_id = %report.run.framework_id,
            coverage_percent = report.run.summary.coverage_percent,
            warnings = report.warnings.len(),
            "Evaluation completed"
        );
        Ok(report)
    }

    async fn enrich(&self, run: &mut EvaluationRun, document: Option<&str>, warnings: &mut Vec<String>) {
        let targets: Vec<(usize, usize, RemediationPrompt)> = run
            .categories
            .iter()
            .enumerate()
            .flat_map(|(ci, category)| {
                category
                    .results
                    .iter()
                    .enumerate()
                    .filter(|(_, result)| result.status.needs_remediation())
                    .map(move |(ri, result)| (ci, ri, result))
            })
            .map(|(ci, ri, result)| {
                let prompt = RemediationPrompt::for_control(
                    &run.framework_name,
                    result,
                    document,
                    self.limits.max_document_chars,
                );
                (ci, ri, prompt)
            })
            .collect();

        let skipped = targets.len().saturating_sub(self.limits.max_generated);
        if skipped > 0 {
            warnings.push(format!(
                "{} control(s) kept canonical recommendations: generation budget of {} reached",
                skipped, self.limits.max_generated
            ));
        }

        let generator = &self.generator;
        let call_timeout = self.limits.timeout;
        let scheduled = targets.len().min(self.limits.max_generated);
        let mut outcomes = pin!(stream::iter(targets.into_iter().take(scheduled))
            .map(|(ci, ri, prompt)| async move {
                let outcome = timeout(call_timeout, generator.generate(&prompt)).await;
                (ci, ri, prompt.control, outcome)
            })
            .buffered(self.limits.concurrency));

        let deadline = Instant::now() + self.limits.deadline;
        let mut finished = 0;
        loop {
            let (ci, ri, control, outcome) = match timeout_at(deadline, outcomes.next()).await {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(_) => {
                    let unfinished = scheduled - finished;
                    warn!(
                        unfinished,
                        deadline = ?self.limits.deadline,
                        "Recommendation generation deadline reached"
                    );
                    warnings.push(format!(
                        "{} control(s) kept canonical recommendations: generation deadline of {:?} reached",
                        unfinished, self.limits.deadline
                    ));
                    break;
                }
            };
            finished += 1;

            match outcome {
                Ok(Ok(text)) => run.categories[ci].results[ri].recommendation = text,
                Ok(Err(err)) => {
                    warn!(control = %control, error = %err, "Recommendation generation failed");
                    warnings.push(format!(
                        "{}: generation failed, canonical recommendation kept ({})",
                        control, err
                    ));
                }
                Err(_) => {
                    warn!(control = %control, "Recommendation generation timed out");
                    warnings.push(format!(
                        "{}: generation timed out after {:?}, canonical recommendation kept",
                        control, call_timeout
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::FrameworkCatalog;
    use crate::domain::evaluation::ControlEvidence;
    use crate::domain::foundation::{ControlId, ControlStatus};
    use crate::ports::UpstreamFailure;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedGenerator {
        calls: AtomicUsize,
        fail_controls: Vec<&'static str>,
        delay: Option<Duration>,
    }

    impl ScriptedGenerator {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_controls: vec![],
                delay: None,
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &RemediationPrompt) -> Result<String, UpstreamFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_controls.contains(&prompt.control.as_str()) {
                return Err(UpstreamFailure::new("upstream exploded"));
            }
            Ok(format!("Generated for {}", prompt.control))
        }
    }

    fn handler(generator: Arc<ScriptedGenerator>, limits: GenerationLimits) -> EvaluatePolicyHandler {
        let engine = EvaluationEngine::new(Arc::new(FrameworkCatalog::builtin().unwrap()));
        EvaluatePolicyHandler::new(engine, generator, limits)
    }

    fn command(input: EvaluationInput, generate: bool) -> EvaluatePolicyCommand {
        EvaluatePolicyCommand {
            framework_id: "NIST_CSF".to_string(),
            input,
            generate_recommendations: generate,
        }
    }

    #[tokio::test]
    async fn evaluates_without_generation() {
        let generator = Arc::new(ScriptedGenerator::ok());
        let handler = handler(generator.clone(), GenerationLimits::default());

        let report = handler
            .handle(command(EvaluationInput::Signals(DocumentSignals::empty()), false))
            .await
            .unwrap();

        assert_eq!(report.run.result_count(), 6);
        assert!(report.warnings.is_empty());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_framework_is_not_found() {
        let handler = handler(Arc::new(ScriptedGenerator::ok()), GenerationLimits::default());
        let err = handler
            .handle(EvaluatePolicyCommand {
                framework_id: "NOT_A_FRAMEWORK".to_string(),
                input: EvaluationInput::DocumentText("text".to_string()),
                generate_recommendations: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ComplianceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn document_text_is_matched_against_keywords() {
        let handler = handler(Arc::new(ScriptedGenerator::ok()), GenerationLimits::default());
        let report = handler
            .handle(command(
                EvaluationInput::DocumentText(
                    "We maintain a hardware inventory of all physical devices in an asset inventory."
                        .to_string(),
                ),
                false,
            ))
            .await
            .unwrap();

        let first = &report.run.categories[0].results[0];
        assert_eq!(first.id, ControlId::new("ID.AM-1").unwrap());
        assert_eq!(first.status, ControlStatus::Met);
    }

    #[tokio::test]
    async fn generation_respects_budget() {
        let generator = Arc::new(ScriptedGenerator::ok());
        let limits = GenerationLimits {
            max_generated: 2,
            ..Default::default()
        };
        let handler = handler(generator.clone(), limits);

        let report = handler
            .handle(command(EvaluationInput::Signals(DocumentSignals::empty()), true))
            .await
            .unwrap();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
        let results: Vec<_> = report.run.results().collect();
        assert_eq!(results[0].recommendation, "Generated for ID.AM-1");
        assert_eq!(results[1].recommendation, "Generated for ID.AM-2");
        assert!(!results[2].recommendation.starts_with("Generated"));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("budget of 2"));
    }

    #[tokio::test]
    async fn met_controls_are_not_enriched() {
        let generator = Arc::new(ScriptedGenerator::ok());
        let handler = handler(generator.clone(), GenerationLimits::default());
        let signals = DocumentSignals::empty().with_evidence(
            ControlId::new("ID.AM-1").unwrap(),
            ControlEvidence::sufficient(["cmdb"]),
        );

        let report = handler
            .handle(command(EvaluationInput::Signals(signals), true))
            .await
            .unwrap();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 5);
        assert!(report.run.categories[0].results[0].recommendation.is_empty());
    }

    #[tokio::test]
    async fn failures_degrade_to_canonical_with_warning() {
        let generator = Arc::new(ScriptedGenerator {
            fail_controls: vec!["ID.AM-2"],
            ..ScriptedGenerator::ok()
        });
        let limits = GenerationLimits {
            max_generated: 3,
            ..Default::default()
        };
        let handler = handler(generator, limits);
        let catalog = FrameworkCatalog::builtin().unwrap();
        let canonical = catalog.find_control("NIST_CSF", "ID.AM-2").unwrap().recommendation();

        let report = handler
            .handle(command(EvaluationInput::Signals(DocumentSignals::empty()), true))
            .await
            .unwrap();

        assert_eq!(report.run.categories[0].results[1].recommendation, canonical);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("ID.AM-2") && w.contains("upstream exploded")));
    }

    #[tokio::test]
    async fn slow_generation_times_out_with_warning() {
        let generator = Arc::new(ScriptedGenerator {
            delay: Some(Duration::from_secs(30)),
            ..ScriptedGenerator::ok()
        });
        let limits = GenerationLimits {
            max_generated: 1,
            timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let handler = handler(generator, limits);

        let report = handler
            .handle(command(EvaluationInput::Signals(DocumentSignals::empty()), true))
            .await
            .unwrap();

        assert!(report.warnings.iter().any(|w| w.contains("timed out")));
        assert!(!report.run.categories[0].results[0].recommendation.starts_with("Generated"));
    }

    #[tokio::test]
    async fn generation_stops_at_total_deadline() {
        let generator = Arc::new(ScriptedGenerator {
            delay: Some(Duration::from_secs(30)),
            ..ScriptedGenerator::ok()
        });
        let limits = GenerationLimits {
            max_generated: 5,
            concurrency: 1,
            timeout: Duration::from_secs(10),
            deadline: Duration::from_millis(50),
            ..Default::default()
        };
        let handler = handler(generator, limits);
        let catalog = FrameworkCatalog::builtin().unwrap();

        let started = std::time::Instant::now();
        let report = handler
            .handle(command(EvaluationInput::Signals(DocumentSignals::empty()), true))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(report.run.result_count(), 6);
        let framework = catalog.get_framework("NIST_CSF").unwrap();
        for (result, template) in report.run.results().zip(framework.controls()) {
            assert_eq!(result.recommendation, template.recommendation());
        }
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("5 control(s)") && w.contains("deadline")));
    }

    #[test]
    fn limits_derive_deadline_from_request_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 20;
        let limits = GenerationLimits::from(&config);
        assert_eq!(limits.deadline, Duration::from_secs(15));
        assert_eq!(limits.timeout, config.evaluation.generation_timeout());
    }
}
