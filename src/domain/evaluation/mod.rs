//! Evaluation - assigns met/gap/partial to every control of a framework.
//!
//! - [`DocumentSignals`] carry per-control evidence for one document
//! - [`EvidencePolicy`] implementations decide a status from that evidence
//! - [`EvaluationEngine`] applies the resolved policy to each catalog control
//! - [`KeywordSignalExtractor`] derives signals from raw text

mod engine;
mod errors;
mod extractor;
mod policy;
mod run;
mod signals;

pub use engine::EvaluationEngine;
pub use errors::EvaluationError;
pub use extractor::KeywordSignalExtractor;
pub use policy::{EvidencePolicy, PolicyRegistry, SignalEvidencePolicy, ThresholdEvidencePolicy};
pub use run::{ControlResult, EvaluatedCategory, EvaluationRun, RunSummary};
pub use signals::{ControlEvidence, DocumentSignals, EvidenceStrength};
