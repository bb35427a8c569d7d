//! Request and response DTOs for compliance endpoints.
//!
//! JSON field names are camelCase.

use serde::{Deserialize, Serialize};

use crate::application::handlers::compliance::EvaluationReport;
use crate::domain::catalog::{Category, Framework, FrameworkSummary};
use crate::domain::evaluation::{DocumentSignals, EvaluatedCategory, RunSummary};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/evaluations
///
/// Exactly one of `signals` or `documentText` must be present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub framework_id: Option<String>,
    pub signals: Option<DocumentSignals>,
    pub document_text: Option<String>,
    #[serde(default)]
    pub generate_recommendations: bool,
}

/// POST /api/remediation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationRequestDto {
    pub original_document: Option<String>,
    pub target_control: Option<String>,
    pub framework: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct FrameworkListResponse {
    pub frameworks: Vec<FrameworkSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub control_count: usize,
    pub categories: Vec<Category>,
}

impl From<Framework> for FrameworkResponse {
    fn from(framework: Framework) -> Self {
        Self {
            id: framework.id().to_string(),
            name: framework.name().to_string(),
            description: framework.description().to_string(),
            control_count: framework.control_count(),
            categories: framework.categories().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub evaluation_id: String,
    pub evaluated_at: String,
    pub framework_id: String,
    pub framework_name: String,
    pub categories: Vec<EvaluatedCategory>,
    pub summary: RunSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl From<EvaluationReport> for EvaluationResponse {
    fn from(report: EvaluationReport) -> Self {
        Self {
            evaluation_id: report.evaluation_id.to_string(),
            evaluated_at: report.evaluated_at.to_rfc3339(),
            framework_id: report.run.framework_id.to_string(),
            framework_name: report.run.framework_name,
            categories: report.run.categories,
            summary: report.run.summary,
            warnings: report.warnings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationResponse {
    pub generated_text: String,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
