//! HTTP handlers for compliance endpoints.
//!
//! These handlers connect Axum routes to the compliance command and query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::application::handlers::compliance::{
    EvaluatePolicyCommand, EvaluatePolicyHandler, EvaluationInput, GenerateRemediationCommand,
    GenerateRemediationHandler, GenerationLimits, GetFrameworkHandler, GetFrameworkQuery,
    ListFrameworksHandler,
};
use crate::config::AppConfig;
use crate::domain::catalog::FrameworkCatalog;
use crate::domain::errors::ComplianceError;
use crate::domain::evaluation::EvaluationEngine;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::TextGenerator;

use super::dto::{
    ErrorResponse, EvaluateRequest, EvaluationResponse, FrameworkListResponse, FrameworkResponse,
    RemediationRequestDto, RemediationResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for compliance endpoints.
#[derive(Clone)]
pub struct ComplianceAppState {
    pub list_frameworks: Arc<ListFrameworksHandler>,
    pub get_framework: Arc<GetFrameworkHandler>,
    pub evaluate_policy: Arc<EvaluatePolicyHandler>,
    pub generate_remediation: Arc<GenerateRemediationHandler>,
    /// Include internal error messages in responses.
    pub verbose_errors: bool,
}

impl ComplianceAppState {
    /// Wires the compliance handlers around one catalog and text generator.
    pub fn new(
        catalog: Arc<FrameworkCatalog>,
        generator: Arc<dyn TextGenerator>,
        config: &AppConfig,
    ) -> Self {
        let engine = EvaluationEngine::new(catalog.clone());
        Self {
            list_frameworks: Arc::new(ListFrameworksHandler::new(catalog.clone())),
            get_framework: Arc::new(GetFrameworkHandler::new(catalog)),
            evaluate_policy: Arc::new(EvaluatePolicyHandler::new(
                engine,
                generator.clone(),
                GenerationLimits::from(config),
            )),
            generate_remediation: Arc::new(GenerateRemediationHandler::new(
                generator,
                config.evaluation.max_document_chars,
                config.evaluation.generation_timeout(),
            )),
            verbose_errors: config.features.verbose_errors,
        }
    }

    fn error(&self, err: ComplianceError) -> ComplianceApiError {
        ComplianceApiError::from_domain(err, self.verbose_errors)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/frameworks - List frameworks in catalog order
pub async fn list_frameworks(State(state): State<ComplianceAppState>) -> impl IntoResponse {
    Json(FrameworkListResponse {
        frameworks: state.list_frameworks.handle(),
    })
}

/// GET /api/frameworks/:id - Get one framework's categories and controls
pub async fn get_framework(
    State(state): State<ComplianceAppState>,
    Path(framework_id): Path<String>,
) -> Result<Json<FrameworkResponse>, ComplianceApiError> {
    let framework = state
        .get_framework
        .handle(GetFrameworkQuery { framework_id })
        .map_err(|e| state.error(e))?;
    Ok(Json(framework.into()))
}

/// POST /api/evaluations - Evaluate a document against a framework
pub async fn evaluate_policy(
    State(state): State<ComplianceAppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluationResponse>, ComplianceApiError> {
    let Json(req) = payload?;

    let framework_id = match req.framework_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            return Err(ComplianceApiError::bad_request(
                "Missing required field: frameworkId",
            ))
        }
    };
    let input = match (req.signals, req.document_text) {
        (Some(signals), None) => EvaluationInput::Signals(signals),
        (None, Some(text)) => EvaluationInput::DocumentText(text),
        (Some(_), Some(_)) => {
            return Err(ComplianceApiError::bad_request(
                "Provide either signals or documentText, not both",
            ))
        }
        (None, None) => {
            return Err(ComplianceApiError::bad_request(
                "Missing required field: signals or documentText",
            ))
        }
    };

    let report = state
        .evaluate_policy
        .handle(EvaluatePolicyCommand {
            framework_id,
            input,
            generate_recommendations: req.generate_recommendations,
        })
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(report.into()))
}

/// POST /api/remediation - Generate remediation policy text
pub async fn generate_remediation(
    State(state): State<ComplianceAppState>,
    payload: Result<Json<RemediationRequestDto>, JsonRejection>,
) -> Result<Json<RemediationResponse>, ComplianceApiError> {
    let Json(req) = payload?;

    let generated_text = state
        .generate_remediation
        .handle(GenerateRemediationCommand {
            original_document: req.original_document,
            target_control: req.target_control,
            framework: req.framework,
        })
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(RemediationResponse { generated_text }))
}

// ════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type that converts compliance errors to HTTP responses.
///
/// Bodies and statuses are derived from the foundation `ErrorCode`.
#[derive(Debug)]
pub struct ComplianceApiError(DomainError);

impl ComplianceApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::InvalidInput, message))
    }

    fn from_domain(err: ComplianceError, verbose: bool) -> Self {
        if !err.is_client_error() {
            error!(code = %err.code(), error = %err, "Compliance request failed");
        }

        let error = DomainError::from(err);
        if error.code == ErrorCode::ConfigurationError && !verbose {
            return Self(DomainError::new(ErrorCode::InternalError, "Internal server error"));
        }
        Self(error)
    }

    fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::FrameworkNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ConfigurationError | ErrorCode::UpstreamFailure | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ComplianceApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ComplianceApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let DomainError {
            code,
            message,
            details,
        } = self.0;

        let mut body = ErrorResponse::new(code.to_string(), message);
        if !details.is_empty() {
            body = body.with_details(json!(details));
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogError;

    #[test]
    fn not_found_maps_to_404_with_details() {
        let err = ComplianceApiError::from_domain(
            ComplianceError::framework_not_found("NOT_A_FRAMEWORK"),
            false,
        );
        assert_eq!(err.0.code, ErrorCode::FrameworkNotFound);
        assert_eq!(
            err.0.details.get("frameworkId"),
            Some(&"NOT_A_FRAMEWORK".to_string())
        );
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let err = ComplianceApiError::from_domain(ComplianceError::invalid_input("bad"), false);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_keeps_message() {
        let err = ComplianceApiError::from_domain(ComplianceError::upstream("quota exhausted"), false);
        assert_eq!(err.0.code, ErrorCode::UpstreamFailure);
        assert_eq!(err.0.message, "quota exhausted");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn configuration_message_hidden_unless_verbose() {
        let quiet = ComplianceApiError::from_domain(CatalogError::Empty.into(), false);
        assert_eq!(quiet.0.code, ErrorCode::InternalError);
        assert_eq!(quiet.0.message, "Internal server error");

        let verbose = ComplianceApiError::from_domain(CatalogError::Empty.into(), true);
        assert_eq!(verbose.0.code, ErrorCode::ConfigurationError);
        assert_eq!(verbose.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
