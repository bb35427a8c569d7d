//! Axum router configuration for compliance endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    evaluate_policy, generate_remediation, get_framework, list_frameworks, ComplianceAppState,
};

/// Create the compliance API router, mounted under `/api`.
///
/// # Routes
/// - `GET /frameworks` - List frameworks
/// - `GET /frameworks/:id` - Get framework details
/// - `POST /evaluations` - Evaluate a document
/// - `POST /remediation` - Generate remediation text (POST only)
pub fn compliance_router() -> Router<ComplianceAppState> {
    Router::new()
        .route("/frameworks", get(list_frameworks))
        .route("/frameworks/:id", get(get_framework))
        .route("/evaluations", post(evaluate_policy))
        .route("/remediation", post(generate_remediation))
}
