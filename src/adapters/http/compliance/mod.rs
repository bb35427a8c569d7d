//! HTTP adapter for the compliance module.
//!
//! # Endpoints
//!
//! - `GET /api/frameworks` - List catalog frameworks
//! - `GET /api/frameworks/:id` - Framework categories and controls
//! - `POST /api/evaluations` - Evaluate a document against a framework
//! - `POST /api/remediation` - Generate remediation policy text

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ComplianceApiError, ComplianceAppState};
pub use routes::compliance_router;
