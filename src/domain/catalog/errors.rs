//! Catalog validation errors.
//!
//! Every variant is a configuration problem: the process refuses to serve
//! evaluations against a catalog that produced one of these.

use thiserror::Error;

/// Structural problems found while loading the framework catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {format} catalog: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Catalog defines no frameworks")]
    Empty,

    #[error("Framework '{0}' is declared more than once")]
    DuplicateFramework(String),

    #[error("Framework key '{key}' does not match its id '{id}'")]
    FrameworkIdMismatch { key: String, id: String },

    #[error("Missing required field '{field}' at {location}")]
    MissingField { location: String, field: &'static str },

    #[error("Invalid status '{value}' at {location}")]
    InvalidStatus { location: String, value: String },

    #[error("Control '{control_id}' is declared more than once in framework '{framework_id}'")]
    DuplicateControl {
        framework_id: String,
        control_id: String,
    },

    #[error("Control '{control_id}' in framework '{framework_id}' has status '{status}' but no recommendation")]
    MissingRecommendation {
        framework_id: String,
        control_id: String,
        status: String,
    },
}

impl CatalogError {
    pub fn missing_field(location: impl Into<String>, field: &'static str) -> Self {
        CatalogError::MissingField {
            location: location.into(),
            field,
        }
    }

    pub fn duplicate_control(framework_id: impl Into<String>, control_id: impl Into<String>) -> Self {
        CatalogError::DuplicateControl {
            framework_id: framework_id.into(),
            control_id: control_id.into(),
        }
    }
}
