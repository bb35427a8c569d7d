//! Strongly-typed identifier value objects.
//!
//! Framework and control identifiers come from catalog data and are
//! human-readable strings (`NIST_CSF`, `ID.AM-1`). Evaluation runs are
//! identified by random UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of a compliance framework, unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkId(String);

impl FrameworkId {
    /// Creates a new FrameworkId, returning error if blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("framework_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FrameworkId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a control, unique within its framework (e.g. `ID.AM-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(String);

impl ControlId {
    /// Creates a new ControlId, returning error if blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("control_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ControlId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for a single evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(Uuid);

impl EvaluationId {
    /// Creates a new random EvaluationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EvaluationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_id_rejects_blank() {
        assert!(FrameworkId::new("").is_err());
        assert!(FrameworkId::new("   ").is_err());
        assert_eq!(FrameworkId::new("NIST_CSF").unwrap().as_str(), "NIST_CSF");
    }

    #[test]
    fn control_id_parses_from_str() {
        let id: ControlId = "ID.AM-1".parse().unwrap();
        assert_eq!(id.to_string(), "ID.AM-1");
    }

    #[test]
    fn control_id_serializes_transparently() {
        let id = ControlId::new("PR.AC-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"PR.AC-1\"");
    }

    #[test]
    fn evaluation_id_roundtrips_through_display() {
        let id = EvaluationId::new();
        let parsed: EvaluationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
