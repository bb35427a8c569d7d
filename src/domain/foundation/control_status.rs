//! ControlStatus enum for the outcome of evaluating one control.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Compliance status of a single control.
///
/// `Gap` is the default: a control without evidence is a gap, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    Met,
    #[default]
    Gap,
    Partial,
}

impl ControlStatus {
    /// Returns true if the control is fully satisfied.
    pub fn is_met(&self) -> bool {
        matches!(self, ControlStatus::Met)
    }

    /// Returns true if the control needs remediation and therefore a recommendation.
    pub fn needs_remediation(&self) -> bool {
        !self.is_met()
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlStatus::Met => "met",
            ControlStatus::Gap => "gap",
            ControlStatus::Partial => "partial",
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ControlStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "met" => Ok(ControlStatus::Met),
            "gap" => Ok(ControlStatus::Gap),
            "partial" => Ok(ControlStatus::Partial),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_gap() {
        assert_eq!(ControlStatus::default(), ControlStatus::Gap);
    }

    #[test]
    fn only_met_skips_remediation() {
        assert!(!ControlStatus::Met.needs_remediation());
        assert!(ControlStatus::Gap.needs_remediation());
        assert!(ControlStatus::Partial.needs_remediation());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("GAP".parse::<ControlStatus>().unwrap(), ControlStatus::Gap);
        assert_eq!(" partial ".parse::<ControlStatus>().unwrap(), ControlStatus::Partial);
        assert!("done".parse::<ControlStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ControlStatus::Met).unwrap();
        assert_eq!(json, "\"met\"");
    }
}
