//! Evaluation and recommendation generation limits

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for generated recommendations in one request.
const MAX_GENERATED_RECOMMENDATIONS: usize = 50;

/// Evaluation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Generation calls allowed per evaluation request
    #[serde(default = "default_max_generated")]
    pub max_generated_recommendations: usize,

    /// Generation calls in flight at once per request
    #[serde(default = "default_concurrency")]
    pub generation_concurrency: usize,

    /// Timeout per generation call in seconds
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    /// Characters of the document kept as a style sample
    #[serde(default = "default_max_document_chars")]
    pub max_document_chars: usize,
}

impl EvaluationConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Longest a request can spend generating when every call times out.
    pub fn worst_case_generation_secs(&self) -> u64 {
        let concurrency = self.generation_concurrency.max(1);
        let rounds = ((self.max_generated_recommendations + concurrency - 1) / concurrency) as u64;
        rounds.saturating_mul(self.generation_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_generated_recommendations > MAX_GENERATED_RECOMMENDATIONS {
            return Err(ValidationError::InvalidEvaluationSetting {
                field: "max_generated_recommendations",
                reason: "must not exceed 50",
            });
        }
        if self.generation_concurrency == 0 {
            return Err(ValidationError::InvalidEvaluationSetting {
                field: "generation_concurrency",
                reason: "must be at least 1",
            });
        }
        if self.generation_timeout_secs == 0 {
            return Err(ValidationError::InvalidEvaluationSetting {
                field: "generation_timeout_secs",
                reason: "must be at least 1",
            });
        }
        if self.max_document_chars == 0 {
            return Err(ValidationError::InvalidEvaluationSetting {
                field: "max_document_chars",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_generated_recommendations: default_max_generated(),
            generation_concurrency: default_concurrency(),
            generation_timeout_secs: default_generation_timeout(),
            max_document_chars: default_max_document_chars(),
        }
    }
}

fn default_max_generated() -> usize {
    5
}

fn default_concurrency() -> usize {
    2
}

fn default_generation_timeout() -> u64 {
    8
}

fn default_max_document_chars() -> usize {
    4000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_defaults() {
        let config = EvaluationConfig::default();
        assert_eq!(config.max_generated_recommendations, 5);
        assert_eq!(config.generation_concurrency, 2);
        assert_eq!(config.generation_timeout(), Duration::from_secs(8));
        assert_eq!(config.worst_case_generation_secs(), 24);
        assert_eq!(config.max_document_chars, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_budget_cap() {
        let config = EvaluationConfig {
            max_generated_recommendations: 51,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvaluationConfig {
            max_generated_recommendations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_worst_case_rounds_up_partial_batches() {
        let config = EvaluationConfig {
            max_generated_recommendations: 5,
            generation_concurrency: 1,
            generation_timeout_secs: 1,
            ..Default::default()
        };
        assert_eq!(config.worst_case_generation_secs(), 5);

        let config = EvaluationConfig {
            max_generated_recommendations: 0,
            ..Default::default()
        };
        assert_eq!(config.worst_case_generation_secs(), 0);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = EvaluationConfig {
            generation_concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEvaluationSetting {
                field: "generation_concurrency",
                ..
            })
        ));
    }
}
