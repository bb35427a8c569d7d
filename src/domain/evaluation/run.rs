//! Evaluation output, ordered by category then control declaration order.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ControlId, ControlStatus, FrameworkId};

/// Outcome for a single control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResult {
    pub id: ControlId,
    pub control: String,
    pub status: ControlStatus,
    pub details: String,
    pub recommendation: String,
}

/// A category's results in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedCategory {
    pub name: String,
    pub description: String,
    pub results: Vec<ControlResult>,
}

/// Per-status counts across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub met: usize,
    pub partial: usize,
    pub gap: usize,
    /// Met counts fully, partial counts half. Zero for an empty framework.
    pub coverage_percent: u8,
}

impl RunSummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ControlResult>) -> Self {
        let mut summary = RunSummary::default();
        for result in results {
            summary.total += 1;
            match result.status {
                ControlStatus::Met => summary.met += 1,
                ControlStatus::Partial => summary.partial += 1,
                ControlStatus::Gap => summary.gap += 1,
            }
        }
        if summary.total > 0 {
            let score = summary.met * 2 + summary.partial;
            summary.coverage_percent = ((score * 100) / (summary.total * 2)) as u8;
        }
        summary
    }
}

/// Per-request copy of a framework with statuses filled in for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRun {
    pub framework_id: FrameworkId,
    pub framework_name: String,
    pub categories: Vec<EvaluatedCategory>,
    pub summary: RunSummary,
}

impl EvaluationRun {
    /// All results in category then declaration order.
    pub fn results(&self) -> impl Iterator<Item = &ControlResult> {
        self.categories.iter().flat_map(|c| c.results.iter())
    }

    pub fn result_count(&self) -> usize {
        self.categories.iter().map(|c| c.results.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: ControlStatus) -> ControlResult {
        ControlResult {
            id: ControlId::new("X-1").unwrap(),
            control: "c".to_string(),
            status,
            details: String::new(),
            recommendation: String::new(),
        }
    }

    #[test]
    fn summary_counts_statuses() {
        let results = vec![
            result(ControlStatus::Met),
            result(ControlStatus::Partial),
            result(ControlStatus::Gap),
            result(ControlStatus::Gap),
        ];
        let summary = RunSummary::from_results(&results);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.met, 1);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.gap, 2);
        // (2 + 1) / 8
        assert_eq!(summary.coverage_percent, 37);
    }

    #[test]
    fn empty_summary_has_zero_coverage() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn all_met_is_full_coverage() {
        let results = vec![result(ControlStatus::Met); 3];
        assert_eq!(RunSummary::from_results(&results).coverage_percent, 100);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(RunSummary::from_results(&[result(ControlStatus::Met)])).unwrap();
        assert_eq!(json["coveragePercent"], 100);
    }
}
