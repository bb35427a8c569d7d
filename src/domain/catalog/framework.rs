//! Immutable catalog value types: frameworks, categories and control templates.
//!
//! These are templates, not evaluation outputs. They are built once by the
//! catalog loader and only ever read afterwards.

use serde::Serialize;

use crate::domain::foundation::{ControlId, ControlStatus, FrameworkId};

/// A single control as declared in the catalog.
///
/// `details` and `recommendation` hold the canonical gap description and
/// remediation guidance used verbatim when the control is evaluated as a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlTemplate {
    id: ControlId,
    control: String,
    status: ControlStatus,
    details: String,
    recommendation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keywords: Vec<String>,
}

impl ControlTemplate {
    /// Creates a control template.
    pub fn new(
        id: ControlId,
        control: impl Into<String>,
        status: ControlStatus,
        details: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            control: control.into(),
            status,
            details: details.into(),
            recommendation: recommendation.into(),
            keywords: Vec::new(),
        }
    }

    /// Sets the evidence keywords used by the keyword signal extractor.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    /// Human-readable control statement.
    pub fn control(&self) -> &str {
        &self.control
    }

    /// Seeded placeholder status from the catalog.
    pub fn status(&self) -> ControlStatus {
        self.status
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// An ordered group of controls within a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    name: String,
    description: String,
    #[serde(rename = "results")]
    controls: Vec<ControlTemplate>,
}

impl Category {
    /// Creates a category holding controls in declaration order.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        controls: Vec<ControlTemplate>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            controls,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Controls in declaration order.
    pub fn controls(&self) -> &[ControlTemplate] {
        &self.controls
    }
}

/// A compliance framework decomposed into ordered categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Framework {
    id: FrameworkId,
    name: String,
    description: String,
    categories: Vec<Category>,
}

impl Framework {
    /// Creates a framework.
    pub fn new(
        id: FrameworkId,
        name: impl Into<String>,
        description: impl Into<String>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            categories,
        }
    }

    pub fn id(&self) -> &FrameworkId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Iterates every control in category order, then declaration order.
    pub fn controls(&self) -> impl Iterator<Item = &ControlTemplate> {
        self.categories.iter().flat_map(|c| c.controls.iter())
    }

    /// Total number of controls across all categories.
    pub fn control_count(&self) -> usize {
        self.categories.iter().map(|c| c.controls.len()).sum()
    }

    /// Builds the listing view of this framework.
    pub fn summary(&self) -> FrameworkSummary {
        FrameworkSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category_count: self.categories.len(),
            control_count: self.control_count(),
        }
    }
}

/// Lightweight description of a framework for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkSummary {
    pub id: FrameworkId,
    pub name: String,
    pub description: String,
    pub category_count: usize,
    pub control_count: usize,
}
