//! Framework Catalog - read-only registry of frameworks with a lookup index.
//!
//! The catalog is built once at startup and shared by `Arc` handle with every
//! request. Construction rejects duplicate framework ids and duplicate control
//! ids within a framework instead of silently deduplicating them.
//!
//! # Example
//!
//! ```
//! use policy_gap_analyzer::domain::catalog::FrameworkCatalog;
//!
//! let catalog = FrameworkCatalog::builtin().expect("built-in catalog is valid");
//! let nist = catalog.get_framework("NIST_CSF").unwrap();
//! assert_eq!(nist.control_count(), 6);
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::domain::errors::ComplianceError;
use crate::domain::foundation::{ControlId, FrameworkId};

use super::loader::{parse_catalog, read_catalog_file, CatalogFormat};
use super::{CatalogError, ControlTemplate, Framework, FrameworkSummary};

/// Catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("data/frameworks.json");

/// Position of a control inside its framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ControlLocation {
    category: usize,
    control: usize,
}

/// Immutable registry of compliance frameworks.
#[derive(Debug, Clone)]
pub struct FrameworkCatalog {
    /// Frameworks in declaration order.
    frameworks: Vec<Framework>,

    /// Framework id to position in `frameworks`.
    framework_index: HashMap<FrameworkId, usize>,

    /// Per framework, control id to location.
    control_index: Vec<HashMap<ControlId, ControlLocation>>,
}

impl FrameworkCatalog {
    /// Builds the catalog and its indexes, failing on duplicate identities.
    pub fn from_frameworks(frameworks: Vec<Framework>) -> Result<Self, CatalogError> {
        if frameworks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut framework_index = HashMap::with_capacity(frameworks.len());
        let mut control_index = Vec::with_capacity(frameworks.len());

        for (position, framework) in frameworks.iter().enumerate() {
            if framework_index.insert(framework.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateFramework(framework.id().to_string()));
            }
            control_index.push(Self::index_controls(framework)?);
        }

        Ok(Self {
            frameworks,
            framework_index,
            control_index,
        })
    }

    fn index_controls(
        framework: &Framework,
    ) -> Result<HashMap<ControlId, ControlLocation>, CatalogError> {
        let mut index = HashMap::with_capacity(framework.control_count());
        for (category_pos, category) in framework.categories().iter().enumerate() {
            for (control_pos, control) in category.controls().iter().enumerate() {
                let location = ControlLocation {
                    category: category_pos,
                    control: control_pos,
                };
                if index.insert(control.id().clone(), location).is_some() {
                    return Err(CatalogError::duplicate_control(
                        framework.id().as_str(),
                        control.id().as_str(),
                    ));
                }
            }
        }
        Ok(index)
    }

    /// Parses and validates a catalog document.
    pub fn from_source(source: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        Self::from_frameworks(parse_catalog(source, format)?)
    }

    /// Loads and validates a catalog file (JSON, or YAML by extension).
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_frameworks(read_catalog_file(path)?)
    }

    /// Loads the catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_source(BUILTIN_CATALOG, CatalogFormat::Json)
    }

    /// Resolves a framework by id.
    pub fn get_framework(&self, id: &str) -> Result<&Framework, ComplianceError> {
        self.position_of(id)
            .map(|position| &self.frameworks[position])
            .ok_or_else(|| ComplianceError::framework_not_found(id))
    }

    /// Summaries of all frameworks in declaration order.
    pub fn list_frameworks(&self) -> Vec<FrameworkSummary> {
        self.frameworks.iter().map(Framework::summary).collect()
    }

    /// Looks up a control by id within a framework.
    pub fn find_control(&self, framework_id: &str, control_id: &str) -> Option<&ControlTemplate> {
        let position = self.position_of(framework_id)?;
        let control_id = ControlId::new(control_id).ok()?;
        let framework = &self.frameworks[position];
        self.control_index[position]
            .get(&control_id)
            .map(|loc| &framework.categories()[loc.category].controls()[loc.control])
    }

    /// Returns true if the framework declares the control.
    pub fn has_control(&self, framework_id: &str, control_id: &ControlId) -> bool {
        self.position_of(framework_id)
            .is_some_and(|position| self.control_index[position].contains_key(control_id))
    }

    /// Number of frameworks in the catalog.
    pub fn framework_count(&self) -> usize {
        self.frameworks.len()
    }

    fn position_of(&self, framework_id: &str) -> Option<usize> {
        FrameworkId::new(framework_id)
            .ok()
            .and_then(|id| self.framework_index.get(&id).copied())
    }
}
