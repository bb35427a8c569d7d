//! GetFrameworkHandler - Query handler returning one framework template.

use std::sync::Arc;

use crate::domain::catalog::{Framework, FrameworkCatalog};
use crate::domain::errors::ComplianceError;

/// Query to get a framework by id.
#[derive(Debug, Clone)]
pub struct GetFrameworkQuery {
    pub framework_id: String,
}

pub struct GetFrameworkHandler {
    catalog: Arc<FrameworkCatalog>,
}

impl GetFrameworkHandler {
    pub fn new(catalog: Arc<FrameworkCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: GetFrameworkQuery) -> Result<Framework, ComplianceError> {
        self.catalog.get_framework(&query.framework_id).cloned()
    }
}
