//! ListFrameworksHandler - Query handler listing catalog frameworks.

use std::sync::Arc;

use crate::domain::catalog::{FrameworkCatalog, FrameworkSummary};

/// Handler for listing frameworks in catalog declaration order.
pub struct ListFrameworksHandler {
    catalog: Arc<FrameworkCatalog>,
}

impl ListFrameworksHandler {
    pub fn new(catalog: Arc<FrameworkCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self) -> Vec<FrameworkSummary> {
        self.catalog.list_frameworks()
    }
}
