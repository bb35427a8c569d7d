//! Framework catalog configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Where the framework catalog is loaded from.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON or YAML catalog file. The built-in catalog is used when unset.
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if path.as_os_str().to_string_lossy().trim().is_empty() => {
                Err(ValidationError::BlankCatalogPath)
            }
            _ => Ok(()),
        }
    }
}
