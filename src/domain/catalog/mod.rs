//! Framework Catalog - compliance frameworks, categories and control templates.
//!
//! # Components
//!
//! - `Framework`, `Category`, `ControlTemplate` - immutable catalog value types
//! - `loader` - parses `{ [frameworkId]: Framework }` documents (JSON or YAML)
//! - `FrameworkCatalog` - validated registry with an id index, built once at startup

mod errors;
mod framework;
pub mod loader;
mod registry;

pub use errors::CatalogError;
pub use framework::{Category, ControlTemplate, Framework, FrameworkSummary};
pub use loader::CatalogFormat;
pub use registry::FrameworkCatalog;
