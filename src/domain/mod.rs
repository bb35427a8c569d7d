//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, control status, errors)
//! - `catalog` - Immutable framework → category → control templates
//! - `evaluation` - Pure gap evaluation engine and evidence policies
//! - `remediation` - Requests and prompts for generated remediation text
//! - `errors` - The compliance error taxonomy used across layers

pub mod catalog;
pub mod errors;
pub mod evaluation;
pub mod foundation;
pub mod remediation;
