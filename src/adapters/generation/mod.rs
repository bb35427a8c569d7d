//! TextGenerator adapters.
//!
//! - `AiTextGenerator` - Generates text through an `AIProvider`
//! - `DisabledTextGenerator` - Always fails; used when generation is off

mod ai_text_generator;
mod disabled;

pub use ai_text_generator::AiTextGenerator;
pub use disabled::DisabledTextGenerator;

use std::sync::Arc;

use crate::adapters::ai::build_provider;
use crate::config::AppConfig;
use crate::ports::{AIError, TextGenerator};

/// Builds the text generator selected by configuration.
pub fn build_text_generator(config: &AppConfig) -> Result<Arc<dyn TextGenerator>, AIError> {
    if !config.features.enable_text_generation {
        return Ok(Arc::new(DisabledTextGenerator));
    }
    let provider = build_provider(&config.ai)?;
    Ok(Arc::new(AiTextGenerator::new(provider)))
}
