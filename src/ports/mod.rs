//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - Generates remediation policy text from a prompt
//! - `AIProvider` - LLM completion API used by the AI-backed text generator

pub mod ai_provider;
mod text_generator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use text_generator::{TextGenerator, UpstreamFailure};
