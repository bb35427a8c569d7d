//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for various LLM providers.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions
//! - `AnthropicProvider` - Anthropic Claude messages
//! - `FailoverAIProvider` - Wrapper with automatic failover between providers

mod anthropic_provider;
mod factory;
mod failover_provider;
mod http_support;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use factory::build_provider;
pub use failover_provider::FailoverAIProvider;
pub use mock_provider::MockAIProvider;
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
