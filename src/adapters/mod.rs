//! Adapters - Infrastructure implementations of ports.
//!
//! - `ai` - LLM provider clients (OpenAI, Anthropic, failover, mock)
//! - `generation` - `TextGenerator` implementations
//! - `http` - Axum REST API

pub mod ai;
pub mod generation;
pub mod http;
