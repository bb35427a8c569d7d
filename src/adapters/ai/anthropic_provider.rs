//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514");
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_support::{check_status, map_send_error, with_retries};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

const ANTHROPIC_API_VERSION: &str = "2023-06-01";
/// The Messages API requires `max_tokens`.
const DEFAULT_MAX_TOKENS: u32 = 1024;
const CONTEXT_MARKERS: &[&str] = &["prompt is too long"];

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// System messages are folded into the top-level `system` field.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        let mut system: Vec<&str> = request.system_prompt.iter().map(String::as_str).collect();
        let mut messages = Vec::with_capacity(request.messages.len());

        for msg in &request.messages {
            match msg.role {
                MessageRole::System => system.push(&msg.content),
                MessageRole::User | MessageRole::Assistant => messages.push(AnthropicMessage {
                    role: if msg.role == MessageRole::User { "user" } else { "assistant" }
                        .to_string(),
                    content: msg.content.clone(),
                }),
            }
        }

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
        }
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&self.to_anthropic_request(request))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response, CONTEXT_MARKERS, 60).await?;

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;
        Ok(into_completion(body))
    }
}

fn into_completion(body: AnthropicResponse) -> CompletionResponse {
    let content = body
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect::<String>();

    let finish_reason = match body.stop_reason.as_deref() {
        Some("max_tokens") => FinishReason::Length,
        _ => FinishReason::Stop,
    };

    CompletionResponse {
        content,
        usage: TokenUsage::new(body.usage.input_tokens, body.usage.output_tokens),
        model: body.model,
        finish_reason,
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        with_retries("anthropic", self.config.max_retries, || self.attempt(&request)).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", self.config.model.clone())
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new(AnthropicConfig::new("key").with_model("claude-3-haiku")).unwrap()
    }

    #[test]
    fn system_messages_fold_into_system_field() {
        let request = CompletionRequest::new(RequestMetadata::new("t"))
            .with_system_prompt("first")
            .with_message(MessageRole::System, "second")
            .with_message(MessageRole::User, "write it");
        let body = serde_json::to_value(provider().to_anthropic_request(&request)).unwrap();

        assert_eq!(body["system"], "first\n\nsecond");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["max_tokens"], DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn messages_url_is_versioned() {
        assert_eq!(provider().messages_url(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn joins_text_blocks() {
        let body: AnthropicResponse = serde_json::from_str(
            r#"{"model":"claude-3-haiku","content":[{"type":"text","text":"Part one. "},{"type":"tool_use"},{"type":"text","text":"Part two."}],"stop_reason":"max_tokens","usage":{"input_tokens":3,"output_tokens":4}}"#,
        )
        .unwrap();
        let completion = into_completion(body);

        assert_eq!(completion.content, "Part one. Part two.");
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.usage.total_tokens, 7);
    }

    #[test]
    fn provider_info_names_model() {
        assert_eq!(provider().provider_info(), ProviderInfo::new("anthropic", "claude-3-haiku"));
    }
}
