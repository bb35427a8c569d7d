//! Shared HTTP plumbing for the LLM provider adapters.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use tokio::time::sleep;
use tracing::warn;

use crate::ports::AIError;

/// Maps a reqwest send failure to an [`AIError`].
pub(super) fn map_send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Passes successful responses through; classifies error statuses.
///
/// `context_markers` are body fragments that identify an over-long prompt.
pub(super) async fn check_status(
    response: Response,
    context_markers: &[&str],
    default_retry_after: u32,
) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, body, context_markers, default_retry_after))
}

pub(super) fn classify_status(
    status: StatusCode,
    body: String,
    context_markers: &[&str],
    default_retry_after: u32,
) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&body).unwrap_or(default_retry_after)),
        400 if context_markers.iter().any(|m| body.contains(m)) => {
            AIError::ContextTooLong { tokens: 0, max: 0 }
        }
        400 => AIError::InvalidRequest(body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Extracts "try again in Ns" from a provider error body.
pub(super) fn parse_retry_after(body: &str) -> Option<u32> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = parsed.get("error")?.get("message")?.as_str()?;
    let rest = &message[message.find("try again in ")? + "try again in ".len()..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Runs `attempt` until it succeeds, fails permanently, or retries run out.
///
/// Backoff doubles from one second.
pub(super) async fn with_retries<F, Fut, T>(
    provider: &'static str,
    max_retries: u32,
    mut attempt: F,
) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut retry_count = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && retry_count < max_retries => {
                warn!(provider, retry = retry_count + 1, error = %err, "Retrying AI request");
                sleep(Duration::from_secs(1 << retry_count)).await;
                retry_count += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
