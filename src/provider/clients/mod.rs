//! HTTP clients for the supported provider types.

mod anthropic;
mod ollama;
mod openai;

use std::time::Duration;

pub use anthropic::AnthropicClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use crate::error::ApiError;
use crate::provider::profile::{ProviderConfig, ProviderType};
use crate::provider::{CompletionOptions, ModelProviderClient};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Build the client for a profile. Local providers speak the
/// OpenAI-compatible protocol against their configured endpoint.
pub fn create_client(config: &ProviderConfig) -> Result<Box<dyn ModelProviderClient>, ApiError> {
    config.validate().map_err(ApiError::ConfigError)?;
    match config.provider_type {
        ProviderType::OpenAI | ProviderType::LocalCustom => {
            Ok(Box::new(OpenAiClient::new(config.clone())?))
        }
        ProviderType::Anthropic => Ok(Box::new(AnthropicClient::new(config.clone())?)),
        ProviderType::Ollama => Ok(Box::new(OllamaClient::new(config.clone())?)),
    }
}

pub(crate) fn request_timeout(options: &CompletionOptions) -> Duration {
    Duration::from_secs(options.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
}

pub(crate) fn http_client() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to build HTTP client: {}", e)))
}

pub(crate) fn send_error(provider: &str, e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::ProviderError(format!("{} request timed out", provider))
    } else {
        ApiError::ProviderError(format!("{} request failed: {}", provider, e))
    }
}

/// Map non-success responses to user-actionable messages: a rejected key
/// and an exhausted quota read differently from a generic failure.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match status.as_u16() {
        401 | 403 => format!(
            "{} rejected the API key. Check the provider profile or environment.",
            provider
        ),
        429 => format!(
            "{} reported a rate limit or exhausted quota. Try again later.",
            provider
        ),
        _ => format!("{} returned {}: {}", provider, status, truncate_body(&body)),
    };
    Err(ApiError::ProviderError(message))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 300;
    if body.chars().count() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{}...", truncated)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_when_unset() {
        assert_eq!(
            request_timeout(&CompletionOptions::default()),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        let options = CompletionOptions {
            timeout_secs: Some(7),
            ..Default::default()
        };
        assert_eq!(request_timeout(&options), Duration::from_secs(7));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(1000);
        assert!(truncate_body(&body).len() < 400);
        assert!(truncate_body(&body).ends_with("..."));
    }
}
