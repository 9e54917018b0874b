//! Anthropic messages API client.

use async_trait::async_trait;
use serde_json::json;

use crate::error::ApiError;
use crate::provider::clients::{check_status, http_client, request_timeout, send_error};
use crate::provider::profile::ProviderConfig;
use crate::provider::{CompletionOptions, ModelProviderClient};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 8192;

pub struct AnthropicClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ApiError> {
        Ok(Self {
            config,
            http: http_client()?,
        })
    }

    fn label(&self) -> &str {
        self.config.name()
    }
}

#[async_trait]
impl ModelProviderClient for AnthropicClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ApiError> {
        let url = format!("{}/v1/messages", self.config.base_url()?);
        let key = self.config.resolve_api_key()?.ok_or_else(|| {
            ApiError::ConfigError(format!("Provider {} has no API key", self.label()))
        })?;

        let mut body = json!({
            "model": self.config.model,
            "max_tokens": options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }

        let response = self
            .http
            .post(&url)
            .timeout(request_timeout(options))
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(self.label(), e))?;
        let response = check_status(self.label(), response).await?;

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            ApiError::ProviderError(format!("{} returned unreadable JSON: {}", self.label(), e))
        })?;
        payload["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::ProviderError(format!(
                    "{} response is missing completion text",
                    self.label()
                ))
            })
    }
}
