//! OpenAI-compatible chat completion client.
//!
//! Also serves `local` profiles, which speak the same protocol against a
//! custom endpoint.

use async_trait::async_trait;
use serde_json::json;

use crate::error::ApiError;
use crate::provider::clients::{check_status, http_client, request_timeout, send_error};
use crate::provider::profile::ProviderConfig;
use crate::provider::{CompletionOptions, ModelProviderClient};

pub struct OpenAiClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
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
impl ModelProviderClient for OpenAiClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ApiError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url()?);
        let mut body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        let mut request = self
            .http
            .post(&url)
            .timeout(request_timeout(options))
            .json(&body);
        if let Some(key) = self.config.resolve_api_key()? {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| send_error(self.label(), e))?;
        let response = check_status(self.label(), response).await?;

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            ApiError::ProviderError(format!("{} returned unreadable JSON: {}", self.label(), e))
        })?;
        payload["choices"][0]["message"]["content"]
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
