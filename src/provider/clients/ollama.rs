//! Ollama generate API client.

use async_trait::async_trait;
use serde_json::json;

use crate::error::ApiError;
use crate::provider::clients::{check_status, http_client, request_timeout, send_error};
use crate::provider::profile::ProviderConfig;
use crate::provider::{CompletionOptions, ModelProviderClient};

pub struct OllamaClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl OllamaClient {
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
impl ModelProviderClient for OllamaClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ApiError> {
        let url = format!("{}/api/generate", self.config.base_url()?);
        let mut body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        });
        if let Some(temperature) = options.temperature {
            body["options"] = json!({ "temperature": temperature });
        }

        let response = self
            .http
            .post(&url)
            .timeout(request_timeout(options))
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(self.label(), e))?;
        let response = check_status(self.label(), response).await?;

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            ApiError::ProviderError(format!("{} returned unreadable JSON: {}", self.label(), e))
        })?;
        payload["response"]
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
