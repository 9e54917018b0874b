//! Provider profiles: the TOML-serialized configuration for one model
//! provider.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::provider::CompletionOptions;

/// Provider type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
    #[serde(rename = "local")]
    LocalCustom,
}

impl ProviderType {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderType::OpenAI),
            "anthropic" => Ok(ProviderType::Anthropic),
            "ollama" => Ok(ProviderType::Ollama),
            "local" => Ok(ProviderType::LocalCustom),
            other => Err(ApiError::ConfigError(format!(
                "Unknown provider type: {} (expected openai, anthropic, ollama, or local)",
                other
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "openai",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Ollama => "ollama",
            ProviderType::LocalCustom => "local",
        }
    }

    /// Conventional environment variable consulted for the API key when
    /// the profile does not carry one.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderType::Ollama => None,
            ProviderType::LocalCustom => Some("BLUEPRINT_API_KEY"),
        }
    }

    /// Whether requests to this provider must carry an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderType::OpenAI | ProviderType::Anthropic)
    }

    /// Endpoint used when the profile leaves it unset.
    pub fn default_endpoint(&self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("https://api.openai.com"),
            ProviderType::Anthropic => Some("https://api.anthropic.com"),
            ProviderType::Ollama => Some("http://localhost:11434"),
            ProviderType::LocalCustom => None,
        }
    }
}

/// Model provider configuration owned by the provider domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    /// Provider type.
    pub provider_type: ProviderType,

    /// Model identifier.
    pub model: String,

    /// API key; optional and can be loaded from environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL; provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Default completion options for this provider.
    #[serde(default)]
    pub default_options: CompletionOptions,
}

impl ProviderConfig {
    pub fn name(&self) -> &str {
        self.provider_name.as_deref().unwrap_or("unnamed")
    }

    /// Endpoint with scheme inference: bare hosts on local providers get
    /// `https://` prepended.
    pub fn normalized_endpoint(&self) -> Option<String> {
        self.endpoint.as_deref().map(|endpoint| {
            let endpoint = endpoint.trim().trim_end_matches('/');
            if self.provider_type == ProviderType::LocalCustom && !has_scheme(endpoint) {
                format!("https://{}", endpoint)
            } else {
                endpoint.to_string()
            }
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> Result<String, ApiError> {
        self.normalized_endpoint()
            .or_else(|| self.provider_type.default_endpoint().map(str::to_string))
            .ok_or_else(|| {
                ApiError::ConfigError(format!(
                    "Provider {} has no endpoint and type {} has no default",
                    self.name(),
                    self.provider_type.label()
                ))
            })
    }

    /// API key from the profile or the conventional environment variable.
    pub fn resolve_api_key(&self) -> Result<Option<String>, ApiError> {
        if let Some(key) = &self.api_key {
            if !key.trim().is_empty() {
                return Ok(Some(key.clone()));
            }
        }
        if let Some(var) = self.provider_type.api_key_env() {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(Some(key));
                }
            }
        }
        if self.provider_type.requires_api_key() {
            let hint = self
                .provider_type
                .api_key_env()
                .unwrap_or("the provider profile");
            return Err(ApiError::ConfigError(format!(
                "Provider {} has no API key; set one in the profile or via {}",
                self.name(),
                hint
            )));
        }
        Ok(None)
    }

    /// Validate provider configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if self.provider_type == ProviderType::LocalCustom && self.endpoint.is_none() {
            return Err("Local providers must set an endpoint".to_string());
        }
        if let Some(endpoint) = self.normalized_endpoint() {
            if !endpoint_is_valid(&endpoint) {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        }
        Ok(())
    }
}

fn has_scheme(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

fn endpoint_is_valid(endpoint: &str) -> bool {
    if !has_scheme(endpoint) {
        return false;
    }
    let rest = match endpoint.split_once("://") {
        Some((_, rest)) => rest,
        None => return false,
    };
    let host = rest.split('/').next().unwrap_or_default();
    !host.is_empty() && !host.chars().any(char::is_whitespace)
}
