//! Model Provider Integration
//!
//! Profiles, clients, and the generation service for the external
//! language-model API. One completion request per generation; no retry
//! or backoff lives at this layer.

pub mod clients;
pub mod generation;
pub mod profile;
pub mod registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use generation::{parse_generation_payload, GenerationService};
pub use profile::{ProviderConfig, ProviderType};
pub use registry::ProviderRegistry;

/// Per-request completion options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Sampling temperature; provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Completion token budget; provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// One-shot completion client for a configured provider.
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Send `prompt` and return the raw completion text.
    async fn complete(&self, prompt: &str, options: &CompletionOptions)
        -> Result<String, ApiError>;
}
