//! Generation service: prompt in, parsed result out.

use tracing::info;

use crate::error::ApiError;
use crate::provider::{CompletionOptions, ModelProviderClient};
use crate::types::GenerationResult;

pub struct GenerationService;

impl GenerationService {
    /// Run one generation against `client` and parse the payload.
    pub async fn generate(
        client: &dyn ModelProviderClient,
        options: &CompletionOptions,
        prompt: &str,
    ) -> Result<GenerationResult, ApiError> {
        info!("Requesting scaffold and guide from provider");
        let raw = client.complete(prompt, options).await?;
        info!(bytes = raw.len(), "Parsing generation payload");
        parse_generation_payload(&raw)
    }
}

/// Parse a raw completion into a `GenerationResult`.
///
/// Tolerates a Markdown code fence around the JSON, but requires both
/// `fileSystem` and `guideMd` to be present.
pub fn parse_generation_payload(raw: &str) -> Result<GenerationResult, ApiError> {
    let text = strip_code_fence(raw.trim());
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ApiError::PayloadError(format!("response is not valid JSON: {}", e)))?;

    if value.get("fileSystem").is_none() || value.get("guideMd").is_none() {
        return Err(ApiError::PayloadError(
            "response is missing fileSystem or guideMd".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        ApiError::PayloadError(format!("response does not match the result schema: {}", e))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") after the opening fence.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return text,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
