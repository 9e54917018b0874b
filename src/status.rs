//! Workspace status types and text formatting.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Unified status: result section and provider section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub result: ResultStatus,
    pub providers: Vec<ProviderStatusEntry>,
}

/// Stored-result section: absent, or present with identity and sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultStatus {
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One row for the provider status table / JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatusEntry {
    pub provider_name: String,
    pub provider_type: String,
    pub model: String,
}

/// Format unified status as human-readable text.
pub fn format_status_text(data: &StatusOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Result")));
    if !data.result.present {
        out.push_str("  Stored result: no\n");
        if let Some(ref msg) = data.result.message {
            out.push_str(&format!("  {}\n", msg));
        }
        out.push('\n');
    } else {
        if let Some(ref digest) = data.result.digest {
            out.push_str(&format!(
                "  Digest: {}...\n",
                &digest[..digest.len().min(12)]
            ));
        }
        if let Some(file_count) = data.result.file_count {
            out.push_str(&format!("  Generated files: {}\n", file_count));
        }
        if let Some(guide_bytes) = data.result.guide_bytes {
            out.push_str(&format!("  Guide size: {} bytes\n", guide_bytes));
        }
        if let Some(ref generated_at) = data.result.generated_at {
            out.push_str(&format!("  Generated at: {}\n", generated_at));
        }
        if let Some(ref provider) = data.result.provider {
            out.push_str(&format!("  Provider: {}\n", provider));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n\n", format_section_heading("Providers")));
    if data.providers.is_empty() {
        out.push_str("No providers configured.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Provider", "Type", "Model"]);
    for row in &data.providers {
        table.add_row(vec![
            row.provider_name.clone(),
            row.provider_type.clone(),
            row.model.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} providers.\n", data.providers.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_result_shows_hint_message() {
        let status = StatusOutput {
            result: ResultStatus {
                present: false,
                digest: None,
                file_count: None,
                guide_bytes: None,
                generated_at: None,
                provider: None,
                message: Some("Run blueprint generate to create one.".to_string()),
            },
            providers: vec![],
        };
        let text = format_status_text(&status);
        assert!(text.contains("Stored result: no"));
        assert!(text.contains("Run blueprint generate"));
        assert!(text.contains("No providers configured."));
    }

    #[test]
    fn present_result_shows_shortened_digest() {
        let status = StatusOutput {
            result: ResultStatus {
                present: true,
                digest: Some("abcdef0123456789abcdef".to_string()),
                file_count: Some(3),
                guide_bytes: Some(42),
                generated_at: None,
                provider: Some("dev".to_string()),
                message: None,
            },
            providers: vec![ProviderStatusEntry {
                provider_name: "dev".to_string(),
                provider_type: "ollama".to_string(),
                model: "llama3".to_string(),
            }],
        };
        let text = format_status_text(&status);
        assert!(text.contains("abcdef012345..."));
        assert!(text.contains("Generated files: 3"));
        assert!(text.contains("Total: 1 providers."));
    }
}
