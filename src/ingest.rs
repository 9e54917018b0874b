//! Reference document ingestion.
//!
//! Collects the documents that ground a generation request. Markdown
//! files contribute a short content preview; other accepted kinds
//! contribute name and kind only. Nothing here parses document contents
//! beyond that preview.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::ApiError;

/// Maximum characters of Markdown content included in a preview.
pub const PREVIEW_CHARS: usize = 500;

/// Kind of reference document, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Markdown,
    Pdf,
    Slides,
}

impl DocKind {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "md" => Some(DocKind::Markdown),
            "pdf" => Some(DocKind::Pdf),
            "ppt" | "pptx" => Some(DocKind::Slides),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocKind::Markdown => "markdown",
            DocKind::Pdf => "pdf",
            DocKind::Slides => "slides",
        }
    }
}

/// One reference document as presented to the provider.
#[derive(Debug, Clone)]
pub struct ReferenceDoc {
    pub name: String,
    pub kind: DocKind,
    pub preview: Option<String>,
}

impl ReferenceDoc {
    /// Summary block for the generation prompt.
    pub fn summary(&self) -> String {
        let mut out = format!("File Name: {}, Kind: {}", self.name, self.kind.label());
        if let Some(preview) = &self.preview {
            out.push_str(&format!("\nContent Preview:\n---\n{}\n---", preview));
        }
        out
    }
}

/// Collect reference documents from files and directories.
///
/// Directories are walked recursively; files with unaccepted extensions
/// are skipped with a warning. An explicitly named path that does not
/// exist is an error.
pub fn collect_reference_docs(paths: &[PathBuf]) -> Result<Vec<ReferenceDoc>, ApiError> {
    let mut docs = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Reference document not found: {}",
                path.display()
            )));
        }
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
                if entry.file_type().is_file() {
                    if let Some(doc) = ingest_file(entry.path()) {
                        docs.push(doc);
                    }
                }
            }
        } else if let Some(doc) = ingest_file(path) {
            docs.push(doc);
        }
    }
    Ok(docs)
}

fn ingest_file(path: &Path) -> Option<ReferenceDoc> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let extension = path.extension().map(|e| e.to_string_lossy().to_string());
    let kind = match extension.as_deref().and_then(DocKind::from_extension) {
        Some(kind) => kind,
        None => {
            warn!(path = %path.display(), "skipping unsupported reference document");
            return None;
        }
    };

    let preview = if kind == DocKind::Markdown {
        match fs::read_to_string(path) {
            Ok(content) => Some(truncate_preview(&content)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read markdown preview");
                None
            }
        }
    } else {
        None
    };

    Some(ReferenceDoc { name, kind, preview })
}

fn truncate_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    if content.chars().nth(PREVIEW_CHARS).is_some() {
        preview.push_str("...");
    }
    preview
}
