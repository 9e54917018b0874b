//! Shared wire types for generation results.

use serde::{Deserialize, Serialize};

/// A single generated file: forward-slash separated path plus content.
///
/// Produced by the provider and treated as immutable input everywhere
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFile {
    pub path: String,
    pub content: String,
}

/// One generation result as returned by the provider:
/// a flat file list and a Markdown development guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "fileSystem")]
    pub file_system: Vec<FlatFile>,

    #[serde(rename = "guideMd")]
    pub guide_md: String,
}

impl GenerationResult {
    /// Number of generated files.
    pub fn file_count(&self) -> usize {
        self.file_system.len()
    }

    /// Content digest identifying this result.
    ///
    /// Hashes the ordered (path, content) pairs and the guide, so any
    /// change to the flat file list or the guide yields a new digest.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for file in &self.file_system {
            hasher.update(file.path.as_bytes());
            hasher.update(&[0]);
            hasher.update(file.content.as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(self.guide_md.as_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(path: &str, content: &str) -> GenerationResult {
        GenerationResult {
            file_system: vec![FlatFile {
                path: path.to_string(),
                content: content.to_string(),
            }],
            guide_md: "# Guide".to_string(),
        }
    }

    #[test]
    fn wire_field_names_follow_the_response_schema() {
        let json = serde_json::to_value(result_with("a.txt", "x")).unwrap();
        assert!(json.get("fileSystem").is_some());
        assert!(json.get("guideMd").is_some());
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let a = result_with("a.txt", "x");
        assert_eq!(a.digest(), a.digest());
        assert_ne!(a.digest(), result_with("a.txt", "y").digest());
        assert_ne!(a.digest(), result_with("b.txt", "x").digest());
    }
}
