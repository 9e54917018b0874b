//! Workspace result store.
//!
//! One generation result per workspace, stored as pretty-printed JSON in
//! the wire schema plus optional metadata. Saving replaces the previous
//! result wholesale; there is no history.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::GenerationResult;

/// Workspace-relative state directory.
pub const STATE_DIR: &str = ".blueprint";

/// Result file name inside the state directory.
pub const RESULT_FILE: &str = "result.json";

/// Default file name for the exported development guide.
pub const GUIDE_FILE_NAME: &str = "development_guide.md";

/// A stored result: the wire-schema payload plus optional metadata.
/// A bare `{fileSystem, guideMd}` document loads too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResult {
    #[serde(rename = "generatedAt", default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(flatten)]
    pub result: GenerationResult,
}

pub struct ResultStore {
    workspace_root: PathBuf,
}

impl ResultStore {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.workspace_root.join(STATE_DIR)
    }

    pub fn result_path(&self) -> PathBuf {
        self.state_dir().join(RESULT_FILE)
    }

    /// Persist a result, replacing any previous one. Writes to a
    /// temporary file first so the swap is atomic.
    pub fn save(&self, stored: &StoredResult) -> Result<PathBuf, ApiError> {
        let dir = self.state_dir();
        std::fs::create_dir_all(&dir).map_err(|e| {
            ApiError::StoreError(format!(
                "Failed to create state directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| ApiError::StoreError(format!("Failed to serialize result: {}", e)))?;

        let path = self.result_path();
        let tmp = dir.join(format!("{}.tmp", RESULT_FILE));
        std::fs::write(&tmp, json).map_err(|e| {
            ApiError::StoreError(format!("Failed to write result to {}: {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            ApiError::StoreError(format!("Failed to replace result {}: {}", path.display(), e))
        })?;
        Ok(path)
    }

    /// Load the stored result, if any.
    pub fn load(&self) -> Result<Option<StoredResult>, ApiError> {
        let path = self.result_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ApiError::StoreError(format!("Failed to read result {}: {}", path.display(), e))
        })?;
        let stored = serde_json::from_str(&content).map_err(|e| {
            ApiError::StoreError(format!("Stored result {} is invalid: {}", path.display(), e))
        })?;
        Ok(Some(stored))
    }

    /// Load the stored result or explain how to create one.
    pub fn require(&self) -> Result<StoredResult, ApiError> {
        self.load()?.ok_or_else(|| {
            ApiError::StoreError(
                "No generation result in this workspace. Run `blueprint generate` or `blueprint import` first."
                    .to_string(),
            )
        })
    }

    /// Remove the stored result. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, ApiError> {
        let path = self.result_path();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path).map_err(|e| {
            ApiError::StoreError(format!("Failed to remove result {}: {}", path.display(), e))
        })?;
        Ok(true)
    }

    /// Write the development guide to `out`, or to
    /// `development_guide.md` in the workspace root.
    pub fn export_guide(
        &self,
        result: &GenerationResult,
        out: Option<&Path>,
    ) -> Result<PathBuf, ApiError> {
        let path = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.workspace_root.join(GUIDE_FILE_NAME));
        std::fs::write(&path, &result.guide_md).map_err(|e| {
            ApiError::StoreError(format!("Failed to write guide to {}: {}", path.display(), e))
        })?;
        Ok(path)
    }

    /// Archive export. Declared, not implemented.
    pub fn pack(&self, _out: Option<&Path>) -> Result<PathBuf, ApiError> {
        Err(ApiError::Unsupported(
            "project archive export is not implemented yet".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlatFile;
    use tempfile::TempDir;

    fn stored() -> StoredResult {
        StoredResult {
            generated_at: Some(Utc::now()),
            provider: Some("test".to_string()),
            result: GenerationResult {
                file_system: vec![FlatFile {
                    path: "src/main.rs".to_string(),
                    content: "fn main() {}".to_string(),
                }],
                guide_md: "# Guide".to_string(),
            },
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        store.save(&stored()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.provider.as_deref(), Some("test"));
        assert_eq!(loaded.result.file_count(), 1);
    }

    #[test]
    fn bare_wire_schema_file_loads_without_metadata() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        std::fs::create_dir_all(store.state_dir()).unwrap();
        std::fs::write(
            store.result_path(),
            r#"{"fileSystem":[{"path":"a.txt","content":"x"}],"guideMd":"g"}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.generated_at.is_none());
        assert!(loaded.provider.is_none());
        assert_eq!(loaded.result.file_count(), 1);
    }

    #[test]
    fn stored_file_uses_wire_field_names() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        store.save(&stored()).unwrap();
        let content = std::fs::read_to_string(store.result_path()).unwrap();
        assert!(content.contains("\"fileSystem\""));
        assert!(content.contains("\"guideMd\""));
    }

    #[test]
    fn require_without_result_explains_next_step() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        let err = store.require().unwrap_err();
        assert!(err.to_string().contains("blueprint generate"));
    }

    #[test]
    fn clear_reports_whether_a_result_existed() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        assert!(!store.clear().unwrap());
        store.save(&stored()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn guide_export_defaults_to_workspace_root() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        let path = store.export_guide(&stored().result, None).unwrap();
        assert_eq!(path, dir.path().join(GUIDE_FILE_NAME));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Guide");
    }

    #[test]
    fn pack_is_declared_but_unimplemented() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf());
        let err = store.pack(None).unwrap_err();
        assert!(matches!(err, ApiError::Unsupported(_)));
    }
}
