//! One generation result on display: tree, navigation state, and content
//! resolution against the flat file list.

use crate::explorer::state::ExplorerState;
use crate::tree::{build, normalize_path, TreeNode};
use crate::types::GenerationResult;

/// Placeholder shown when a selection no longer resolves to any file.
pub const CONTENT_UNAVAILABLE: &str = "File content is unavailable.";

/// Placeholder shown when the result contains no files at all.
pub const NO_FILE_SELECTED: &str = "No file selected.";

/// A result and everything derived from it. Replacing the result swaps
/// the tree and navigation state wholesale; nothing is patched in place.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    result: GenerationResult,
    tree: Vec<TreeNode>,
    state: ExplorerState,
    digest: String,
}

impl ExplorerSession {
    pub fn new(result: GenerationResult) -> Self {
        let tree = build(&result.file_system);
        let state = ExplorerState::for_tree(&tree);
        let digest = result.digest();
        Self {
            result,
            tree,
            state,
            digest,
        }
    }

    /// Replace the displayed result. The old tree and its navigation
    /// state are discarded in one move.
    pub fn replace_result(&mut self, result: GenerationResult) {
        *self = Self::new(result);
    }

    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ExplorerState {
        &mut self.state
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Content lookup by path string against the flat list, not the tree.
    /// Paths are normalized on both sides; the last match wins, matching
    /// the builder's duplicate-path policy.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let probe = normalize_path(path);
        if probe.is_empty() {
            return None;
        }
        self.result
            .file_system
            .iter()
            .rev()
            .find(|file| normalize_path(&file.path) == probe)
            .map(|file| file.content.as_str())
    }

    /// Resolved content for `path`, or the unavailable placeholder.
    /// Never fails, so a stale selection degrades instead of crashing.
    pub fn content_or_placeholder(&self, path: &str) -> &str {
        self.resolve(path).unwrap_or(CONTENT_UNAVAILABLE)
    }

    /// Content for the current selection, or the matching placeholder.
    pub fn selected_content(&self) -> &str {
        match self.state.selected_path() {
            Some(path) => self.content_or_placeholder(path),
            None => NO_FILE_SELECTED,
        }
    }
}
