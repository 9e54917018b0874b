//! Navigation state for the tree explorer.
//!
//! State is keyed by path string and kept apart from the immutable tree,
//! so rebuilding the tree cleanly resets navigation instead of leaving
//! flags dangling inside stale nodes.

use std::collections::HashSet;

use crate::tree::{first_file_path, TreeNode};

/// Expand/collapse and selection state for one displayed tree.
#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    selected_path: Option<String>,
    expanded: HashSet<String>,
}

impl ExplorerState {
    /// Initial state for a freshly built tree: top-level folders expanded,
    /// nested folders collapsed, and the first file in depth-first order
    /// auto-selected (no selection when the tree has no files).
    pub fn for_tree(tree: &[TreeNode]) -> Self {
        let expanded = tree
            .iter()
            .filter(|node| node.is_folder())
            .map(|node| node.path().to_string())
            .collect();
        Self {
            selected_path: first_file_path(tree).map(str::to_string),
            expanded,
        }
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Flip one folder's expanded flag. Descendants keep their own flags,
    /// so collapsing a folder hides but does not reset its subtree.
    pub fn toggle_folder(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
    }

    /// Record the selected file. Expansion state is untouched.
    pub fn select_file(&mut self, path: &str) {
        self.selected_path = Some(path.to_string());
    }
}
