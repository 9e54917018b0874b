//! Tree node types for generated file hierarchies.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Folder node: named, path-addressed, with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
    pub path: String,
    pub children: Vec<TreeNode>,
}

/// File node: named, path-addressed, carrying the generated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    pub content: String,
}

/// A node in the generated file hierarchy.
///
/// A node's `path` is the slash-joined sequence of ancestor names
/// including itself and uniquely identifies it within one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Folder(FolderNode),
    File(FileNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.name,
            TreeNode::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.path,
            TreeNode::File(file) => &file.path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Children of a folder node; empty slice for files.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Folder(folder) => &folder.children,
            TreeNode::File(_) => &[],
        }
    }

    /// Sibling ordering: folders before files, then normalized name.
    ///
    /// Names compare by NFC-normalized lowercase form with the raw name
    /// as tie-break, so the order is deterministic across platforms.
    pub fn sibling_cmp(&self, other: &TreeNode) -> Ordering {
        match (self.is_folder(), other.is_folder()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => name_sort_key(self.name())
                .cmp(&name_sort_key(other.name()))
                .then_with(|| self.name().cmp(other.name())),
        }
    }
}

fn name_sort_key(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> TreeNode {
        TreeNode::File(FileNode {
            name: name.to_string(),
            path: name.to_string(),
            content: String::new(),
        })
    }

    fn folder(name: &str) -> TreeNode {
        TreeNode::Folder(FolderNode {
            name: name.to_string(),
            path: name.to_string(),
            children: Vec::new(),
        })
    }

    #[test]
    fn folders_order_before_files() {
        assert_eq!(folder("z").sibling_cmp(&file("a")), Ordering::Less);
        assert_eq!(file("a").sibling_cmp(&folder("z")), Ordering::Greater);
    }

    #[test]
    fn names_compare_case_insensitively_within_group() {
        assert_eq!(file("README.md").sibling_cmp(&file("main.rs")), Ordering::Greater);
        assert_eq!(file("Makefile").sibling_cmp(&file("zz.txt")), Ordering::Less);
    }

    #[test]
    fn composed_and_decomposed_names_compare_equal_keys() {
        // U+00E9 vs e + U+0301
        let composed = file("caf\u{e9}.txt");
        let decomposed = file("cafe\u{301}.txt");
        // Normalized keys match, raw names break the tie deterministically.
        let ord = composed.sibling_cmp(&decomposed);
        assert_eq!(ord, "caf\u{e9}.txt".cmp("cafe\u{301}.txt"));
    }
}
