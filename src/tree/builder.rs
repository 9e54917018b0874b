//! Build a file hierarchy from a flat generation result.
//!
//! The builder is a pure, synchronous transformation: it never fails, and
//! malformed input degrades to a smaller tree rather than an error, so the
//! explorer can always render whatever the provider returned.

use crate::tree::node::{FileNode, FolderNode, TreeNode};
use crate::types::FlatFile;
use tracing::warn;

/// Collapse empty path segments (leading, trailing, doubled slashes).
///
/// Both the builder and the content resolver normalize through this
/// function, so node identity and flat-list lookup always agree.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the ordered top-level nodes of the tree for `files`.
///
/// The implicit root is never materialized; the returned sequence is its
/// children. Input order only matters for duplicate paths, where the last
/// occurrence wins. Each level is sorted once at end of build: folders
/// before files, names ascending.
pub fn build(files: &[FlatFile]) -> Vec<TreeNode> {
    let mut root: Vec<TreeNode> = Vec::new();

    'files: for file in files {
        let segments: Vec<&str> = file
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.is_empty() {
            warn!(path = %file.path, "skipping generated file with empty path");
            continue;
        }

        let mut level = &mut root;
        for depth in 0..segments.len() - 1 {
            let prefix = segments[..=depth].join("/");
            let index = match level.iter().position(|node| node.path() == prefix) {
                Some(index) => index,
                None => {
                    level.push(TreeNode::Folder(FolderNode {
                        name: segments[depth].to_string(),
                        path: prefix.clone(),
                        children: Vec::new(),
                    }));
                    level.len() - 1
                }
            };
            let current = level;
            match &mut current[index] {
                TreeNode::Folder(folder) => level = &mut folder.children,
                TreeNode::File(_) => {
                    warn!(
                        path = %file.path,
                        conflict = %prefix,
                        "skipping generated file whose parent path is already a file"
                    );
                    continue 'files;
                }
            }
        }

        let full_path = segments.join("/");
        match level.iter_mut().find(|node| node.path() == full_path) {
            Some(TreeNode::File(existing)) => {
                // Duplicate path: last write wins.
                existing.content = file.content.clone();
            }
            Some(TreeNode::Folder(_)) => {
                warn!(
                    path = %file.path,
                    "skipping generated file whose path is already a folder"
                );
            }
            None => level.push(TreeNode::File(FileNode {
                name: segments[segments.len() - 1].to_string(),
                path: full_path,
                content: file.content.clone(),
            })),
        }
    }

    sort_levels(&mut root);
    root
}

fn sort_levels(nodes: &mut [TreeNode]) {
    nodes.sort_by(|a, b| a.sibling_cmp(b));
    for node in nodes {
        if let TreeNode::Folder(folder) = node {
            sort_levels(&mut folder.children);
        }
    }
}

/// First file path in depth-first, top-to-bottom order over the sorted tree.
pub fn first_file_path(nodes: &[TreeNode]) -> Option<&str> {
    for node in nodes {
        match node {
            TreeNode::File(file) => return Some(&file.path),
            TreeNode::Folder(folder) => {
                if let Some(path) = first_file_path(&folder.children) {
                    return Some(path);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(path: &str, content: &str) -> FlatFile {
        FlatFile {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn file_paths(nodes: &[TreeNode]) -> Vec<String> {
        let mut out = Vec::new();
        collect_file_paths(nodes, &mut out);
        out
    }

    fn collect_file_paths(nodes: &[TreeNode], out: &mut Vec<String>) {
        for node in nodes {
            match node {
                TreeNode::File(file) => out.push(file.path.clone()),
                TreeNode::Folder(folder) => collect_file_paths(&folder.children, out),
            }
        }
    }

    #[test]
    fn empty_input_yields_empty_top_level() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn shared_prefix_produces_one_folder() {
        let tree = build(&[flat("a/b.txt", "b"), flat("a/c.txt", "c")]);
        assert_eq!(tree.len(), 1);
        let TreeNode::Folder(folder) = &tree[0] else {
            panic!("expected folder at top level");
        };
        assert_eq!(folder.name, "a");
        assert_eq!(folder.path, "a");
        let names: Vec<&str> = folder.children.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["b.txt", "c.txt"]);
    }

    #[test]
    fn folders_precede_files_at_every_level() {
        let tree = build(&[
            flat("readme.md", "r"),
            flat("src/main.rs", "m"),
            flat("Cargo.toml", "t"),
            flat("docs/guide.md", "g"),
        ]);
        let top: Vec<&str> = tree.iter().map(|n| n.name()).collect();
        assert_eq!(top, vec!["docs", "src", "Cargo.toml", "readme.md"]);
    }

    #[test]
    fn node_paths_join_ancestor_names() {
        let tree = build(&[flat("src/api/handler.rs", "h")]);
        let TreeNode::Folder(src) = &tree[0] else {
            panic!("expected src folder");
        };
        let TreeNode::Folder(api) = &src.children[0] else {
            panic!("expected api folder");
        };
        assert_eq!(src.path, "src");
        assert_eq!(api.path, "src/api");
        assert_eq!(api.children[0].path(), "src/api/handler.rs");
    }

    #[test]
    fn duplicate_path_last_write_wins() {
        let tree = build(&[flat("a/x.txt", "first"), flat("a/x.txt", "second")]);
        let paths = file_paths(&tree);
        assert_eq!(paths, vec!["a/x.txt"]);
        let TreeNode::Folder(folder) = &tree[0] else {
            panic!("expected folder");
        };
        let TreeNode::File(file) = &folder.children[0] else {
            panic!("expected file");
        };
        assert_eq!(file.content, "second");
    }

    #[test]
    fn empty_segments_are_skipped() {
        let tree = build(&[flat("/a//b.txt/", "x")]);
        assert_eq!(file_paths(&tree), vec!["a/b.txt"]);
    }

    #[test]
    fn path_of_only_slashes_is_dropped() {
        assert!(build(&[flat("///", "x")]).is_empty());
    }

    #[test]
    fn file_under_file_path_is_dropped_not_fatal() {
        let tree = build(&[flat("a", "file a"), flat("a/b.txt", "orphan")]);
        assert_eq!(file_paths(&tree), vec!["a"]);
    }

    #[test]
    fn build_is_idempotent() {
        let files = vec![
            flat("z/file1.txt", "1"),
            flat("a.txt", "2"),
            flat("z/nested/deep.txt", "3"),
        ];
        assert_eq!(build(&files), build(&files));
    }

    #[test]
    fn first_file_honors_folder_before_file_order() {
        // Folder "z" sorts before file "a.txt", so depth-first selection
        // lands on the file inside the folder.
        let tree = build(&[flat("z/file1.txt", "1"), flat("a.txt", "2")]);
        assert_eq!(first_file_path(&tree), Some("z/file1.txt"));
    }

    #[test]
    fn first_file_is_none_for_empty_tree() {
        assert_eq!(first_file_path(&[]), None);
    }

    #[test]
    fn normalize_path_collapses_empty_segments() {
        assert_eq!(normalize_path("/a//b.txt/"), "a/b.txt");
        assert_eq!(normalize_path("a/b.txt"), "a/b.txt");
        assert_eq!(normalize_path("///"), "");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        fn path_strategy() -> impl Strategy<Value = String> {
            // Intermediate segments never contain '.', file names always
            // do, so no generated path collides with a folder path.
            (
                proptest::collection::vec("[a-z]{1,3}", 0..4),
                "[a-z]{1,4}",
            )
                .prop_map(|(dirs, stem)| {
                    let mut segments = dirs;
                    segments.push(format!("{}.txt", stem));
                    segments.join("/")
                })
        }

        fn assert_sorted(nodes: &[TreeNode]) {
            for pair in nodes.windows(2) {
                assert_ne!(
                    pair[0].sibling_cmp(&pair[1]),
                    std::cmp::Ordering::Greater,
                    "siblings out of order: {} vs {}",
                    pair[0].name(),
                    pair[1].name()
                );
            }
            for node in nodes {
                assert_sorted(node.children());
            }
        }

        proptest! {
            #[test]
            fn file_paths_match_input_set(paths in proptest::collection::vec(path_strategy(), 0..32)) {
                let files: Vec<FlatFile> = paths
                    .iter()
                    .map(|p| flat(p, "content"))
                    .collect();
                let tree = build(&files);
                let expected: BTreeSet<String> = paths.iter().map(|p| normalize_path(p)).collect();
                let actual: BTreeSet<String> = file_paths(&tree).into_iter().collect();
                prop_assert_eq!(actual, expected);
            }

            #[test]
            fn every_level_is_sorted(paths in proptest::collection::vec(path_strategy(), 0..32)) {
                let files: Vec<FlatFile> = paths
                    .iter()
                    .map(|p| flat(p, "content"))
                    .collect();
                assert_sorted(&build(&files));
            }
        }
    }
}
