//! Flatten and format the tree for terminal display.

use owo_colors::OwoColorize;
use serde_json::json;

use crate::explorer::state::ExplorerState;
use crate::tree::TreeNode;

/// One visible line of the explorer listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub path: String,
    pub is_folder: bool,
    pub expanded: bool,
}

/// Flatten the tree into the rows the explorer shows: a folder's children
/// appear only while the folder is expanded.
pub fn visible_rows(tree: &[TreeNode], state: &ExplorerState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_visible(tree, state, 0, &mut rows);
    rows
}

fn push_visible(nodes: &[TreeNode], state: &ExplorerState, depth: usize, rows: &mut Vec<TreeRow>) {
    for node in nodes {
        let is_folder = node.is_folder();
        let expanded = is_folder && state.is_expanded(node.path());
        rows.push(TreeRow {
            depth,
            name: node.name().to_string(),
            path: node.path().to_string(),
            is_folder,
            expanded,
        });
        if expanded {
            push_visible(node.children(), state, depth + 1, rows);
        }
    }
}

/// Render the whole tree as indented text, expansion state ignored.
/// Folders get a trailing slash; `color` adds terminal styling.
pub fn format_tree_text(tree: &[TreeNode], color: bool) -> String {
    let mut out = String::new();
    format_level(tree, 0, color, &mut out);
    if out.is_empty() {
        out.push_str("(no generated files)\n");
    }
    out
}

fn format_level(nodes: &[TreeNode], depth: usize, color: bool, out: &mut String) {
    for node in nodes {
        out.push_str(&"  ".repeat(depth));
        match node {
            TreeNode::Folder(folder) => {
                if color {
                    out.push_str(&format!("{}/\n", folder.name.bold().cyan()));
                } else {
                    out.push_str(&format!("{}/\n", folder.name));
                }
                format_level(&folder.children, depth + 1, color, out);
            }
            TreeNode::File(file) => {
                out.push_str(&file.name);
                out.push('\n');
            }
        }
    }
}

/// Nested JSON outline of the tree, without file contents.
pub fn tree_outline(tree: &[TreeNode]) -> serde_json::Value {
    serde_json::Value::Array(tree.iter().map(outline_node).collect())
}

fn outline_node(node: &TreeNode) -> serde_json::Value {
    match node {
        TreeNode::Folder(folder) => json!({
            "type": "folder",
            "name": folder.name,
            "path": folder.path,
            "children": folder.children.iter().map(outline_node).collect::<Vec<_>>(),
        }),
        TreeNode::File(file) => json!({
            "type": "file",
            "name": file.name,
            "path": file.path,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build;
    use crate::types::FlatFile;

    fn flat(path: &str) -> FlatFile {
        FlatFile {
            path: path.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn collapsed_folder_hides_its_children() {
        let tree = build(&[flat("a/b/c.txt")]);
        let mut state = ExplorerState::for_tree(&tree);
        // "a" expanded by default, "a/b" collapsed: c.txt not visible.
        let paths: Vec<String> = visible_rows(&tree, &state)
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["a", "a/b"]);

        state.toggle_folder("a/b");
        let paths: Vec<String> = visible_rows(&tree, &state)
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["a", "a/b", "a/b/c.txt"]);
    }

    #[test]
    fn rows_carry_depth_for_indentation() {
        let tree = build(&[flat("a/b.txt"), flat("top.txt")]);
        let state = ExplorerState::for_tree(&tree);
        let rows = visible_rows(&tree, &state);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].depth, 0);
    }

    #[test]
    fn text_tree_indents_and_marks_folders() {
        let tree = build(&[flat("src/main.rs"), flat("README.md")]);
        let text = format_tree_text(&tree, false);
        assert_eq!(text, "src/\n  main.rs\nREADME.md\n");
    }

    #[test]
    fn text_tree_for_empty_result_shows_placeholder() {
        assert_eq!(format_tree_text(&[], false), "(no generated files)\n");
    }

    #[test]
    fn outline_has_no_file_contents() {
        let tree = build(&[flat("src/main.rs")]);
        let outline = tree_outline(&tree);
        let folder = &outline[0];
        assert_eq!(folder["type"], "folder");
        assert_eq!(folder["children"][0]["type"], "file");
        assert_eq!(folder["children"][0]["path"], "src/main.rs");
        assert!(folder["children"][0].get("content").is_none());
    }
}
