//! Generated file tree
//!
//! Converts the flat file list of a generation result into a nested
//! hierarchy of folder and file nodes for display.

pub mod builder;
pub mod node;

pub use builder::{build, first_file_path, normalize_path};
pub use node::{FileNode, FolderNode, TreeNode};
