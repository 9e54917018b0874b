//! Result Explorer
//!
//! Renders a generated file hierarchy as an interactive listing, tracks
//! which folders are expanded and which file is selected, and resolves
//! selections to content against the flat file list.

pub mod interactive;
pub mod render;
pub mod session;
pub mod state;

pub use render::{format_tree_text, tree_outline, visible_rows, TreeRow};
pub use session::{ExplorerSession, CONTENT_UNAVAILABLE, NO_FILE_SELECTED};
pub use state::ExplorerState;
