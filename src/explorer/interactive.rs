//! Interactive terminal explorer for a generation result.
//!
//! A select loop over the visible rows: picking a folder toggles it,
//! picking a file selects it and prints its content. The development
//! guide is reachable from the same menu, mirroring the source/guide
//! split of the result viewer.

use dialoguer::Select;
use owo_colors::OwoColorize;

use crate::error::ApiError;
use crate::explorer::render::visible_rows;
use crate::explorer::session::ExplorerSession;

const ACTION_GUIDE: &str = "── View development guide ──";
const ACTION_QUIT: &str = "── Quit ──";

/// Run the explorer until the user quits. Blocks on user input.
pub fn run(session: &mut ExplorerSession) -> Result<(), ApiError> {
    loop {
        let rows = visible_rows(session.tree(), session.state());

        let mut items: Vec<String> = rows
            .iter()
            .map(|row| {
                let indent = "  ".repeat(row.depth);
                if row.is_folder {
                    let marker = if row.expanded { "▾" } else { "▸" };
                    format!("{}{} {}/", indent, marker, row.name)
                } else if session.state().selected_path() == Some(row.path.as_str()) {
                    format!("{}  {} •", indent, row.name)
                } else {
                    format!("{}  {}", indent, row.name)
                }
            })
            .collect();
        items.push(ACTION_GUIDE.to_string());
        items.push(ACTION_QUIT.to_string());

        let cursor = session
            .state()
            .selected_path()
            .and_then(|selected| rows.iter().position(|row| row.path == selected))
            .unwrap_or(0);

        let choice = Select::new()
            .with_prompt("Generated scaffold")
            .items(&items)
            .default(cursor)
            .interact()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

        if choice == rows.len() {
            println!("\n{}", session.result().guide_md);
            continue;
        }
        if choice == rows.len() + 1 {
            return Ok(());
        }

        let row = &rows[choice];
        if row.is_folder {
            session.state_mut().toggle_folder(&row.path);
        } else {
            session.state_mut().select_file(&row.path);
            println!("\n{}", row.path.bold());
            println!("{}\n", session.content_or_placeholder(&row.path));
        }
    }
}
