//! Table output helpers.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// A table that wraps cells to the terminal width
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// `done/total` for a checklist, empty when there is none
pub fn checklist_summary(done: usize, total: usize) -> String {
    if total == 0 {
        String::new()
    } else {
        format!("{done}/{total}")
    }
}
