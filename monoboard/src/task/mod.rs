//! Task commands

mod add;
mod checklist;
mod delete;
mod mv;
mod reorder;
mod tag;
mod untag;
mod update;

pub use add::AddTask;
pub use checklist::{
    AddChecklistItem, EditChecklistItem, RemoveChecklistItem, ToggleChecklistItem,
};
pub use delete::DeleteTask;
pub use mv::MoveTask;
pub use reorder::ReorderTask;
pub use tag::TagTask;
pub use untag::UntagTask;
pub use update::UpdateTask;

use crate::error::{BoardError, Result};
use indexmap::IndexSet;

/// Trim a title, rejecting one that is empty afterwards
pub(crate) fn clean_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::validation("title", "task title must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trim tags, drop empty ones, deduplicate keeping first occurrence
pub(crate) fn clean_tags<'a, I>(tags: I) -> IndexSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
