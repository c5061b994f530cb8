//! Project commands

mod init;
mod update;

pub use init::NewProject;
pub use update::{RenameProject, UpdateNotes};

use crate::error::{BoardError, Result};

/// Trim a project name, rejecting one that is empty afterwards
pub(crate) fn clean_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardError::validation("name", "project name must not be empty"));
    }
    Ok(trimmed.to_string())
}
