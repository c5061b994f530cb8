//! Project field updates

use super::clean_name;
use crate::error::Result;
use crate::mutation::{changed, Mutation};
use crate::types::Project;
use serde::Deserialize;

/// Rename a project
#[derive(Debug, Clone, Deserialize)]
pub struct RenameProject {
    pub name: String,
}

impl RenameProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mutation for RenameProject {
    const VERB: &'static str = "rename";
    const NOUN: &'static str = "project";

    fn apply(&self, project: &Project) -> Result<Project> {
        let name = clean_name(&self.name)?;
        if name == project.name {
            return Ok(project.clone());
        }
        Ok(changed(project, |p| p.name = name))
    }
}

/// Replace the project's freeform notes
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotes {
    pub notes: String,
}

impl UpdateNotes {
    pub fn new(notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
        }
    }
}

impl Mutation for UpdateNotes {
    const VERB: &'static str = "update";
    const NOUN: &'static str = "notes";

    fn apply(&self, project: &Project) -> Result<Project> {
        if self.notes == project.notes {
            return Ok(project.clone());
        }
        Ok(changed(project, |p| p.notes = self.notes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::test_support::board;

    #[test]
    fn test_rename_project() {
        let project = board();
        let next = RenameProject::new(" Renamed ").apply(&project).unwrap();
        assert_eq!(next.name, "Renamed");
        assert_eq!(next.id, project.id);
    }

    #[test]
    fn test_rename_project_blank() {
        let result = RenameProject::new("").apply(&board());
        assert!(matches!(result, Err(BoardError::Validation { .. })));
    }

    #[test]
    fn test_update_notes_keeps_text_verbatim() {
        let project = board();
        let notes = "  Ideas:\n• double jump\n";
        let next = UpdateNotes::new(notes).apply(&project).unwrap();
        assert_eq!(next.notes, notes);
    }

    #[test]
    fn test_same_notes_is_noop() {
        let project = board().with_notes("x");
        let next = UpdateNotes::new("x").apply(&project).unwrap();
        assert_eq!(next.updated_at, project.updated_at);
    }
}
