//! Column field updates: rename and view-mode toggle

use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{Column, ColumnId, Project};
use serde::Deserialize;

fn update_column<F>(project: &Project, id: &ColumnId, update: F) -> Project
where
    F: FnOnce(&mut Column),
{
    let Some(index) = project.columns.iter().position(|c| &c.id == id) else {
        return project.clone();
    };
    changed(project, |p| update(&mut p.columns[index]))
}

/// Rename a column. Unknown ids are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameColumn {
    pub id: ColumnId,
    pub title: String,
}

impl RenameColumn {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Mutation for RenameColumn {
    const VERB: &'static str = "rename";
    const NOUN: &'static str = "column";

    fn apply(&self, project: &Project) -> Result<Project> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(BoardError::validation("title", "column title must not be empty"));
        }
        Ok(update_column(project, &self.id, |c| c.title = title.to_string()))
    }
}

/// Switch a column between board and timeline layout
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleColumnViewMode {
    pub id: ColumnId,
}

impl ToggleColumnViewMode {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Mutation for ToggleColumnViewMode {
    const VERB: &'static str = "toggle";
    const NOUN: &'static str = "column view";

    fn apply(&self, project: &Project) -> Result<Project> {
        Ok(update_column(project, &self.id, |c| {
            c.view_mode = c.view_mode.toggled()
        }))
    }
}
