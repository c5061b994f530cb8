//! DeleteColumn command

use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{ColumnId, Project};
use serde::Deserialize;

/// Delete a column together with every task in it.
///
/// Protected columns (`todo` and `done` on every board) cannot be deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Mutation for DeleteColumn {
    const VERB: &'static str = "delete";
    const NOUN: &'static str = "column";

    fn apply(&self, project: &Project) -> Result<Project> {
        let Some(column) = project.find_column(&self.id) else {
            return Ok(project.clone());
        };
        if column.protected {
            return Err(BoardError::invariant(format!(
                "column '{}' is protected and cannot be deleted",
                column.title
            )));
        }

        Ok(changed(project, |p| {
            p.columns.retain(|c| c.id != self.id);
            p.tasks.retain(|t| t.column_id != self.id);
        }))
    }
}
