//! MoveTask command

use crate::error::Result;
use crate::mutation::{changed, Mutation};
use crate::types::{ColumnId, Project, TaskId};
use serde::Deserialize;

/// Move a task to another column, at the end of that column.
///
/// This is the "task dragged over column" intent. Visible order inside the
/// target column is decided by the view pipeline, not by this command.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// The target column
    pub column: ColumnId,
}

impl MoveTask {
    pub fn new(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
        }
    }
}

impl Mutation for MoveTask {
    const VERB: &'static str = "move";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        let Some(index) = project.tasks.iter().position(|t| t.id == self.id) else {
            return Ok(project.clone());
        };
        if project.tasks[index].column_id == self.column || !project.has_column(&self.column) {
            return Ok(project.clone());
        }

        Ok(changed(project, |p| {
            // Last in raw order = last in the target column's subsequence
            let mut task = p.tasks.remove(index);
            task.column_id = self.column.clone();
            p.tasks.push(task);
        }))
    }
}
