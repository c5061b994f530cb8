//! ReorderTask command

use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{ColumnId, Project, TaskId};
use serde::Deserialize;

/// Drop a task onto another task of the same column.
///
/// Within the column's subsequence the dragged task is removed from its old
/// index and inserted at the index the target occupied. Dragging downward
/// therefore lands after the target, dragging upward lands before it. Tasks
/// of other columns keep their exact positions in the raw list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderTask {
    pub column: ColumnId,
    /// The dragged task
    pub id: TaskId,
    /// The task it was dropped on
    pub before: TaskId,
}

impl ReorderTask {
    pub fn new(
        column: impl Into<ColumnId>,
        id: impl Into<TaskId>,
        before: impl Into<TaskId>,
    ) -> Self {
        Self {
            column: column.into(),
            id: id.into(),
            before: before.into(),
        }
    }
}

impl Mutation for ReorderTask {
    const VERB: &'static str = "reorder";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        if self.id == self.before || project.find_task(&self.id).is_none() {
            return Ok(project.clone());
        }

        // Raw-list slots occupied by this column, in order
        let slots: Vec<usize> = project
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.column_id == self.column)
            .map(|(i, _)| i)
            .collect();

        let position = |id: &TaskId| slots.iter().position(|&i| &project.tasks[i].id == id);
        let (Some(from), Some(to)) = (position(&self.id), position(&self.before)) else {
            return Err(BoardError::validation(
                "task",
                format!(
                    "'{}' and '{}' must both be in column '{}'",
                    self.id, self.before, self.column
                ),
            ));
        };

        Ok(changed(project, |p| {
            let mut column: Vec<_> = slots.iter().map(|&i| p.tasks[i].clone()).collect();
            let task = column.remove(from);
            column.insert(to, task);
            for (&slot, task) in slots.iter().zip(column) {
                p.tasks[slot] = task;
            }
        }))
    }
}
