//! AddTask command

use super::{clean_tags, clean_title};
use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{ColumnId, Project, Task, TaskDraft, TaskId};
use serde::Deserialize;

/// Add a new task to a column
#[derive(Debug, Clone, Deserialize)]
pub struct AddTask {
    /// The column the task starts in
    pub column: ColumnId,
    /// Everything the user filled in
    pub draft: TaskDraft,
}

impl AddTask {
    /// Create a new AddTask command
    pub fn new(column: impl Into<ColumnId>, draft: TaskDraft) -> Self {
        Self {
            column: column.into(),
            draft,
        }
    }

    /// Apply and also return the id assigned to the new task
    pub fn create(&self, project: &Project) -> Result<(Project, TaskId)> {
        let title = clean_title(&self.draft.title)?;

        if !project.has_column(&self.column) {
            return Err(BoardError::validation(
                "column",
                format!("no column '{}' in project", self.column),
            ));
        }

        let task = Task {
            id: TaskId::new(),
            title,
            description: self.draft.description.clone(),
            notes: self.draft.notes.clone(),
            tags: clean_tags(&self.draft.tags),
            priority: self.draft.priority,
            due_date: self.draft.due_date,
            checklist: self.draft.checklist.clone(),
            column_id: self.column.clone(),
            created_seq: project.max_task_seq() + 1,
        };
        let id = task.id.clone();

        Ok((changed(project, |p| p.tasks.push(task)), id))
    }
}

impl Mutation for AddTask {
    const VERB: &'static str = "add";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        self.create(project).map(|(project, _)| project)
    }
}
