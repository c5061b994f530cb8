//! UpdateTask command

use super::{clean_tags, clean_title};
use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{Project, Task};
use serde::Deserialize;

/// Replace a task wholesale (the edit form's save)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    /// The edited task; matched by id
    pub task: Task,
}

impl UpdateTask {
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

impl Mutation for UpdateTask {
    const VERB: &'static str = "update";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        let Some(index) = project.tasks.iter().position(|t| t.id == self.task.id) else {
            return Ok(project.clone());
        };

        let title = clean_title(&self.task.title)?;
        if !project.has_column(&self.task.column_id) {
            return Err(BoardError::validation(
                "column",
                format!("no column '{}' in project", self.task.column_id),
            ));
        }

        let mut task = self.task.clone();
        task.title = title;
        task.tags = clean_tags(&self.task.tags);

        Ok(changed(project, |p| p.tasks[index] = task))
    }
}
