//! DeleteTask command

use crate::error::Result;
use crate::mutation::{changed, Mutation};
use crate::types::{Project, TaskId};
use serde::Deserialize;

/// Delete a task
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Mutation for DeleteTask {
    const VERB: &'static str = "delete";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        if project.find_task(&self.id).is_none() {
            return Ok(project.clone());
        }
        Ok(changed(project, |p| p.tasks.retain(|t| t.id != self.id)))
    }
}
