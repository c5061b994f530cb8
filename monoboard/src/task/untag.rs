//! UntagTask command

use crate::error::Result;
use crate::mutation::{changed, Mutation};
use crate::types::{Project, TaskId};
use serde::Deserialize;

/// Remove a tag from a task
#[derive(Debug, Clone, Deserialize)]
pub struct UntagTask {
    pub id: TaskId,
    pub tag: String,
}

impl UntagTask {
    pub fn new(id: impl Into<TaskId>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }
}

impl Mutation for UntagTask {
    const VERB: &'static str = "untag";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        let tag = self.tag.trim();
        match project.find_task(&self.id) {
            Some(task) if task.has_tag(tag) => Ok(changed(project, |p| {
                if let Some(task) = p.tasks.iter_mut().find(|t| t.id == self.id) {
                    task.tags.shift_remove(tag);
                }
            })),
            _ => Ok(project.clone()),
        }
    }
}
