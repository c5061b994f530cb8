//! TagTask command

use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{Project, TaskId};
use serde::Deserialize;

/// Add a tag to a task
#[derive(Debug, Clone, Deserialize)]
pub struct TagTask {
    pub id: TaskId,
    pub tag: String,
}

impl TagTask {
    pub fn new(id: impl Into<TaskId>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }
}

impl Mutation for TagTask {
    const VERB: &'static str = "tag";
    const NOUN: &'static str = "task";

    fn apply(&self, project: &Project) -> Result<Project> {
        let tag = self.tag.trim();
        if tag.is_empty() {
            return Err(BoardError::validation("tag", "tag must not be empty"));
        }

        match project.find_task(&self.id) {
            Some(task) if !task.has_tag(tag) => Ok(changed(project, |p| {
                if let Some(task) = p.tasks.iter_mut().find(|t| t.id == self.id) {
                    task.tags.insert(tag.to_string());
                }
            })),
            _ => Ok(project.clone()),
        }
    }
}
