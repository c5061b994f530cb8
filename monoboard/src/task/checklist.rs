//! Checklist commands: add, toggle, edit and remove checklist items

use crate::error::{BoardError, Result};
use crate::mutation::{changed, Mutation};
use crate::types::{ChecklistItem, ChecklistItemId, Project, Task, TaskId};
use serde::Deserialize;

/// Run `edit` on one checklist item. Unknown task or item is a no-op.
fn edit_item<F>(project: &Project, task: &TaskId, item: &ChecklistItemId, edit: F) -> Project
where
    F: FnOnce(&mut ChecklistItem),
{
    let found = project
        .find_task(task)
        .and_then(|t| t.find_checklist_item(item))
        .is_some();
    if !found {
        return project.clone();
    }
    changed(project, |p| {
        let entry = task_mut(p, task).and_then(|t| t.checklist.iter_mut().find(|c| &c.id == item));
        if let Some(entry) = entry {
            edit(entry);
        }
    })
}

fn task_mut<'a>(project: &'a mut Project, id: &TaskId) -> Option<&'a mut Task> {
    project.tasks.iter_mut().find(|t| &t.id == id)
}

/// Append an item to a task's checklist
#[derive(Debug, Clone, Deserialize)]
pub struct AddChecklistItem {
    pub task: TaskId,
    pub text: String,
}

impl AddChecklistItem {
    pub fn new(task: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            text: text.into(),
        }
    }

    /// Apply and also return the id assigned to the new item
    pub fn create(&self, project: &Project) -> Result<(Project, ChecklistItemId)> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(BoardError::validation("text", "checklist item must not be empty"));
        }
        if project.find_task(&self.task).is_none() {
            return Err(BoardError::validation(
                "task",
                format!("no task '{}' in project", self.task),
            ));
        }

        let item = ChecklistItem::new(text);
        let id = item.id.clone();
        let next = changed(project, |p| {
            if let Some(task) = task_mut(p, &self.task) {
                task.checklist.push(item);
            }
        });
        Ok((next, id))
    }
}

impl Mutation for AddChecklistItem {
    const VERB: &'static str = "add";
    const NOUN: &'static str = "checklist item";

    fn apply(&self, project: &Project) -> Result<Project> {
        self.create(project).map(|(project, _)| project)
    }
}

/// Flip an item between done and not done
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleChecklistItem {
    pub task: TaskId,
    pub item: ChecklistItemId,
}

impl ToggleChecklistItem {
    pub fn new(task: impl Into<TaskId>, item: impl Into<ChecklistItemId>) -> Self {
        Self {
            task: task.into(),
            item: item.into(),
        }
    }
}

impl Mutation for ToggleChecklistItem {
    const VERB: &'static str = "toggle";
    const NOUN: &'static str = "checklist item";

    fn apply(&self, project: &Project) -> Result<Project> {
        Ok(edit_item(project, &self.task, &self.item, |c| {
            c.completed = !c.completed
        }))
    }
}

/// Replace an item's text
#[derive(Debug, Clone, Deserialize)]
pub struct EditChecklistItem {
    pub task: TaskId,
    pub item: ChecklistItemId,
    pub text: String,
}

impl EditChecklistItem {
    pub fn new(
        task: impl Into<TaskId>,
        item: impl Into<ChecklistItemId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            task: task.into(),
            item: item.into(),
            text: text.into(),
        }
    }
}

impl Mutation for EditChecklistItem {
    const VERB: &'static str = "edit";
    const NOUN: &'static str = "checklist item";

    fn apply(&self, project: &Project) -> Result<Project> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(BoardError::validation("text", "checklist item must not be empty"));
        }
        Ok(edit_item(project, &self.task, &self.item, |c| {
            c.text = text.to_string()
        }))
    }
}

/// Drop an item from a task's checklist
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveChecklistItem {
    pub task: TaskId,
    pub item: ChecklistItemId,
}

impl RemoveChecklistItem {
    pub fn new(task: impl Into<TaskId>, item: impl Into<ChecklistItemId>) -> Self {
        Self {
            task: task.into(),
            item: item.into(),
        }
    }
}

impl Mutation for RemoveChecklistItem {
    const VERB: &'static str = "remove";
    const NOUN: &'static str = "checklist item";

    fn apply(&self, project: &Project) -> Result<Project> {
        let found = project
            .find_task(&self.task)
            .and_then(|t| t.find_checklist_item(&self.item))
            .is_some();
        if !found {
            return Ok(project.clone());
        }
        Ok(changed(project, |p| {
            if let Some(task) = task_mut(p, &self.task) {
                task.checklist.retain(|c| c.id != self.item);
            }
        }))
    }
}
