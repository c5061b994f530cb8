//! Project-level types: Project, Column, ViewMode, AppState

use super::ids::{ColumnId, ProjectId, TaskId};
use super::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the protected default column tasks start in
pub const TODO_COLUMN_ID: &str = "todo";
/// Id of the protected default column finished tasks land in
pub const DONE_COLUMN_ID: &str = "done";

/// How a column presents its tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Card stack, written as `"kanban"` for compatibility
    #[default]
    #[serde(rename = "kanban", alias = "board")]
    Board,
    Timeline,
}

impl ViewMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Board => ViewMode::Timeline,
            ViewMode::Timeline => ViewMode::Board,
        }
    }
}

/// A column defines a workflow stage. Column order in the project is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Display hint, not validated
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Protected columns can never be deleted
    #[serde(default)]
    pub protected: bool,
}

impl Column {
    /// Create an unprotected column with a fresh id
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            color: color.into(),
            view_mode: ViewMode::Board,
            protected: false,
        }
    }

    /// Use a fixed id instead of a generated one
    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark the column as protected from deletion
    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }
}

/// A complete task board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub columns: Vec<Column>,
    /// Raw list order. Only the relative order of tasks sharing a column matters.
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create an empty project with no columns
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            name: name.into(),
            columns: Vec::new(),
            tasks: Vec::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the columns
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Find a column by ID
    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Check if a column exists
    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.find_column(id).is_some()
    }

    /// Find a task by ID
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Tasks of one column in raw list order
    pub fn tasks_in_column(&self, column: &ColumnId) -> impl Iterator<Item = &Task> + '_ {
        let column = column.clone();
        self.tasks.iter().filter(move |t| t.column_id == column)
    }

    /// Largest creation sequence in use
    pub fn max_task_seq(&self) -> u64 {
        self.tasks.iter().map(|t| t.created_seq).max().unwrap_or(0)
    }

    /// Tasks whose column does not exist in this project
    pub fn orphaned_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| !self.has_column(&t.column_id))
            .collect()
    }

    /// Advance `updated_at` to now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Documents written before columns carried a `protected` flag relied on
    /// the `todo`/`done` ids. Returns true if any column was upgraded.
    pub fn upgrade_legacy_columns(&mut self) -> bool {
        if self.columns.iter().any(|c| c.protected) {
            return false;
        }
        let mut upgraded = false;
        for column in &mut self.columns {
            if column.id.as_str() == TODO_COLUMN_ID || column.id.as_str() == DONE_COLUMN_ID {
                column.protected = true;
                upgraded = true;
            }
        }
        upgraded
    }
}

/// Everything that gets persisted: all projects plus the active one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub projects: Vec<Project>,
    pub current_project_id: Option<ProjectId>,
}

impl AppState {
    /// The empty state: no projects, nothing selected
    pub fn empty() -> Self {
        Self::default()
    }

    /// Find a project by ID
    pub fn find_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// The active project, if any
    pub fn current_project(&self) -> Option<&Project> {
        self.current_project_id
            .as_ref()
            .and_then(|id| self.find_project(id))
    }

    /// Point `current_project_id` at an existing project when it dangles.
    /// Returns true if the selection changed.
    pub fn repair_selection(&mut self) -> bool {
        let valid = match &self.current_project_id {
            Some(id) => self.find_project(id).is_some(),
            None => self.projects.is_empty(),
        };
        if valid {
            return false;
        }
        self.current_project_id = self.projects.first().map(|p| p.id.clone());
        true
    }
}
