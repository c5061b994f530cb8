//! NewProject command

use super::clean_name;
use crate::error::Result;
use crate::palette::next_column_color;
use crate::types::{Column, Project, DONE_COLUMN_ID, TODO_COLUMN_ID};
use serde::Deserialize;

/// Build a fresh project with the protected `todo` and `done` columns.
///
/// Extra seed columns go between the two, in the order given, each taking the
/// next free palette color.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    /// The project name
    pub name: String,
    /// Titles of extra columns between "To Do" and "Done"
    #[serde(default)]
    pub columns: Vec<String>,
}

impl NewProject {
    /// Create a new NewProject command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Add an extra seed column
    pub fn with_column(mut self, title: impl Into<String>) -> Self {
        self.columns.push(title.into());
        self
    }

    pub fn build(&self) -> Result<Project> {
        let name = clean_name(&self.name)?;

        let mut columns = vec![
            Column::new("To Do", "#ef4444").with_id(TODO_COLUMN_ID).protected(),
            Column::new("Done", "#10b981").with_id(DONE_COLUMN_ID).protected(),
        ];
        for title in self.columns.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            let color = next_column_color(columns.iter().map(|c| c.color.as_str()));
            let column = Column::new(title, color);
            columns.insert(columns.len() - 1, column);
        }

        Ok(Project::new(name).with_columns(columns))
    }
}
