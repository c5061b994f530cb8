//! AddColumn command

use crate::error::Result;
use crate::mutation::{changed, Mutation};
use crate::palette::next_column_color;
use crate::types::{Column, ColumnId, Project};
use serde::Deserialize;

/// Append a new column to the board.
///
/// The color is the first palette entry no existing column uses. A missing or
/// blank title becomes `Column {n}`, where `n` is the new column count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddColumn {
    /// The column display name
    pub title: Option<String>,
}

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Apply and also return the id assigned to the new column
    pub fn create(&self, project: &Project) -> Result<(Project, ColumnId)> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Column {}", project.columns.len() + 1),
        };
        let color = next_column_color(project.columns.iter().map(|c| c.color.as_str()));

        let column = Column::new(title, color);
        let id = column.id.clone();
        Ok((changed(project, |p| p.columns.push(column)), id))
    }
}

impl Mutation for AddColumn {
    const VERB: &'static str = "add";
    const NOUN: &'static str = "column";

    fn apply(&self, project: &Project) -> Result<Project> {
        self.create(project).map(|(project, _)| project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::board;
    use crate::types::ViewMode;

    #[test]
    fn test_add_column() {
        let project = board();
        let (next, id) = AddColumn::titled(" Blocked ").create(&project).unwrap();

        assert_eq!(next.columns.len(), 4);
        let column = next.columns.last().unwrap();
        assert_eq!(column.id, id);
        assert_eq!(column.title, "Blocked");
        assert_eq!(column.view_mode, ViewMode::Board);
        assert!(!column.protected);
        // board() uses red, amber and emerald
        assert_eq!(column.color, "#8b5cf6");
    }

    #[test]
    fn test_add_column_default_title() {
        let next = AddColumn::new().apply(&board()).unwrap();
        assert_eq!(next.columns[3].title, "Column 4");

        let next = AddColumn::titled("   ").apply(&next).unwrap();
        assert_eq!(next.columns[4].title, "Column 5");
    }

    #[test]
    fn test_add_column_palette_wraps() {
        let mut project = board();
        for _ in 0..3 {
            project = AddColumn::new().apply(&project).unwrap();
        }
        // all six colors in use now
        let next = AddColumn::new().apply(&project).unwrap();
        assert_eq!(next.columns.last().unwrap().color, "#ef4444");
    }
}
