//! Fixtures shared by unit tests.

use crate::types::{Column, Project, Task};

/// A project with `todo` (protected), `doing` and `done` (protected) columns
/// and no tasks.
pub(crate) fn board() -> Project {
    Project::new("Test").with_columns(vec![
        Column::new("To Do", "#ef4444").with_id("todo").protected(),
        Column::new("Doing", "#f59e0b").with_id("doing"),
        Column::new("Done", "#10b981").with_id("done").protected(),
    ])
}

/// `board()` with tasks pushed in the given order. Each entry is
/// `(title, column)`; task ids equal their titles for readable assertions.
pub(crate) fn board_with(tasks: &[(&str, &str)]) -> Project {
    let mut project = board();
    for (seq, (title, column)) in tasks.iter().enumerate() {
        let mut task = Task::new(*title, *column);
        task.id = (*title).into();
        task.created_seq = seq as u64 + 1;
        project.tasks.push(task);
    }
    project
}

/// Task titles of a project in raw list order
pub(crate) fn titles(project: &Project) -> Vec<&str> {
    project.tasks.iter().map(|t| t.title.as_str()).collect()
}
