//! The sample project a brand new store is seeded with.

use chrono::{Days, NaiveDate};

use crate::types::{ChecklistItem, Column, Project, Task};

const WELCOME_NOTES: &str = "Welcome to your game development project!

Use this notes section to:
• Brainstorm new features and mechanics
• Track bugs and issues
• Document art style decisions
• Keep meeting notes and feedback
• Store useful links and resources

This space is perfect for those random ideas that pop up during development!";

/// Name of the seeded sample project
pub const SAMPLE_PROJECT_NAME: &str = "My Game Project";

/// Build "My Game Project": four columns, three tasks and the welcome notes.
/// Due dates are relative to `today`.
pub fn sample_project(today: NaiveDate) -> Project {
    let columns = vec![
        Column::new("To Do", "#ef4444").with_id("todo").protected(),
        Column::new("In Progress", "#f59e0b").with_id("in-progress"),
        Column::new("Testing", "#8b5cf6").with_id("testing"),
        Column::new("Done", "#10b981").with_id("done").protected(),
    ];

    let in_days = |n| today.checked_add_days(Days::new(n)).unwrap_or(today);

    let mut design = Task::new("Design game mechanics", "todo")
        .with_description("Create core gameplay loop and define player interactions")
        .with_tag("design")
        .with_tag("gameplay")
        .with_due_date(in_days(7));
    design.checklist = vec![
        ChecklistItem::new("Research similar games").completed(),
        ChecklistItem::new("Create mockups"),
        ChecklistItem::new("Test with friends"),
    ];

    let mut movement = Task::new("Implement player movement", "in-progress")
        .with_description("Code basic player controls and physics")
        .with_tag("programming")
        .with_tag("physics")
        .with_due_date(in_days(3));
    movement.checklist = vec![
        ChecklistItem::new("Set up input system").completed(),
        ChecklistItem::new("Add collision detection"),
    ];

    let mut sprites = Task::new("Create sprite animations", "done")
        .with_description("Design and animate character sprites")
        .with_tag("art")
        .with_tag("animation");
    sprites.checklist = vec![
        ChecklistItem::new("Sketch character designs").completed(),
        ChecklistItem::new("Create walk cycle").completed(),
        ChecklistItem::new("Export sprite sheets").completed(),
    ];

    let mut project = Project::new(SAMPLE_PROJECT_NAME)
        .with_columns(columns)
        .with_notes(WELCOME_NOTES);
    for (seq, mut task) in [design, movement, sprites].into_iter().enumerate() {
        task.created_seq = seq as u64 + 1;
        project.tasks.push(task);
    }
    project
}
