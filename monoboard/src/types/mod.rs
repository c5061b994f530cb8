//! Core types for the board engine

mod filter;
mod ids;
mod project;
mod task;

// Re-export all types
pub use filter::{FilterSpec, SortBy, SortOrder};
pub use ids::{ChecklistItemId, ColumnId, ProjectId, TaskId};
pub use project::{AppState, Column, Project, ViewMode, DONE_COLUMN_ID, TODO_COLUMN_ID};
pub use task::{ChecklistItem, Priority, Task, TaskDraft};
