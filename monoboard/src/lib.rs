//! Task board engine: projects, columns, tasks and a JSON state document
//!
//! This crate holds the whole board model behind a rendering layer. A project
//! is a board with ordered columns, tasks in those columns, and freeform notes.
//! Every change is a command struct implementing [`Mutation`]; applying one
//! returns a new [`Project`] and leaves the input untouched.
//!
//! ## Overview
//!
//! - **Pure mutations** - `task`, `column` and `project` commands validate,
//!   then produce a new project or an error with nothing changed
//! - **Protected columns** - `todo` and `done` can never be deleted
//! - **Derived views** - [`view`] filters and sorts tasks per column without
//!   touching the canonical order
//! - **One document** - [`ProjectStore`] persists all projects as a single JSON
//!   blob through a [`StateBackend`]
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use monoboard::{FileBackend, ProjectStore, project::NewProject, task::AddTask, TaskDraft};
//!
//! # async fn example() -> monoboard::Result<()> {
//! let mut store = ProjectStore::load(FileBackend::new("/path/to/data")).await;
//! store.create_project(&NewProject::new("My Project").with_column("In Progress"))?;
//!
//! store.apply(&AddTask::new("todo", TaskDraft::new("Implement feature X")))?;
//! store.save().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## State Document
//!
//! ```text
//! {
//!   "projects": [ { "id", "name", "columns": [...], "tasks": [...], "notes",
//!                   "createdAt", "updatedAt" } ],
//!   "currentProjectId": "..." | null
//! }
//! ```

mod backend;
pub mod defaults;
mod error;
mod mutation;
pub mod palette;
mod persist;
mod store;
pub mod types;
pub mod view;

// Command modules
pub mod column;
pub mod project;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{FileBackend, MemoryBackend, StateBackend, STORAGE_KEY};
pub use error::{BoardError, Result};
pub use mutation::Mutation;
pub use persist::{
    deserialize, export_file_name, export_project, import_project, import_project_file,
    serialize, write_export, ExportedFile,
};
pub use store::ProjectStore;

// Re-export commonly used types
pub use types::{
    AppState, ChecklistItem, ChecklistItemId, Column, ColumnId, FilterSpec, Priority, Project,
    ProjectId, SortBy, SortOrder, Task, TaskDraft, TaskId, ViewMode,
};
