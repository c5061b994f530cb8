//! ProjectStore - owns the application state and its backend
//!
//! All operations change the in-memory state synchronously. Persisting is a
//! separate [`ProjectStore::save`] step so a failed write never rolls back or
//! blocks what the user just did.

use crate::backend::StateBackend;
use crate::defaults::sample_project;
use crate::error::{BoardError, Result};
use crate::mutation::Mutation;
use crate::persist::{deserialize, serialize};
use crate::project::{NewProject, RenameProject};
use crate::types::{AppState, Project, ProjectId};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// The set of projects plus the active selection
pub struct ProjectStore {
    state: AppState,
    backend: Box<dyn StateBackend>,
    /// Last document written to or read from the backend
    last_saved: Option<String>,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ProjectStore {
    /// Load the state from `backend`.
    ///
    /// Never fails: an unreadable or corrupt document is logged and treated as
    /// the empty state.
    pub async fn load(backend: impl StateBackend + 'static) -> Self {
        let backend: Box<dyn StateBackend> = Box::new(backend);

        let (state, last_saved) = match backend.read_blob().await {
            Ok(Some(blob)) => match deserialize(&blob) {
                Ok(state) => (state, Some(blob)),
                Err(e) => {
                    warn!(error = %e, "stored state is corrupt, starting empty");
                    (AppState::empty(), None)
                }
            },
            Ok(None) => (AppState::empty(), None),
            Err(e) => {
                warn!(error = %e, "failed to read stored state, starting empty");
                (AppState::empty(), None)
            }
        };

        info!(projects = state.projects.len(), "loaded state");
        Self {
            state,
            backend,
            last_saved,
        }
    }

    /// Load, then seed the sample project if there are no projects at all
    pub async fn open_or_seed(backend: impl StateBackend + 'static, today: NaiveDate) -> Self {
        let mut store = Self::load(backend).await;
        store.seed_if_empty(today);
        store
    }

    /// Add and select the sample project when the store is empty.
    /// Returns true if it seeded.
    pub fn seed_if_empty(&mut self, today: NaiveDate) -> bool {
        if !self.state.projects.is_empty() {
            return false;
        }
        let project = sample_project(today);
        info!(project = %project.id, "seeded sample project");
        self.state.current_project_id = Some(project.id.clone());
        self.state.projects.push(project);
        true
    }

    /// Write the state if it differs from the last document written.
    /// Returns whether a write happened.
    pub async fn save(&mut self) -> Result<bool> {
        let blob = serialize(&self.state)?;
        if self.last_saved.as_deref() == Some(blob.as_str()) {
            return Ok(false);
        }

        match self.backend.write_blob(&blob).await {
            Ok(()) => {
                debug!(bytes = blob.len(), "saved state");
                self.last_saved = Some(blob);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "failed to save state, keeping it in memory");
                Err(match e {
                    BoardError::Storage { .. } => e,
                    other => BoardError::storage(other.to_string()),
                })
            }
        }
    }

    /// The full state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.state.find_project(id)
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.state.current_project()
    }

    /// Create a project and make it active
    pub fn create_project(&mut self, command: &NewProject) -> Result<ProjectId> {
        let project = command.build()?;
        let id = project.id.clone();
        info!(project = %id, name = %project.name, "created project");
        self.state.projects.push(project);
        self.state.current_project_id = Some(id.clone());
        Ok(id)
    }

    /// Make a project active
    pub fn select_project(&mut self, id: &ProjectId) -> Result<()> {
        self.require(id)?;
        self.state.current_project_id = Some(id.clone());
        Ok(())
    }

    pub fn rename_project(&mut self, id: &ProjectId, name: &str) -> Result<()> {
        self.apply_to(id, &RenameProject::new(name))
    }

    /// Delete a project. The last remaining project cannot be deleted; deleting
    /// the active one selects the first remaining project.
    pub fn delete_project(&mut self, id: &ProjectId) -> Result<()> {
        self.require(id)?;
        if self.state.projects.len() == 1 {
            return Err(BoardError::invariant("cannot delete the last project"));
        }

        self.state.projects.retain(|p| &p.id != id);
        if self.state.current_project_id.as_ref() == Some(id) {
            self.state.current_project_id = self.state.projects.first().map(|p| p.id.clone());
        }
        info!(project = %id, "deleted project");
        Ok(())
    }

    /// Apply a mutation to the active project
    pub fn apply<M: Mutation>(&mut self, mutation: &M) -> Result<()> {
        let id = self.current_id()?;
        self.apply_to(&id, mutation)
    }

    /// Apply a mutation to any project
    pub fn apply_to<M: Mutation>(&mut self, id: &ProjectId, mutation: &M) -> Result<()> {
        self.replace_with(id, |project| mutation.apply(project).map(|p| (p, ())))?;
        debug!(op = %mutation.op_string(), project = %id, "applied mutation");
        Ok(())
    }

    /// Replace a project with the output of `change`, handing back its extra
    /// result (such as the id of something created)
    pub fn replace_with<T, F>(&mut self, id: &ProjectId, change: F) -> Result<T>
    where
        F: FnOnce(&Project) -> Result<(Project, T)>,
    {
        let index = self
            .state
            .projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| BoardError::ProjectNotFound { id: id.to_string() })?;

        let (next, extra) = change(&self.state.projects[index])?;
        self.state.projects[index] = next;
        Ok(extra)
    }

    /// Id of the active project
    pub fn current_id(&self) -> Result<ProjectId> {
        self.current_project()
            .map(|p| p.id.clone())
            .ok_or_else(|| BoardError::invariant("no project is selected"))
    }

    /// Add an imported project and make it active
    pub fn import_project(&mut self, project: Project) -> ProjectId {
        let id = project.id.clone();
        info!(project = %id, name = %project.name, "imported project");
        self.state.projects.push(project);
        self.state.current_project_id = Some(id.clone());
        id
    }

    fn require(&self, id: &ProjectId) -> Result<&Project> {
        self.project(id)
            .ok_or_else(|| BoardError::ProjectNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::task::AddTask;
    use crate::types::TaskDraft;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_load_empty_backend() {
        let store = ProjectStore::load(MemoryBackend::new()).await;
        assert!(store.projects().is_empty());
        assert!(store.current_project().is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_falls_back_to_empty() {
        let store = ProjectStore::load(MemoryBackend::with_blob("{{{")).await;
        assert_eq!(store.state(), &AppState::empty());
    }

    #[tokio::test]
    async fn test_open_or_seed() {
        let store = ProjectStore::open_or_seed(MemoryBackend::new(), today()).await;
        let current = store.current_project().unwrap();
        assert_eq!(current.name, "My Game Project");
        assert_eq!(store.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_seed_skipped_when_projects_exist() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        store.create_project(&NewProject::new("Mine")).unwrap();
        assert!(!store.seed_if_empty(today()));
        assert_eq!(store.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_create_selects_project() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        let a = store.create_project(&NewProject::new("A")).unwrap();
        let b = store.create_project(&NewProject::new("B")).unwrap();
        assert_eq!(store.current_id().unwrap(), b);

        store.select_project(&a).unwrap();
        assert_eq!(store.current_project().unwrap().name, "A");
    }

    #[tokio::test]
    async fn test_create_blank_name_leaves_state() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        let result = store.create_project(&NewProject::new("  "));
        assert!(matches!(result, Err(BoardError::Validation { .. })));
        assert!(store.projects().is_empty());
    }

    #[tokio::test]
    async fn test_select_unknown_project() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        let result = store.select_project(&"ghost".into());
        assert!(matches!(result, Err(BoardError::ProjectNotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_project_rules() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        let a = store.create_project(&NewProject::new("A")).unwrap();

        let result = store.delete_project(&a);
        assert!(matches!(result, Err(BoardError::InvariantViolation { .. })));
        assert_eq!(store.projects().len(), 1);

        let b = store.create_project(&NewProject::new("B")).unwrap();
        store.delete_project(&b).unwrap();
        assert_eq!(store.current_id().unwrap(), a);
    }

    #[tokio::test]
    async fn test_apply_and_replace_with() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        let id = store.create_project(&NewProject::new("A")).unwrap();

        store
            .apply(&AddTask::new("todo", TaskDraft::new("one")))
            .unwrap();
        let task_id = store
            .replace_with(&id, |p| AddTask::new("done", TaskDraft::new("two")).create(p))
            .unwrap();

        let project = store.current_project().unwrap();
        assert_eq!(project.tasks.len(), 2);
        assert!(project.find_task(&task_id).is_some());
    }

    #[tokio::test]
    async fn test_apply_without_selection() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        let result = store.apply(&AddTask::new("todo", TaskDraft::new("x")));
        assert!(matches!(result, Err(BoardError::InvariantViolation { .. })));
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_state() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        store.create_project(&NewProject::new("A")).unwrap();
        let before = store.state().clone();

        let result = store.apply(&AddTask::new("todo", TaskDraft::new("")));
        assert!(result.is_err());
        assert_eq!(store.state(), &before);
    }

    #[tokio::test]
    async fn test_save_skips_identical_state() {
        let backend = MemoryBackend::new();
        let mut store = ProjectStore::load(backend.clone()).await;
        store.create_project(&NewProject::new("A")).unwrap();

        assert!(store.save().await.unwrap());
        assert!(!store.save().await.unwrap());
        assert_eq!(backend.write_count(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_memory_state() {
        let backend = MemoryBackend::new();
        let mut store = ProjectStore::load(backend.clone()).await;
        store.create_project(&NewProject::new("A")).unwrap();

        backend.set_failing(true);
        let result = store.save().await;
        assert!(matches!(result, Err(BoardError::Storage { .. })));
        assert_eq!(store.projects().len(), 1);

        backend.set_failing(false);
        assert!(store.save().await.unwrap());
    }

    #[tokio::test]
    async fn test_import_project_selects_it() {
        let mut store = ProjectStore::load(MemoryBackend::new()).await;
        store.create_project(&NewProject::new("A")).unwrap();
        let imported = NewProject::new("Imported").build().unwrap();
        let id = store.import_project(imported);
        assert_eq!(store.current_id().unwrap(), id);
        assert_eq!(store.projects().len(), 2);
    }
}
