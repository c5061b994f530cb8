//! Persistence gateway: state document codec, project export and import.

use crate::backend::atomic_write;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Project, ProjectId};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// A project rendered as a standalone export document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub contents: String,
}

/// Encode the whole state document
pub fn serialize(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Decode a state document.
///
/// A selection pointing at no project is repaired to the first project, and
/// legacy projects get their protected columns.
pub fn deserialize(blob: &str) -> Result<AppState> {
    let mut state: AppState =
        serde_json::from_str(blob).map_err(|e| BoardError::corrupt(e.to_string()))?;

    if state.repair_selection() {
        warn!(
            current = ?state.current_project_id,
            "current project did not exist; selection repaired"
        );
    }
    for project in &mut state.projects {
        project.upgrade_legacy_columns();
    }
    Ok(state)
}

/// `<sanitized name>_<yyyy-mm-dd>.json`.
///
/// Each whitespace run becomes one `_`, as do path separators, characters
/// not allowed in Windows file names, control characters and a leading dot.
/// The result is always a single path component.
pub fn export_file_name(project: &Project, date: NaiveDate) -> String {
    let mut name = String::with_capacity(project.name.len());
    let mut in_run = false;
    for c in project.name.chars() {
        if c.is_whitespace() {
            if !in_run {
                name.push('_');
            }
            in_run = true;
            continue;
        }
        in_run = false;
        let reserved = matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        name.push(if reserved || c.is_control() { '_' } else { c });
    }
    if name.starts_with('.') {
        name.replace_range(..1, "_");
    }
    format!("{name}_{}.json", date.format("%Y-%m-%d"))
}

/// Render one project as a pretty-printed export document
pub fn export_project(project: &Project, date: NaiveDate) -> Result<ExportedFile> {
    Ok(ExportedFile {
        file_name: export_file_name(project, date),
        contents: serde_json::to_string_pretty(project)?,
    })
}

/// Write the export document for today into `dir`, returning its path
pub async fn write_export(project: &Project, dir: &Path) -> Result<PathBuf> {
    let exported = export_project(project, Utc::now().date_naive())?;
    let path = dir.join(&exported.file_name);
    atomic_write(&path, exported.contents.as_bytes()).await?;
    Ok(path)
}

/// Parse an export document back into a project.
///
/// The project gets a fresh id and `updatedAt`; ids inside it are kept.
pub fn import_project(text: &str) -> Result<Project> {
    let mut value: Value = serde_json::from_str(text)
        .map_err(|e| BoardError::import(format!("not valid JSON: {e}")))?;
    let Some(object) = value.as_object_mut() else {
        return Err(BoardError::import("expected a JSON object"));
    };

    for field in ["id", "name"] {
        match object.get(field).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => {}
            Some(_) => return Err(BoardError::import(format!("field '{field}' is empty"))),
            None => {
                return Err(BoardError::import(format!(
                    "missing or non-string field '{field}'"
                )))
            }
        }
    }
    for field in ["columns", "tasks"] {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(BoardError::import(format!(
                "missing or non-array field '{field}'"
            )));
        }
    }

    let now = serde_json::to_value(Utc::now())?;
    for field in ["createdAt", "updatedAt"] {
        object.entry(field).or_insert_with(|| now.clone());
    }

    let mut project: Project =
        serde_json::from_value(value).map_err(|e| BoardError::import(e.to_string()))?;
    if let Some(orphan) = project.orphaned_tasks().first() {
        return Err(BoardError::import(format!(
            "task '{}' references missing column '{}'",
            orphan.id, orphan.column_id
        )));
    }
    project.id = ProjectId::new();
    project.touch();
    project.upgrade_legacy_columns();
    Ok(project)
}

/// Read and import a project file
pub async fn import_project_file(path: &Path) -> Result<Project> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| BoardError::import(format!("cannot read {}: {e}", path.display())))?;
    import_project(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::board_with;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_serialize_round_trip() {
        let project = board_with(&[("a", "todo"), ("b", "done")]);
        let state = AppState {
            current_project_id: Some(project.id.clone()),
            projects: vec![project],
        };
        let blob = serialize(&state).unwrap();
        assert_eq!(deserialize(&blob).unwrap(), state);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let state = AppState::empty();
        assert_eq!(
            serialize(&state).unwrap(),
            r#"{"projects":[],"currentProjectId":null}"#
        );
    }

    #[test]
    fn test_deserialize_garbage_is_corrupt() {
        assert!(matches!(
            deserialize("{not json"),
            Err(BoardError::CorruptData { .. })
        ));
        assert!(matches!(
            deserialize(r#"{"projects":"nope"}"#),
            Err(BoardError::CorruptData { .. })
        ));
    }

    #[test]
    fn test_deserialize_repairs_dangling_selection() {
        let project = board_with(&[]);
        let state = AppState {
            current_project_id: Some("gone".into()),
            projects: vec![project.clone()],
        };
        let restored = deserialize(&serialize(&state).unwrap()).unwrap();
        assert_eq!(restored.current_project_id, Some(project.id));
    }

    #[test]
    fn test_deserialize_legacy_document() {
        let blob = r##"{
            "projects": [{
                "id": "0b6f0c2e-6f2f-4e43-9c7c-2f1a2c1d1e11",
                "name": "Legacy",
                "columns": [
                    {"id": "todo", "title": "To Do", "color": "#ef4444"},
                    {
                        "id": "in-progress", "title": "In Progress",
                        "color": "#f59e0b", "viewMode": "timeline"
                    },
                    {"id": "done", "title": "Done", "color": "#10b981"}
                ],
                "tasks": [{
                    "id": "t1", "title": "Old", "description": "", "tags": ["x", "x"],
                    "priority": "high", "dueDate": "2024-05-01", "checklist": [],
                    "columnId": "todo"
                }],
                "notes": "",
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-02T00:00:00.000Z"
            }],
            "currentProjectId": "0b6f0c2e-6f2f-4e43-9c7c-2f1a2c1d1e11"
        }"##;
        let state = deserialize(blob).unwrap();
        let project = &state.projects[0];

        assert!(project.columns[0].protected);
        assert!(!project.columns[1].protected);
        assert!(project.columns[2].protected);
        assert_eq!(project.tasks[0].tags.len(), 1);
        assert_eq!(project.tasks[0].created_seq, 0);
        assert_eq!(project.tasks[0].due_date, Some(date("2024-05-01")));
    }

    #[test]
    fn test_export_file_name() {
        let mut project = board_with(&[]);
        project.name = "My  Game\tProject".into();
        assert_eq!(
            export_file_name(&project, date("2024-03-09")),
            "My_Game_Project_2024-03-09.json"
        );
    }

    #[test]
    fn test_export_file_name_keeps_edge_whitespace() {
        let mut project = board_with(&[]);
        project.name = " Plan ".into();
        assert_eq!(
            export_file_name(&project, date("2024-03-09")),
            "_Plan__2024-03-09.json"
        );
    }

    #[test]
    fn test_export_file_name_is_single_component() {
        let mut project = board_with(&[]);
        for name in ["../escaped plan", "a/b\\c", ".hidden", "what?: <x>|*\"y\""] {
            project.name = name.into();
            let file_name = export_file_name(&project, date("2024-03-09"));
            assert!(!file_name.contains('/'), "{file_name}");
            assert!(!file_name.contains('\\'), "{file_name}");
            assert!(!file_name.starts_with('.'), "{file_name}");
            assert_eq!(Path::new(&file_name).components().count(), 1);
        }

        project.name = "../escaped plan".into();
        assert_eq!(
            export_file_name(&project, date("2024-03-09")),
            "_._escaped_plan_2024-03-09.json"
        );
    }

    #[test]
    fn test_export_import_round_trip() {
        let project = board_with(&[("a", "todo"), ("b", "doing")]);
        let exported = export_project(&project, date("2024-03-09")).unwrap();
        assert!(exported.contents.contains("\n  "), "pretty printed");

        let imported = import_project(&exported.contents).unwrap();
        assert_ne!(imported.id, project.id);
        assert_eq!(imported.name, project.name);
        assert_eq!(imported.columns, project.columns);
        assert_eq!(imported.tasks, project.tasks);
        assert!(imported.updated_at >= project.updated_at);
    }

    #[test]
    fn test_import_names_missing_field() {
        let err = import_project(r#"{"id":"x","name":"N","columns":[]}"#).unwrap_err();
        assert!(matches!(err, BoardError::Import { .. }));
        assert!(err.to_string().contains("'tasks'"));

        let err = import_project(r#"{"id":"x","name":"N","columns":{},"tasks":[]}"#).unwrap_err();
        assert!(err.to_string().contains("'columns'"));
    }

    #[test]
    fn test_import_rejects_blank_name_and_bad_json() {
        let err = import_project(r#"{"id":"x","name":" ","columns":[],"tasks":[]}"#).unwrap_err();
        assert!(err.to_string().contains("'name'"));
        assert!(matches!(
            import_project("[1, 2"),
            Err(BoardError::Import { .. })
        ));
        assert!(matches!(import_project("[]"), Err(BoardError::Import { .. })));
    }

    #[test]
    fn test_import_rejects_task_in_missing_column() {
        let text = r##"{
            "id": "x", "name": "Orphans",
            "columns": [{"id": "todo", "title": "To Do", "color": "#ef4444"}],
            "tasks": [{
                "id": "t1", "title": "Lost", "description": "", "tags": [],
                "priority": "low", "checklist": [], "columnId": "ghost"
            }]
        }"##;
        let err = import_project(text).unwrap_err();
        assert!(matches!(err, BoardError::Import { .. }));
        let message = err.to_string();
        assert!(message.contains("'t1'"), "{message}");
        assert!(message.contains("'ghost'"), "{message}");
    }

    #[test]
    fn test_import_fills_missing_timestamps() {
        let project =
            import_project(r#"{"id":"x","name":"Bare","columns":[],"tasks":[]}"#).unwrap();
        assert_eq!(project.name, "Bare");
        assert!(project.notes.is_empty());
    }

    #[tokio::test]
    async fn test_write_export_and_import_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let project = board_with(&[("a", "todo")]);

        let path = write_export(&project, temp.path()).await.unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("Test_"));

        let imported = import_project_file(&path).await.unwrap();
        assert_eq!(imported.tasks, project.tasks);

        let missing = import_project_file(&temp.path().join("nope.json")).await;
        assert!(matches!(missing, Err(BoardError::Import { .. })));
    }

    #[tokio::test]
    async fn test_write_export_stays_in_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("exports");
        let mut project = board_with(&[]);
        project.name = "../escaped plan".into();

        let path = write_export(&project, &dir).await.unwrap();
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert!(path.exists());
        // nothing landed beside the export dir
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
