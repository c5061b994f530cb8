//! Task types: Task, TaskDraft, Priority, ChecklistItem

use super::ids::{ChecklistItemId, ColumnId, TaskId};
use chrono::{DateTime, NaiveDate};
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Task priority. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Numeric weight used by the priority sort (high = 3)
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{other}' (expected low, medium or high)")),
        }
    }
}

/// A sub-step of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    /// Create a new, incomplete checklist item
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId::new(),
            text: text.into(),
            completed: false,
        }
    }

    /// Mark the item as completed
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,

    /// Case-sensitive, insertion ordered, deduplicated
    #[serde(default)]
    pub tags: IndexSet<String>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    /// The column this task belongs to
    pub column_id: ColumnId,

    /// Creation order within the project. Legacy tasks carry 0.
    #[serde(default)]
    pub created_seq: u64,
}

impl Task {
    /// Create a new task with the given title in a column
    pub fn new(title: impl Into<String>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            notes: String::new(),
            tags: IndexSet::new(),
            priority: Priority::default(),
            due_date: None,
            checklist: Vec::new(),
            column_id: column_id.into(),
            created_seq: 0,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Check whether the task carries a tag (case-sensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Fraction of completed checklist items, 0.0 for an empty checklist
    pub fn progress(&self) -> f64 {
        if self.checklist.is_empty() {
            return 0.0;
        }
        let done = self.checklist.iter().filter(|i| i.completed).count();
        done as f64 / self.checklist.len() as f64
    }

    /// A task is overdue when its due date lies strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }

    /// Find a checklist item by ID
    pub fn find_checklist_item(&self, id: &ChecklistItemId) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|i| &i.id == id)
    }
}

/// Input for creating a task. The engine assigns the id, column and sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl TaskDraft {
    /// Create a draft with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_checklist_item(mut self, text: impl Into<String>) -> Self {
        self.checklist.push(ChecklistItem::new(text));
        self
    }
}

/// Accepts `YYYY-MM-DD`, a full RFC 3339 timestamp (date part kept), or an
/// empty string (no due date).
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid due date '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_task_creation() {
        let task = Task::new("Test task", "todo");
        assert_eq!(task.title, "Test task");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.tags.is_empty());
        assert!(task.due_date.is_none());
        assert_eq!(task.column_id.as_str(), "todo");
    }

    #[test]
    fn test_priority_order_and_rank() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.rank(), 3);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_tags_deduplicated() {
        let task = Task::new("T", "todo")
            .with_tag("art")
            .with_tag("art")
            .with_tag("Art");
        assert_eq!(task.tags.len(), 2);
        assert!(task.has_tag("Art"));
        assert!(!task.has_tag("ART"));
    }

    #[test]
    fn test_progress() {
        let mut task = Task::new("T", "todo");
        assert_eq!(task.progress(), 0.0);

        task.checklist.push(ChecklistItem::new("one").completed());
        task.checklist.push(ChecklistItem::new("two"));
        assert_eq!(task.progress(), 0.5);
    }

    #[test]
    fn test_overdue() {
        let task = Task::new("T", "todo").with_due_date(date("2024-01-02"));
        assert!(task.is_overdue(date("2024-01-03")));
        assert!(!task.is_overdue(date("2024-01-02")));
        assert!(!Task::new("T", "todo").is_overdue(date("2024-01-03")));
    }

    #[test]
    fn test_task_json_uses_camel_case() {
        let task = Task::new("T", "todo").with_due_date(date("2024-05-01"));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["columnId"], "todo");
        assert_eq!(json["dueDate"], "2024-05-01");
        assert_eq!(json["priority"], "medium");
        assert!(json.get("column_id").is_none());
    }

    #[test]
    fn test_legacy_task_defaults() {
        // Shape written by older versions: no priority, notes or sequence
        let json = r#"{
            "id": "5b1d",
            "title": "Create sprite animations",
            "description": "Design and animate character sprites",
            "tags": ["art", "animation", "art"],
            "checklist": [{"id": "c1", "text": "Sketch", "completed": true}],
            "columnId": "done"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.notes, "");
        assert_eq!(task.created_seq, 0);
        assert_eq!(task.tags.len(), 2);
        assert_eq!(task.progress(), 1.0);
    }

    #[test]
    fn test_due_date_formats() {
        let parse = |v: &str| -> Task {
            serde_json::from_str(&format!(
                r#"{{"id":"t","title":"x","columnId":"todo","dueDate":{v}}}"#
            ))
            .unwrap()
        };
        assert_eq!(parse("\"2024-01-01\"").due_date, Some(date("2024-01-01")));
        assert_eq!(
            parse("\"2024-01-01T10:00:00.000Z\"").due_date,
            Some(date("2024-01-01"))
        );
        assert_eq!(parse("\"\"").due_date, None);
        assert_eq!(parse("null").due_date, None);

        let bad: Result<Task, _> =
            serde_json::from_str(r#"{"id":"t","title":"x","columnId":"todo","dueDate":"soon"}"#);
        assert!(bad.is_err());
    }
}
