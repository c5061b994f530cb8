//! Transient view descriptor: tag/priority filters plus a sort key.

use super::task::Priority;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Key the filtered view is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    DueDate,
    Priority,
    Title,
    Created,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "duedate" | "due" => Ok(SortBy::DueDate),
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            "created" => Ok(SortBy::Created),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Direction applied on top of the comparator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Filters (OR within each set) and sort. Never persisted with a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub priority: BTreeSet<Priority>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority.insert(priority);
        self
    }

    pub fn sorted_by(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Add the tag if absent, remove it if present
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    /// Add the priority if absent, remove it if present
    pub fn toggle_priority(&mut self, priority: Priority) {
        if !self.priority.remove(&priority) {
            self.priority.insert(priority);
        }
    }

    /// Re-selecting the ascending key flips to descending; anything else
    /// selects the key ascending.
    pub fn toggle_sort(&mut self, sort_by: SortBy) {
        self.sort_order = if self.sort_by == sort_by && self.sort_order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.sort_by = sort_by;
    }

    /// True when a tag or priority filter is active
    pub fn is_filtering(&self) -> bool {
        !self.tags.is_empty() || !self.priority.is_empty()
    }

    /// Back to no filters, due date ascending
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
