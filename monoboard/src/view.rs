//! Filter-sort pipeline.
//!
//! Derives the visible, ordered task list for a column from the canonical task
//! list and a [`FilterSpec`]. Pure: borrows the tasks, returns references in
//! display order, and never touches the project.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::types::{Column, ColumnId, FilterSpec, Project, SortBy, SortOrder, Task, ViewMode};

/// One column of the rendered board
#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

/// Filter then sort `tasks`.
///
/// Tag and priority filters are OR within their set and AND between sets.
/// The sort is stable, so equal keys keep their list order.
pub fn view<'a, I>(tasks: I, spec: &FilterSpec) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut visible: Vec<&Task> = tasks
        .into_iter()
        .filter(|t| spec.tags.is_empty() || t.tags.iter().any(|tag| spec.tags.contains(tag)))
        .filter(|t| spec.priority.is_empty() || spec.priority.contains(&t.priority))
        .collect();

    visible.sort_by(|a, b| compare(a, b, spec.sort_by, spec.sort_order));
    visible
}

/// `view` restricted to one column
pub fn column_view<'a>(
    project: &'a Project,
    column: &ColumnId,
    spec: &FilterSpec,
) -> Vec<&'a Task> {
    view(project.tasks.iter().filter(|t| &t.column_id == column), spec)
}

/// Every column in display order with its visible tasks. Columns in timeline
/// mode list their filtered tasks in [`timeline_order`] instead.
pub fn board_view<'a>(project: &'a Project, spec: &FilterSpec) -> Vec<ColumnView<'a>> {
    project
        .columns
        .iter()
        .map(|column| {
            let mut tasks = column_view(project, &column.id, spec);
            if column.view_mode == ViewMode::Timeline {
                tasks = timeline_order(tasks);
            }
            ColumnView { column, tasks }
        })
        .collect()
}

/// Sorted, deduplicated union of every tag used in the project
pub fn available_tags(project: &Project) -> Vec<&str> {
    project
        .tasks
        .iter()
        .flat_map(|t| t.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Timeline ordering: dated tasks first by date, then priority high to low,
/// then title.
pub fn timeline_order<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut ordered: Vec<&Task> = tasks.into_iter().collect();
    ordered.sort_by(|a, b| {
        undated_last(a, b)
            .then_with(|| by_priority(a, b))
            .then_with(|| by_title(a, b))
    });
    ordered
}

fn compare(a: &Task, b: &Task, sort_by: SortBy, order: SortOrder) -> Ordering {
    let directed = |ordering: Ordering| match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };

    match sort_by {
        // Missing due dates stay at the end in both directions
        SortBy::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        // Base comparison is high first; ascending inverts it to low first
        SortBy::Priority => directed(by_priority(a, b).reverse()),
        SortBy::Title => directed(by_title(a, b)),
        SortBy::Created => directed(
            a.created_seq
                .cmp(&b.created_seq)
                .then_with(|| a.id.cmp(&b.id)),
        ),
    }
}

fn undated_last(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// High before low
fn by_priority(a: &Task, b: &Task) -> Ordering {
    b.priority.rank().cmp(&a.priority.rank())
}

fn by_title(a: &Task, b: &Task) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}
