//! Command handlers: translate parsed CLI commands into store operations.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use monoboard::{
    column::{AddColumn, DeleteColumn, RenameColumn, ToggleColumnViewMode},
    import_project_file,
    project::{NewProject, UpdateNotes},
    task::{
        AddChecklistItem, AddTask, DeleteTask, EditChecklistItem, MoveTask, RemoveChecklistItem,
        ReorderTask, TagTask, ToggleChecklistItem, UntagTask, UpdateTask,
    },
    view::{available_tags, board_view},
    write_export, ChecklistItemId, ColumnId, FilterSpec, Project, ProjectId, ProjectStore, Task,
    TaskDraft, TaskId, ViewMode,
};
use tracing::debug;

use crate::cli::{
    BoardArgs, CheckCommand, ColumnCommand, Commands, ProjectCommand, TaskCommand, TaskFields,
};
use crate::config::CliConfig;
use crate::table::{checklist_summary, new_table, truncate_str};

/// Columns created by `project new` when none are given
const DEFAULT_EXTRA_COLUMNS: &[&str] = &["In Progress"];

/// Run one command against the store
pub async fn run(
    command: Commands,
    store: &mut ProjectStore,
    config: &CliConfig,
    today: NaiveDate,
) -> Result<()> {
    match command {
        Commands::Project { command } => project(command, store, config).await,
        Commands::Column { command } => column(command, store),
        Commands::Task { command } => task(command, store, today),
        Commands::Board(args) => board(&args, store, today),
        Commands::Tags => {
            for tag in available_tags(current(store)?) {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

async fn project(
    command: ProjectCommand,
    store: &mut ProjectStore,
    config: &CliConfig,
) -> Result<()> {
    match command {
        ProjectCommand::List => {
            let current = store.current_project().map(|p| p.id.clone());
            let mut table = new_table();
            table.set_header(vec!["", "Name", "Columns", "Tasks", "Updated", "Id"]);
            for p in store.projects() {
                let marker = if Some(&p.id) == current.as_ref() { "*" } else { "" };
                table.add_row(vec![
                    marker.to_string(),
                    p.name.clone(),
                    p.columns.len().to_string(),
                    p.tasks.len().to_string(),
                    p.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                    p.id.to_string(),
                ]);
            }
            println!("{table}");
        }
        ProjectCommand::New {
            name,
            columns,
            bare,
        } => {
            let mut new = NewProject::new(name);
            if !bare {
                if columns.is_empty() {
                    new.columns = DEFAULT_EXTRA_COLUMNS.iter().map(|c| c.to_string()).collect();
                } else {
                    new.columns = columns;
                }
            }
            println!("{}", store.create_project(&new)?);
        }
        ProjectCommand::Select { id } => {
            let id = project_id(store, &id)?;
            store.select_project(&id)?;
        }
        ProjectCommand::Rename { id, name } => {
            let id = project_id(store, &id)?;
            store.rename_project(&id, &name)?;
        }
        ProjectCommand::Delete { id } => {
            let id = project_id(store, &id)?;
            store.delete_project(&id)?;
        }
        ProjectCommand::Notes { text: None } => println!("{}", current(store)?.notes),
        ProjectCommand::Notes { text: Some(text) } => store.apply(&UpdateNotes::new(text))?,
        ProjectCommand::Export { dir } => {
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let path = write_export(current(store)?, &dir).await?;
            println!("{}", path.display());
        }
        ProjectCommand::Import { file } => {
            let imported = import_project_file(&file).await?;
            let name = imported.name.clone();
            let id = store.import_project(imported);
            println!("Imported '{name}' as {id}");
        }
    }
    Ok(())
}

fn column(command: ColumnCommand, store: &mut ProjectStore) -> Result<()> {
    match command {
        ColumnCommand::List => {
            let project = current(store)?;
            let mut table = new_table();
            table.set_header(vec!["Id", "Title", "View", "Protected", "Tasks", "Color"]);
            for c in &project.columns {
                table.add_row(vec![
                    c.id.to_string(),
                    c.title.clone(),
                    view_label(c.view_mode).to_string(),
                    if c.protected { "yes" } else { "" }.to_string(),
                    project.tasks_in_column(&c.id).count().to_string(),
                    c.color.clone(),
                ]);
            }
            println!("{table}");
        }
        ColumnCommand::Add { title } => {
            let add = AddColumn { title };
            let project = store.current_id()?;
            let id = store.replace_with(&project, |p| add.create(p))?;
            println!("{id}");
        }
        ColumnCommand::Rename { id, title } => {
            let id = column_id(current(store)?, &id)?;
            store.apply(&RenameColumn::new(id, title))?;
        }
        ColumnCommand::Toggle { id } => {
            let id = column_id(current(store)?, &id)?;
            store.apply(&ToggleColumnViewMode::new(id))?;
        }
        ColumnCommand::Delete { id } => {
            let id = column_id(current(store)?, &id)?;
            store.apply(&DeleteColumn::new(id))?;
        }
    }
    Ok(())
}

fn task(command: TaskCommand, store: &mut ProjectStore, today: NaiveDate) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            column,
            fields,
            tags,
            checklist,
        } => {
            let column = column_id(current(store)?, &column)?;
            let mut draft = TaskDraft::new(title);
            draft.description = fields.description.unwrap_or_default();
            draft.notes = fields.notes.unwrap_or_default();
            draft.priority = fields.priority.unwrap_or_default();
            draft.due_date = fields.due;
            draft.tags = tags;
            for text in checklist {
                draft = draft.with_checklist_item(text);
            }

            let add = AddTask::new(column, draft);
            let project = store.current_id()?;
            let id = store.replace_with(&project, |p| add.create(p))?;
            println!("{id}");
        }
        TaskCommand::Show { id } => {
            let project = current(store)?;
            let task = find_task(project, &id)?;
            print_task(project, task, today);
        }
        TaskCommand::Edit {
            id,
            title,
            fields,
            no_due,
        } => {
            let project = current(store)?;
            let mut edited = find_task(project, &id)?.clone();
            if let Some(title) = title {
                edited.title = title;
            }
            apply_fields(&mut edited, fields);
            if no_due {
                edited.due_date = None;
            }
            store.apply(&UpdateTask::new(edited))?;
        }
        TaskCommand::Move { id, column } => {
            let project = current(store)?;
            let id = find_task(project, &id)?.id.clone();
            let column = column_id(project, &column)?;
            store.apply(&MoveTask::new(id, column))?;
        }
        TaskCommand::Reorder { id, onto } => {
            let project = current(store)?;
            let task = find_task(project, &id)?;
            let (id, column) = (task.id.clone(), task.column_id.clone());
            let onto = find_task(project, &onto)?.id.clone();
            store.apply(&ReorderTask::new(column, id, onto))?;
        }
        TaskCommand::Delete { id } => {
            let id = find_task(current(store)?, &id)?.id.clone();
            store.apply(&DeleteTask::new(id))?;
        }
        TaskCommand::Tag { id, tag } => {
            let id = find_task(current(store)?, &id)?.id.clone();
            store.apply(&TagTask::new(id, tag))?;
        }
        TaskCommand::Untag { id, tag } => {
            let id = find_task(current(store)?, &id)?.id.clone();
            store.apply(&UntagTask::new(id, tag))?;
        }
        TaskCommand::Check { command } => check(command, store)?,
    }
    Ok(())
}

fn check(command: CheckCommand, store: &mut ProjectStore) -> Result<()> {
    match command {
        CheckCommand::Add { task, text } => {
            let task = find_task(current(store)?, &task)?.id.clone();
            let add = AddChecklistItem::new(task, text);
            let project = store.current_id()?;
            let id = store.replace_with(&project, |p| add.create(p))?;
            println!("{id}");
        }
        CheckCommand::Toggle { task, item } => {
            let (task, item) = checklist_ids(current(store)?, &task, &item)?;
            store.apply(&ToggleChecklistItem::new(task, item))?;
        }
        CheckCommand::Edit { task, item, text } => {
            let (task, item) = checklist_ids(current(store)?, &task, &item)?;
            store.apply(&EditChecklistItem::new(task, item, text))?;
        }
        CheckCommand::Remove { task, item } => {
            let (task, item) = checklist_ids(current(store)?, &task, &item)?;
            store.apply(&RemoveChecklistItem::new(task, item))?;
        }
    }
    Ok(())
}

fn board(args: &BoardArgs, store: &ProjectStore, today: NaiveDate) -> Result<()> {
    let project = current(store)?;
    let mut spec = FilterSpec::default().sorted_by(args.sort, args.order);
    spec.tags.extend(args.tags.iter().cloned());
    spec.priority.extend(args.priorities.iter().copied());
    debug!(?spec, "rendering board");

    println!("{}", project.name);
    for column in board_view(project, &spec) {
        let mut table = new_table();
        table.set_header(vec!["Id", "Title", "Priority", "Due", "Tags", "Checklist"]);
        for task in &column.tasks {
            let done = task.checklist.iter().filter(|c| c.completed).count();
            table.add_row(vec![
                task.id.to_string(),
                truncate_str(&task.title, 40),
                task.priority.to_string(),
                due_label(task, today),
                task.tags.iter().cloned().collect::<Vec<_>>().join(", "),
                checklist_summary(done, task.checklist.len()),
            ]);
        }
        println!();
        println!(
            "{} ({}) [{}]",
            column.column.title,
            column.tasks.len(),
            view_label(column.column.view_mode)
        );
        println!("{table}");
    }
    Ok(())
}

fn print_task(project: &Project, task: &Task, today: NaiveDate) {
    let column = project
        .find_column(&task.column_id)
        .map(|c| c.title.as_str())
        .unwrap_or("?");

    println!("{}", task.title);
    println!("  id:       {}", task.id);
    println!("  column:   {column}");
    println!("  priority: {}", task.priority);
    println!("  due:      {}", due_label(task, today));
    if !task.tags.is_empty() {
        let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
        println!("  tags:     {}", tags.join(", "));
    }
    if !task.description.is_empty() {
        println!();
        println!("{}", task.description);
    }
    if !task.notes.is_empty() {
        println!();
        println!("Notes:");
        println!("{}", task.notes);
    }
    if !task.checklist.is_empty() {
        let mut table = new_table();
        table.set_header(vec!["", "Item", "Id"]);
        for item in &task.checklist {
            table.add_row(vec![
                if item.completed { "[x]" } else { "[ ]" }.to_string(),
                item.text.clone(),
                item.id.to_string(),
            ]);
        }
        println!();
        println!("Checklist ({:.0}% done)", task.progress() * 100.0);
        println!("{table}");
    }
}

fn apply_fields(task: &mut Task, fields: TaskFields) {
    if let Some(description) = fields.description {
        task.description = description;
    }
    if let Some(notes) = fields.notes {
        task.notes = notes;
    }
    if let Some(priority) = fields.priority {
        task.priority = priority;
    }
    if let Some(due) = fields.due {
        task.due_date = Some(due);
    }
}

fn due_label(task: &Task, today: NaiveDate) -> String {
    match task.due_date {
        Some(due) if task.is_overdue(today) => format!("{due} (overdue)"),
        Some(due) => due.to_string(),
        None => String::new(),
    }
}

fn view_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Board => "board",
        ViewMode::Timeline => "timeline",
    }
}

fn current(store: &ProjectStore) -> Result<&Project> {
    store
        .current_project()
        .ok_or_else(|| anyhow!("no project selected; create one with `monoboard project new`"))
}

fn project_id(store: &ProjectStore, input: &str) -> Result<ProjectId> {
    let ids = store.projects().iter().map(|p| p.id.as_str());
    resolve_id(ids, input, "project").map(ProjectId::from)
}

fn column_id(project: &Project, input: &str) -> Result<ColumnId> {
    let ids = project.columns.iter().map(|c| c.id.as_str());
    resolve_id(ids, input, "column").map(ColumnId::from)
}

fn find_task<'a>(project: &'a Project, input: &str) -> Result<&'a Task> {
    let ids = project.tasks.iter().map(|t| t.id.as_str());
    let id = TaskId::from(resolve_id(ids, input, "task")?);
    project
        .find_task(&id)
        .ok_or_else(|| anyhow!("no task matches '{input}'"))
}

fn checklist_ids(project: &Project, task: &str, item: &str) -> Result<(TaskId, ChecklistItemId)> {
    let task = find_task(project, task)?;
    let ids = task.checklist.iter().map(|c| c.id.as_str());
    let item = resolve_id(ids, item, "checklist item")?;
    Ok((task.id.clone(), ChecklistItemId::from(item)))
}

/// Match an exact id or a unique id prefix
fn resolve_id<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    input: &str,
    what: &str,
) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("empty {what} id");
    }

    let candidates: Vec<&str> = candidates.into_iter().collect();
    if candidates.contains(&input) {
        return Ok(input.to_string());
    }
    let matches: Vec<&str> = candidates
        .into_iter()
        .filter(|c| c.starts_with(input))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => bail!("no {what} matches '{input}'"),
        _ => bail!("'{input}' is ambiguous: {} {what}s match", matches.len()),
    }
}
