//! CLI definition for the monoboard command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use monoboard::{Priority, SortBy, SortOrder};

/// MonoBoard - task boards for small projects, from the terminal.
///
/// All projects live in one JSON document under the data directory
/// (`monoboard-data.json`). Configuration is read from
/// `<config dir>/monoboard/monoboard.toml`, `./monoboard.toml` and
/// `MONOBOARD_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "monoboard")]
#[command(version)]
#[command(about = "Task boards for small projects")]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the state document
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Manage columns of the current project
    Column {
        #[command(subcommand)]
        command: ColumnCommand,
    },

    /// Manage tasks of the current project
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Show the current project's board
    Board(BoardArgs),

    /// List every tag used in the current project
    Tags,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List projects; the current one is marked with *
    List,

    /// Create a project and make it current
    New {
        name: String,
        /// Extra column between "To Do" and "Done" (repeatable)
        #[arg(long = "column", value_name = "TITLE")]
        columns: Vec<String>,
        /// Only the "To Do" and "Done" columns
        #[arg(long, conflicts_with = "columns")]
        bare: bool,
    },

    /// Make a project current
    Select { id: String },

    /// Rename a project
    Rename { id: String, name: String },

    /// Delete a project (the last one cannot be deleted)
    Delete { id: String },

    /// Print the current project's notes, or replace them
    Notes {
        /// New notes text
        text: Option<String>,
    },

    /// Export the current project as a JSON file
    Export {
        /// Target directory (defaults to the configured export dir)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Import a project from an exported JSON file
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommand {
    /// List columns
    List,

    /// Add a column at the end
    Add {
        /// Column title (defaults to "Column N")
        title: Option<String>,
    },

    /// Rename a column
    Rename { id: String, title: String },

    /// Switch a column between board and timeline layout
    Toggle { id: String },

    /// Delete a column and all its tasks
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    Add {
        title: String,
        /// Column id
        #[arg(long, default_value = "todo")]
        column: String,
        #[command(flatten)]
        fields: TaskFields,
        /// Tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Checklist item (repeatable)
        #[arg(long = "check", value_name = "TEXT")]
        checklist: Vec<String>,
    },

    /// Show a task with its checklist
    Show { id: String },

    /// Edit task fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        no_due: bool,
    },

    /// Move a task to the end of another column
    Move { id: String, column: String },

    /// Drop a task onto another task of the same column
    Reorder { id: String, onto: String },

    /// Delete a task
    Delete { id: String },

    /// Add a tag to a task
    Tag { id: String, tag: String },

    /// Remove a tag from a task
    Untag { id: String, tag: String },

    /// Work with a task's checklist
    Check {
        #[command(subcommand)]
        command: CheckCommand,
    },
}

/// Optional fields shared by `task add` and `task edit`
#[derive(Args, Debug, Default)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: Option<chrono::NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Append a checklist item
    Add { task: String, text: String },
    /// Flip an item between done and not done
    Toggle { task: String, item: String },
    /// Change an item's text
    Edit {
        task: String,
        item: String,
        text: String,
    },
    /// Remove an item
    Remove { task: String, item: String },
}

#[derive(Args, Debug, Default)]
pub struct BoardArgs {
    /// Only tasks with this tag (repeatable, any match)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Only tasks with this priority (repeatable, any match)
    #[arg(long = "priority", value_name = "PRIORITY")]
    pub priorities: Vec<Priority>,
    /// due-date, priority, title or created
    #[arg(long, default_value = "due-date")]
    pub sort: SortBy,
    /// asc or desc
    #[arg(long, default_value = "asc")]
    pub order: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_board_filters() {
        let cli = Cli::try_parse_from([
            "monoboard", "board", "--tag", "art", "--priority", "high", "--sort", "priority",
            "--order", "desc",
        ])
        .unwrap();
        let Commands::Board(args) = cli.command else {
            panic!("expected board command");
        };
        assert_eq!(args.tags, vec!["art"]);
        assert_eq!(args.priorities, vec![Priority::High]);
        assert_eq!(args.sort, SortBy::Priority);
        assert_eq!(args.order, SortOrder::Desc);
    }

    #[test]
    fn test_parse_task_add() {
        let cli = Cli::try_parse_from([
            "monoboard", "task", "add", "Ship it", "--due", "2024-05-01", "--tag", "release",
        ])
        .unwrap();
        let Commands::Task {
            command: TaskCommand::Add { title, column, fields, tags, .. },
        } = cli.command
        else {
            panic!("expected task add");
        };
        assert_eq!(title, "Ship it");
        assert_eq!(column, "todo");
        assert_eq!(fields.due, chrono::NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(tags, vec!["release"]);
    }
}
