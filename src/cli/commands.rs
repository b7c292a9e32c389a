//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "embedlink")]
#[command(about = "Knowledge base for embedded developers: bookmarks, notes, projects and tools", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Start without the sample bookmarks and notes
        #[arg(long)]
        empty: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Sign in with a local profile
    Login {
        email: String,

        /// Display name (default: the part of the email before '@')
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Remove the local profile
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Manage bookmarks
    #[command(subcommand)]
    #[command(visible_alias = "bm")]
    Bookmark(BookmarkCommand),

    /// Manage Markdown notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Show notes grouped by their first tag
    Mindmap {
        /// Only list notes in this tag's cluster
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Track projects and their tasks
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Store code snippets
    #[command(subcommand)]
    Snippet(SnippetCommand),

    /// Materials library (datasheets, archives, repositories)
    #[command(subcommand)]
    Material(MaterialCommand),

    /// Daily planner: schedule, todos, summary and mood
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Focus timer
    #[command(subcommand)]
    Pomodoro(PomodoroCommand),

    /// Number base and ASCII/hex converters
    #[command(subcommand)]
    Convert(ConvertCommand),

    /// Microcontroller clock calculators
    #[command(subcommand)]
    Calc(CalcCommand),

    /// Print a random engineering quote
    Quote,

    /// Show how many records each collection holds
    Stats,

    /// Export every collection to a JSON backup file
    Export {
        /// Output file (default: embedlink_backup_YYYY-MM-DD.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON backup, overwriting the collections it contains
    Import {
        file: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Back up to or restore from a private GitHub Gist
    #[command(subcommand)]
    Sync(SyncCommand),
}

/// Fields shared by commands that take an optional date
#[derive(Args, Debug, Clone)]
pub struct DateArg {
    /// Day to work on: YYYY-MM-DD, today, yesterday or tomorrow
    #[arg(short, long, default_value = "today")]
    pub date: String,
}

#[derive(Subcommand, Debug)]
pub enum BookmarkCommand {
    /// Add a bookmark
    Add {
        url: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// embedded, linux, hardware, tools, learning, ai, other
        #[arg(short, long)]
        category: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Fill missing fields with an AI suggestion
        #[arg(long)]
        ai: bool,
    },

    /// List bookmarks
    #[command(visible_alias = "ls")]
    List {
        #[arg(short, long)]
        category: Option<String>,

        /// Search title, description and tags
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Edit fields of a bookmark; omitted fields are kept
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a bookmark
    #[command(visible_alias = "rm")]
    Delete { id: String },

    /// List the categories
    Categories,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Add a note; opens $EDITOR when no content is given
    Add {
        title: String,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// List notes
    #[command(visible_alias = "ls")]
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Print a note
    Show { id: String },

    /// Edit a note; with --editor the content is edited in $EDITOR
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long, conflicts_with = "editor")]
        content: Option<String>,

        #[arg(long)]
        tags: Option<String>,

        #[arg(short, long)]
        editor: bool,
    },

    /// Delete a note
    #[command(visible_alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Add a project
    Add {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        github: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// List projects
    #[command(visible_alias = "ls")]
    List {
        /// planning, development, testing, released, archived
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Print a project with its tasks
    Show { id: String },

    /// Edit project details; omitted fields are kept
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Repository URL; pass "" to clear it
        #[arg(short, long)]
        github: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// Change project status
    Status { id: String, status: String },

    /// Change project priority
    Priority { id: String, priority: String },

    /// Delete a project
    #[command(visible_alias = "rm")]
    Delete { id: String },

    /// Manage a project's tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Totals, average progress and status counts
    Dashboard,

    /// Suggest a commit message from completed tasks (AI)
    CommitMsg { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task to a project
    Add { project: String, text: String },

    /// Toggle a task's completion
    Toggle { project: String, task: String },

    /// Delete a task
    #[command(visible_alias = "rm")]
    Delete { project: String, task: String },
}

#[derive(Subcommand, Debug)]
pub enum SnippetCommand {
    /// Add a snippet from --code or a source file
    Add {
        title: String,

        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        code: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,

        /// c, cpp, python, bash
        #[arg(short, long, default_value = "c")]
        language: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Target platform, e.g. STM32F4
        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// List snippets
    #[command(visible_alias = "ls")]
    List {
        /// Search title, tags and platform
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Print a snippet's code
    Show { id: String },

    /// Edit a snippet; omitted fields are kept
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long, conflicts_with = "file")]
        code: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long)]
        language: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a snippet
    #[command(visible_alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MaterialCommand {
    /// Add a material
    Add {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// pdf, doc, zip, code, image, git, other
        #[arg(short = 't', long = "type", default_value = "other")]
        kind: String,

        #[arg(long)]
        tags: Option<String>,

        /// URL or file:// path
        #[arg(short, long)]
        link: Option<String>,

        /// Fill missing fields with an AI suggestion
        #[arg(long)]
        ai: bool,

        /// Extra context passed to the AI
        #[arg(long, default_value = "")]
        context: String,
    },

    /// List materials
    #[command(visible_alias = "ls")]
    List {
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Search name and tags
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Delete a material
    #[command(visible_alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Show the plan for a day
    Show {
        #[command(flatten)]
        date: DateArg,
    },

    /// List days that have a plan
    #[command(visible_alias = "ls")]
    List,

    /// Manage the todo list
    #[command(subcommand)]
    Todo(TodoCommand),

    /// Manage time blocks
    #[command(subcommand)]
    Block(BlockCommand),

    /// Set the day's summary, or generate one with --ai
    Summary {
        #[arg(required_unless_present = "ai", conflicts_with = "ai")]
        text: Option<String>,

        #[arg(long)]
        ai: bool,

        #[command(flatten)]
        date: DateArg,
    },

    /// Set the day's mood (happy, neutral, stress)
    Mood {
        mood: String,

        #[command(flatten)]
        date: DateArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    Add {
        text: String,

        #[command(flatten)]
        date: DateArg,
    },
    Toggle {
        id: String,

        #[command(flatten)]
        date: DateArg,
    },
    #[command(visible_alias = "rm")]
    Delete {
        id: String,

        #[command(flatten)]
        date: DateArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum BlockCommand {
    Add {
        title: String,

        /// HH:MM
        #[arg(short, long)]
        start: String,

        /// HH:MM
        #[arg(short, long)]
        end: String,

        /// task, deep_work, meeting, break
        #[arg(short = 't', long = "type", default_value = "task")]
        kind: String,

        #[command(flatten)]
        date: DateArg,
    },
    #[command(visible_alias = "rm")]
    Delete {
        id: String,

        #[command(flatten)]
        date: DateArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum PomodoroCommand {
    /// Run a countdown in the terminal
    Start {
        /// What you are working on
        #[arg(short, long, default_value = "")]
        task: String,

        /// Run a 5-minute break instead of a 25-minute work session
        #[arg(short = 'b', long = "break")]
        rest: bool,

        /// Override the countdown length in seconds
        #[arg(long, hide = true)]
        seconds: Option<u32>,
    },

    /// List completed sessions, newest first
    History,

    /// Delete the session history
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConvertCommand {
    /// Convert a number between dec, hex and bin
    Base {
        value: String,

        /// dec, hex or bin
        #[arg(short, long, default_value = "dec")]
        from: String,
    },

    /// Text to hex byte codes
    TextToHex { text: String },

    /// Hex byte codes to text
    HexToText { hex: String },
}

#[derive(Subcommand, Debug)]
pub enum CalcCommand {
    /// UART baud-rate divider (16x oversampling)
    Baud {
        /// Peripheral clock in MHz
        #[arg(long, default_value_t = 72.0)]
        pclk: f64,

        #[arg(long, default_value_t = 115200.0)]
        baud: f64,
    },

    /// Timer update frequency from PSC and ARR
    Timer {
        /// Timer clock in MHz
        #[arg(long, default_value_t = 72.0)]
        clock: f64,

        #[arg(long, default_value_t = 7199)]
        psc: u32,

        #[arg(long, default_value_t = 9999)]
        arr: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
    /// Upload a backup to the private gist
    Push,

    /// Restore the backup from the gist, overwriting local data
    Pull {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_task_command() {
        let cli = Cli::parse_from(["embedlink", "project", "task", "add", "p1", "Write HAL"]);
        match cli.command {
            Some(Commands::Project(ProjectCommand::Task(TaskCommand::Add { project, text }))) => {
                assert_eq!(project, "p1");
                assert_eq!(text, "Write HAL");
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_plan_date_defaults_to_today() {
        let cli = Cli::parse_from(["embedlink", "plan", "todo", "add", "Solder header"]);
        match cli.command {
            Some(Commands::Plan(PlanCommand::Todo(TodoCommand::Add { date, .. }))) => {
                assert_eq!(date.date, "today");
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_snippet_requires_code_or_file() {
        assert!(Cli::try_parse_from(["embedlink", "snippet", "add", "Blink"]).is_err());
        assert!(Cli::try_parse_from(["embedlink", "snippet", "add", "Blink", "-c", "x"]).is_ok());
    }
}
