//! Command-line argument definitions using clap.
//!
//! Each command has a clap-derived argument struct and a `From` conversion
//! into the matching core parameter type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → TaskCoordinator
//! ```
//!
//! Clap handles flag parsing, help text and date/link syntax. Everything
//! about task invariants stays in the core, so the CLI reports the same
//! validation errors any other interface would.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use trellis_core::{
    models::TaskLink,
    params::{
        CreateProject, DeleteProject, Eligibility, Id, TaskCreate, TaskRef, UpdateProject,
        UpdateTask,
    },
};

/// Trellis: project plans as ordered task trees
///
/// Organise work into projects holding groups, tasks and milestones. Costs
/// roll up from tasks to their groups, every task gets an outline number
/// such as 1.2.1, and dependency links are checked for cycles.
#[derive(Parser)]
#[command(version, about, name = "tl")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/trellis/trellis.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, `tl` lists projects.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage tasks within a project
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show the numbered task tree of a project
    Tree(TreeArgs),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// List all projects
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a project with its task tree
    #[command(alias = "s")]
    Show(ShowProjectArgs),
    /// Update a project's name, description or dates
    #[command(alias = "u")]
    Update(UpdateProjectArgs),
    /// Delete a project and all of its tasks
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteProjectArgs),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task, group or milestone
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Update a task's fields
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Show details of a single task
    #[command(alias = "s")]
    Show(TaskRefArgs),
    /// Remove a task together with everything nested under it
    #[command(aliases = ["d", "rm"])]
    Remove(TaskRefArgs),
    /// List the groups a task may be moved under
    Parents(EligibilityArgs),
    /// List the tasks a task may depend on
    Targets(EligibilityArgs),
}

/// Create a new project
#[derive(ClapArgs)]
pub struct CreateProjectArgs {
    /// Name of the project
    pub name: String,
    /// Planned start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Date,
    /// Planned end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Date,
    #[arg(short, long, help = "Optional description of the project")]
    pub description: Option<String>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject {
            name: val.name,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

#[derive(ClapArgs)]
pub struct ShowProjectArgs {
    #[arg(help = "Unique identifier of the project to show")]
    pub id: u64,
}

impl From<ShowProjectArgs> for Id {
    fn from(val: ShowProjectArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a project's details
#[derive(ClapArgs)]
pub struct UpdateProjectArgs {
    #[arg(help = "Unique identifier of the project to update")]
    pub id: u64,
    #[arg(long, help = "New name for the project")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description; an empty string clears it")]
    pub description: Option<String>,
    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<Date>,
    /// New end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,
}

impl From<UpdateProjectArgs> for UpdateProject {
    fn from(val: UpdateProjectArgs) -> Self {
        UpdateProject {
            id: val.id,
            name: val.name,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// Delete a project permanently
#[derive(ClapArgs)]
pub struct DeleteProjectArgs {
    #[arg(help = "Unique identifier of the project to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteProjectArgs> for DeleteProject {
    fn from(val: DeleteProjectArgs) -> Self {
        DeleteProject {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(ClapArgs)]
pub struct TreeArgs {
    #[arg(help = "Unique identifier of the project")]
    pub project_id: u64,
}

impl From<TreeArgs> for Id {
    fn from(val: TreeArgs) -> Self {
        Id { id: val.project_id }
    }
}

/// Add a task to a project
///
/// The task is placed after the last task nested under its parent, or at the
/// end of the project when no parent is given.
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the project to add the task to")]
    pub project_id: u64,
    /// Display text of the task
    pub text: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Date,
    /// End date (YYYY-MM-DD), not before the start date
    #[arg(long)]
    pub end: Date,
    #[arg(long, help = "ID of the group to nest this task under")]
    pub parent: Option<u64>,
    #[arg(long = "type", value_enum, help = "Kind of task to create")]
    pub kind: Option<TaskKindArg>,
    #[arg(short, long, help = "Optional detailed description")]
    pub description: Option<String>,
    #[arg(long, help = "Completion fraction between 0 and 1")]
    pub percent: Option<f64>,
    #[arg(long, value_enum)]
    pub status: Option<TaskStatusArg>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long, help = "Cost of the task; ignored for groups")]
    pub cost: Option<f64>,
    #[arg(
        short,
        long = "link",
        value_delimiter = ',',
        help = "Dependencies as TARGET[:TYPE], e.g. 3:FS,4:SS"
    )]
    pub links: Vec<TaskLink>,
}

impl From<AddTaskArgs> for TaskCreate {
    fn from(val: AddTaskArgs) -> Self {
        TaskCreate {
            project_id: val.project_id,
            parent: val.parent,
            kind: val.kind.map(|k| k.to_string()),
            text: val.text,
            description: val.description,
            start: val.start,
            end: val.end,
            percent: val.percent,
            status: val.status.map(|s| s.to_string()),
            priority: val.priority.map(|p| p.to_string()),
            assignee: val.assignee,
            cost: val.cost,
            links: val.links,
        }
    }
}

/// Update a task
///
/// Only the given fields change. Setting `--percent 1` completes the task;
/// lowering the percent of a completed task reopens it.
#[derive(ClapArgs)]
pub struct UpdateTaskArgs {
    #[arg(help = "Unique identifier of the project")]
    pub project_id: u64,
    #[arg(help = "Unique identifier of the task to update")]
    pub id: u64,
    #[arg(long, conflicts_with = "detach", help = "Move the task under this group")]
    pub parent: Option<u64>,
    #[arg(long, help = "Move the task to the top level")]
    pub detach: bool,
    #[arg(long = "type", value_enum)]
    pub kind: Option<TaskKindArg>,
    #[arg(short, long)]
    pub text: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long)]
    pub start: Option<Date>,
    #[arg(long)]
    pub end: Option<Date>,
    #[arg(long)]
    pub percent: Option<f64>,
    #[arg(long, value_enum)]
    pub status: Option<TaskStatusArg>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub cost: Option<f64>,
    #[arg(
        short,
        long = "link",
        value_delimiter = ',',
        conflicts_with = "clear_links",
        help = "Replace the dependency list, as TARGET[:TYPE] values"
    )]
    pub links: Option<Vec<TaskLink>>,
    #[arg(long, help = "Remove every dependency link")]
    pub clear_links: bool,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        let links = if val.clear_links {
            Some(Vec::new())
        } else {
            val.links
        };

        UpdateTask {
            project_id: val.project_id,
            id: val.id,
            parent: val.parent,
            detach: val.detach,
            kind: val.kind.map(|k| k.to_string()),
            text: val.text,
            description: val.description,
            start: val.start,
            end: val.end,
            percent: val.percent,
            status: val.status.map(|s| s.to_string()),
            priority: val.priority.map(|p| p.to_string()),
            assignee: val.assignee,
            cost: val.cost,
            links,
        }
    }
}

#[derive(ClapArgs)]
pub struct TaskRefArgs {
    #[arg(help = "Unique identifier of the project")]
    pub project_id: u64,
    #[arg(help = "Unique identifier of the task")]
    pub id: u64,
}

impl From<TaskRefArgs> for TaskRef {
    fn from(val: TaskRefArgs) -> Self {
        TaskRef {
            project_id: val.project_id,
            id: val.id,
        }
    }
}

#[derive(ClapArgs)]
pub struct EligibilityArgs {
    #[arg(help = "Unique identifier of the project")]
    pub project_id: u64,
    #[arg(help = "Task to ask for; omit for a task not created yet")]
    pub id: Option<u64>,
}

impl From<EligibilityArgs> for Eligibility {
    fn from(val: EligibilityArgs) -> Self {
        Eligibility {
            project_id: val.project_id,
            id: val.id,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskKindArg {
    Task,
    Group,
    Milestone,
}

impl std::fmt::Display for TaskKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKindArg::Task => write!(f, "task"),
            TaskKindArg::Group => write!(f, "group"),
            TaskKindArg::Milestone => write!(f, "milestone"),
        }
    }
}

/// Command-line representation of task status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl std::fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatusArg::Pending => write!(f, "pending"),
            TaskStatusArg::InProgress => write!(f, "in-progress"),
            TaskStatusArg::Completed => write!(f, "completed"),
            TaskStatusArg::Blocked => write!(f, "blocked"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityArg::Low => write!(f, "low"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::High => write!(f, "high"),
            PriorityArg::Critical => write!(f, "critical"),
        }
    }
}
