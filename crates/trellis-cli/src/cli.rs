//! Command execution for the terminal interface.
//!
//! [`Cli`] converts parsed arguments into core parameters, calls the
//! planner, and renders the markdown `Display` output of the result.

use anyhow::Result;
use log::debug;
use trellis_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    params::{DeleteProject, Id, TaskRef},
    Planner,
};

use crate::{
    args::{ProjectCommands, TaskCommands, TreeArgs},
    renderer::TerminalRenderer,
};

/// Runs one command against a planner and prints the result.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self.planner.create_project(&args.into()).await?;
                self.renderer.render(&CreateResult::new(project).to_string())
            }
            ProjectCommands::List => self.list_projects().await,
            ProjectCommands::Show(args) => {
                let params: Id = args.into();
                match self.planner.get_project(&params).await? {
                    Some(project) => self.renderer.render(&project.to_string()),
                    None => anyhow::bail!("Project with ID {} not found", params.id),
                }
            }
            ProjectCommands::Update(args) => {
                let result = self.planner.update_project_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            ProjectCommands::Delete(args) => {
                let params: DeleteProject = args.into();
                match self.planner.delete_project(&params).await? {
                    Some(project) => self.renderer.render(&DeleteResult::new(project).to_string()),
                    None => anyhow::bail!("Project with ID {} not found", params.id),
                }
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self.planner.add_task(&args.into()).await?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Update(args) => {
                let result = self.planner.update_task_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Show(args) => {
                let task = self.planner.get_task(&args.into()).await?;
                self.renderer.render(&task.to_string())
            }
            TaskCommands::Remove(args) => {
                let params: TaskRef = args.into();
                match self.planner.remove_task_result(&params).await? {
                    Some(result) => self.renderer.render(&result.to_string()),
                    None => {
                        debug!("Task {} was already absent", params.id);
                        let status = OperationStatus::skipped(format!(
                            "Task {} does not exist in project {}",
                            params.id, params.project_id
                        ));
                        self.renderer.render(&status.to_string())
                    }
                }
            }
            TaskCommands::Parents(args) => {
                let tasks = self.planner.eligible_parents_list(&args.into()).await?;
                self.renderer.render(&tasks.to_string())
            }
            TaskCommands::Targets(args) => {
                let tasks = self.planner.eligible_dependencies_list(&args.into()).await?;
                self.renderer.render(&tasks.to_string())
            }
        }
    }

    pub async fn show_tree(&self, args: TreeArgs) -> Result<()> {
        let outline = self.planner.project_outline(&args.into()).await?;
        self.renderer.render(&outline.to_string())
    }

    pub async fn list_projects(&self) -> Result<()> {
        let summaries = self.planner.list_projects_summary().await?;
        self.renderer.render(&summaries.to_string())
    }
}
