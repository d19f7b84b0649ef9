//! Trellis CLI Application
//!
//! Command-line interface for the trellis task-hierarchy engine.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use trellis_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));

    info!("Trellis started");

    match command {
        Some(Project { command }) => cli.handle_project_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Tree(args)) => cli.show_tree(args).await,
        None => cli.list_projects().await,
    }
}
