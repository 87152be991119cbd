//! Subcommand handler implementations
//!
//! One file per handler. [`all`] instantiates them in declaration order;
//! that order is what `kiwi --help` shows, dispatch itself matches by
//! name only.

use anyhow::{Context, Result};

use crate::config::KiwiConfig;
use crate::instance::Instance;
use crate::projects::Project;

mod cmd;
mod init;
mod logs;
mod shell;
mod show;

pub use cmd::CmdCommand;
pub use init::InitCommand;
pub use logs::LogsCommand;
pub use shell::ShellCommand;
pub use show::ShowCommand;

use super::runner::CliCommand;

/// All known handlers, in declaration order
pub fn all() -> Vec<Box<dyn CliCommand>> {
    vec![
        Box::new(InitCommand),
        Box::new(ShowCommand),
        Box::new(LogsCommand),
        Box::new(CmdCommand),
        Box::new(ShellCommand),
    ]
}

/// Resolves a project name against an instance, rejecting unknown and
/// disabled projects before anything is spawned
pub(crate) fn resolve_project<'a>(instance: &'a Instance, name: &str) -> Result<&'a Project> {
    let project = instance.projects().get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "No project '{}' in {}",
            name,
            instance.directory().display()
        )
    })?;

    if !project.is_enabled() {
        anyhow::bail!("Project '{}' is disabled", name);
    }

    Ok(project)
}

/// Prepares a docker-compose invocation in a project directory with the
/// configured environment applied
pub(crate) fn compose_command(config: &KiwiConfig, project: &Project) -> std::process::Command {
    let mut command = std::process::Command::new("docker-compose");
    command.current_dir(project.directory());
    command.envs(&config.environment);
    command
}

/// Runs a prepared command attached to the terminal
pub(crate) fn run_attached(mut command: std::process::Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("Failed to run {:?}", command.get_program()))?;

    if !status.success() {
        anyhow::bail!("docker-compose exited with {}", status);
    }

    Ok(())
}
