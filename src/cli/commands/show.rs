//! `kiwi show` - print the workspace overview

use anyhow::Result;

use crate::cli::parser::ParsedArgs;
use crate::cli::runner::CliCommand;
use crate::config::KiwiConfig;
use crate::instance::Instance;

pub struct ShowCommand;

impl CliCommand for ShowCommand {
    fn name(&self) -> &'static str {
        "show"
    }

    fn subcommand(&self) -> clap::Command {
        clap::Command::new("show").about("Show the workspace and its projects")
    }

    fn run(&self, _config: &KiwiConfig, _args: &ParsedArgs) -> Result<()> {
        let instance = Instance::current()?;

        println!("Workspace: {}", instance.directory().display());
        if !instance.exists() {
            println!("           (not initialized, run 'kiwi init')");
        }
        println!("Version:   {}", instance.config().version);
        println!("Shells:    {}", instance.config().shells.join(", "));
        println!();

        if instance.projects().is_empty() {
            println!("No projects found");
            return Ok(());
        }

        println!("{:<10} PROJECT", "STATE");
        for project in instance.projects().iter() {
            let state = if project.is_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            println!("{:<10} {}", state, project.name());
        }

        Ok(())
    }
}
