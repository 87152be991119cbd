//! `kiwi shell` - open an interactive shell in a project's service

use anyhow::Result;
use clap::Arg;

use super::{compose_command, resolve_project, run_attached};
use crate::cli::parser::ParsedArgs;
use crate::cli::runner::CliCommand;
use crate::config::KiwiConfig;
use crate::instance::Instance;

pub struct ShellCommand;

impl CliCommand for ShellCommand {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn subcommand(&self) -> clap::Command {
        clap::Command::new("shell")
            .about("Open an interactive shell in a service container")
            .arg(
                Arg::new("shell")
                    .short('s')
                    .long("shell")
                    .value_name("SHELL")
                    .help("Shell to run instead of the configured one"),
            )
            .arg(
                Arg::new("project")
                    .value_name("PROJECT")
                    .required(true)
                    .help("Project the service belongs to"),
            )
            .arg(
                Arg::new("service")
                    .value_name("SERVICE")
                    .required(true)
                    .help("Service container to enter"),
            )
    }

    fn run(&self, config: &KiwiConfig, args: &ParsedArgs) -> Result<()> {
        let name = args
            .sub
            .get_one::<String>("project")
            .map(String::as_str)
            .unwrap_or_default();
        let service = args
            .sub
            .get_one::<String>("service")
            .map(String::as_str)
            .unwrap_or_default();

        let shell = match args.sub.get_one::<String>("shell") {
            Some(shell) => shell.clone(),
            None => config
                .shells
                .first()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No shell configured in the workspace"))?,
        };

        let instance = Instance::current()?;
        let project = resolve_project(&instance, name)?;

        let mut command = compose_command(config, project);
        command.args(["exec", service, &shell]);

        run_attached(command)
    }
}
