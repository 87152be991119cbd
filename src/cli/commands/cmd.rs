//! `kiwi cmd` - forward a docker-compose command to a project

use anyhow::Result;
use clap::Arg;

use super::{compose_command, resolve_project, run_attached};
use crate::cli::parser::ParsedArgs;
use crate::cli::runner::CliCommand;
use crate::config::KiwiConfig;
use crate::instance::Instance;

pub struct CmdCommand;

impl CliCommand for CmdCommand {
    fn name(&self) -> &'static str {
        "cmd"
    }

    fn subcommand(&self) -> clap::Command {
        clap::Command::new("cmd")
            .about("Run a docker-compose command in a project")
            .arg(
                Arg::new("project")
                    .value_name("PROJECT")
                    .required(true)
                    .help("Project to run the command in"),
            )
    }

    fn run(&self, config: &KiwiConfig, args: &ParsedArgs) -> Result<()> {
        let name = args
            .sub
            .get_one::<String>("project")
            .map(String::as_str)
            .unwrap_or_default();

        if args.unknowns.is_empty() {
            anyhow::bail!("No docker-compose command given, try 'kiwi cmd {} ps'", name);
        }

        let instance = Instance::current()?;
        let project = resolve_project(&instance, name)?;

        let mut command = compose_command(config, project);
        command.args(&args.unknowns);

        run_attached(command)
    }
}
