//! `kiwi logs` - show logs of a project

use anyhow::Result;
use clap::{Arg, ArgAction};

use super::{compose_command, resolve_project, run_attached};
use crate::cli::parser::ParsedArgs;
use crate::cli::runner::CliCommand;
use crate::config::KiwiConfig;
use crate::instance::Instance;

pub struct LogsCommand;

impl CliCommand for LogsCommand {
    fn name(&self) -> &'static str {
        "logs"
    }

    fn subcommand(&self) -> clap::Command {
        clap::Command::new("logs")
            .about("Show logs of a project")
            .arg(
                Arg::new("follow")
                    .short('f')
                    .long("follow")
                    .action(ArgAction::SetTrue)
                    .help("Keep following the log output"),
            )
            .arg(
                Arg::new("project")
                    .value_name("PROJECT")
                    .required(true)
                    .help("Project to show logs for"),
            )
    }

    fn run(&self, config: &KiwiConfig, args: &ParsedArgs) -> Result<()> {
        let name = args
            .sub
            .get_one::<String>("project")
            .map(String::as_str)
            .unwrap_or_default();
        let follow = args.sub.get_flag("follow");

        let instance = Instance::current()?;
        let project = resolve_project(&instance, name)?;

        let mut command = compose_command(config, project);
        command.args(["logs", "-t", "--tail=100"]);
        if follow {
            command.arg("-f");
        }

        run_attached(command)
    }
}
