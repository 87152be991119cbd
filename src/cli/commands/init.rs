//! `kiwi init` - write a fresh `kiwi.yml`

use std::fs;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction};

use crate::cli::parser::ParsedArgs;
use crate::cli::runner::CliCommand;
use crate::config::{KiwiConfig, KIWI_CONF_NAME};
use crate::instance::Instance;

pub struct InitCommand;

impl CliCommand for InitCommand {
    fn name(&self) -> &'static str {
        "init"
    }

    fn subcommand(&self) -> clap::Command {
        clap::Command::new("init")
            .about("Initialize a kiwi workspace in a directory")
            .arg(
                Arg::new("force")
                    .short('f')
                    .long("force")
                    .action(ArgAction::SetTrue)
                    .help("Overwrite an existing configuration"),
            )
            .arg(
                Arg::new("directory")
                    .value_name("DIRECTORY")
                    .default_value(".")
                    .help("Directory to initialize"),
            )
    }

    fn run(&self, _config: &KiwiConfig, args: &ParsedArgs) -> Result<()> {
        let directory = args
            .sub
            .get_one::<String>("directory")
            .map(String::as_str)
            .unwrap_or(".");
        let force = args.sub.get_flag("force");

        let instance = Instance::new(directory)?;
        if instance.exists() && !force {
            anyhow::bail!(
                "'{}' is already a kiwi workspace, use --force to overwrite {}",
                instance.directory().display(),
                KIWI_CONF_NAME
            );
        }

        let config = KiwiConfig::default();
        let path = instance.directory().join(KIWI_CONF_NAME);
        fs::write(&path, config.to_yaml()?)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        println!(
            "Initialized kiwi workspace at {}",
            instance.directory().display()
        );
        Ok(())
    }
}
