//! Command registry and dispatch
//!
//! All handlers are instantiated once per process, in declaration order,
//! and their grammars are registered with the parser before the first
//! parse. Dispatch is a linear scan over handler names; an unknown name
//! is reported and answered with `false`, never a panic.

use std::sync::OnceLock;

use anyhow::Result;

use crate::cli::commands;
use crate::cli::parser::{ParsedArgs, Parser};
use crate::config::{KiwiConfig, LoadedConfig};

/// A subcommand handler.
///
/// Handlers expose their name for dispatch matching, contribute their
/// grammar at startup and run against the resolved configuration.
pub trait CliCommand: Send + Sync {
    /// Stable identifier used for dispatch matching
    fn name(&self) -> &'static str;

    /// Grammar registered into the parser at startup
    fn subcommand(&self) -> clap::Command;

    /// Executes the handler. I/O (file writes, subprocesses, interactive
    /// shells) is entirely the handler's business.
    fn run(&self, config: &KiwiConfig, args: &ParsedArgs) -> Result<()>;
}

static RUNNER: OnceLock<Runner> = OnceLock::new();

/// Ordered registry of instantiated command handlers
pub struct Runner {
    commands: Vec<Box<dyn CliCommand>>,
}

impl Runner {
    /// Builds a registry holding every known handler
    pub fn new() -> Self {
        Self {
            commands: commands::all(),
        }
    }

    /// Builds a registry from an explicit handler list
    pub fn with_handlers(commands: Vec<Box<dyn CliCommand>>) -> Self {
        Self { commands }
    }

    /// Returns the process-wide runner, instantiating the handlers and
    /// registering their grammars exactly once
    pub fn shared(parser: &Parser) -> &'static Self {
        RUNNER.get_or_init(|| {
            let runner = Self::new();
            for command in &runner.commands {
                parser.register(command.subcommand());
            }
            runner
        })
    }

    /// Registered handler names, in declaration order
    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Fetches the parsed arguments and default-directory configuration,
    /// then dispatches
    pub fn run(&self, parser: &Parser) -> Result<bool> {
        let args = parser.get_args();
        let config = LoadedConfig::get_default()?;
        self.dispatch(&config, args)
    }

    /// Invokes the handler matching the parsed command name.
    ///
    /// Returns `Ok(true)` when a handler ran, `Ok(false)` when the name
    /// matched nothing. The grammar already rejects unknown subcommands,
    /// so a miss means grammar and registry disagree.
    pub fn dispatch(&self, config: &KiwiConfig, args: &ParsedArgs) -> Result<bool> {
        for command in &self.commands {
            if command.name() == args.command {
                tracing::debug!("Running '{}' with args: {:?}", command.name(), args);
                command.run(config, args)?;
                return Ok(true);
            }
        }

        tracing::error!("kiwi command '{}' unknown", args.command);
        Ok(false)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}
