//! # Command-Line Interface
//!
//! Argument parsing and subcommand dispatch.
//!
//! ## Flow
//!
//! 1. [`Parser::shared`] builds the grammar once (help texts, `-v` flag,
//!    required subcommand selector).
//! 2. [`Runner::shared`] instantiates every handler once and registers
//!    their grammars.
//! 3. The process argv is parsed exactly once, logging is initialized
//!    from the `-v` count, and the runner dispatches by command name.
//!
//! ## Entry Point
//!
//! Call [`run()`]; it returns `Ok(true)` when a command was dispatched,
//! `Ok(false)` for the defensive unknown-command case, and `Err` for
//! everything the startup path or a handler failed on.

pub mod commands;
mod parser;
mod runner;

pub use parser::{ParsedArgs, Parser, ParserState};
pub use parser::{COMMAND_HELP_TEXT_NAME, HELP_DIR_ENV, KIWI_HELP_TEXT_NAME};
pub use runner::{CliCommand, Runner};

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the tracing subscriber.
///
/// The `-v` count picks the level; `RUST_LOG` wins when no `-v` is given.
fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kiwi_scp=warn")),
        1 => EnvFilter::new("kiwi_scp=info"),
        _ => EnvFilter::new("kiwi_scp=debug"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

/// Main entry point: parse once, then dispatch once
pub fn run() -> Result<bool> {
    let parser = Parser::shared()?;
    let runner = Runner::shared(&parser);

    let args = parser.get_args();
    init_tracing(args.verbosity);

    runner.run(&parser)
}
