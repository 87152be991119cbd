//! Command-line grammar and one-shot argument parsing
//!
//! The grammar is assembled at startup: the top-level description and
//! epilog come from two fixed-name text files, command handlers register
//! their subcommand grammars, and the process argv is parsed exactly
//! once. Later lookups return the cached [`ParsedArgs`].
//!
//! Trailing arguments a subcommand does not declare are collected rather
//! than rejected; they end up in [`ParsedArgs::unknowns`] for the handler
//! to forward (typically to docker-compose).

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches};

/// Top-level description text, shipped next to the binary.
pub const KIWI_HELP_TEXT_NAME: &str = "kiwi_help.txt";

/// Epilog text listing the commands, shipped next to the binary.
pub const COMMAND_HELP_TEXT_NAME: &str = "command_help.txt";

/// Overrides the directory the help text files are read from.
pub const HELP_DIR_ENV: &str = "KIWI_HELP_DIR";

/// Result of the one-shot argv parse
#[derive(Debug)]
pub struct ParsedArgs {
    /// Number of `-v` occurrences
    pub verbosity: u8,

    /// Selected subcommand name
    pub command: String,

    /// Trailing arguments not declared by any grammar
    pub unknowns: Vec<String>,

    /// Matches of the selected subcommand
    pub sub: ArgMatches,
}

/// Parser state: the grammar plus the parse-once cache.
///
/// Unit tests construct this directly; the running process goes through
/// the [`Parser`] facade and its shared state.
pub struct ParserState {
    command: Mutex<clap::Command>,
    args: OnceLock<ParsedArgs>,
}

impl ParserState {
    /// Builds the grammar, reading description and epilog from the help
    /// text files. A missing file is fatal.
    pub fn new() -> Result<Self> {
        let dir = help_dir()?;

        let description = fs::read_to_string(dir.join(KIWI_HELP_TEXT_NAME)).with_context(|| {
            format!(
                "Failed to read help text: {}",
                dir.join(KIWI_HELP_TEXT_NAME).display()
            )
        })?;
        let epilog = fs::read_to_string(dir.join(COMMAND_HELP_TEXT_NAME)).with_context(|| {
            format!(
                "Failed to read help text: {}",
                dir.join(COMMAND_HELP_TEXT_NAME).display()
            )
        })?;

        Ok(Self::with_texts(description, epilog))
    }

    /// Builds the grammar from already-loaded help texts
    pub fn with_texts(description: String, epilog: String) -> Self {
        let command = clap::Command::new("kiwi")
            .version(env!("CARGO_PKG_VERSION"))
            .about(description)
            .after_help(epilog)
            .subcommand_required(true)
            .arg(
                Arg::new("verbosity")
                    .short('v')
                    .long("verbosity")
                    .action(ArgAction::Count)
                    .help("Increase log verbosity (repeatable)"),
            );

        Self {
            command: Mutex::new(command),
            args: OnceLock::new(),
        }
    }

    /// Registers a subcommand grammar.
    ///
    /// Must happen before the first parse. Every subcommand gains a
    /// hidden trailing positional that swallows undeclared arguments.
    pub fn register(&self, sub: clap::Command) {
        let sub = sub.arg(
            Arg::new("unknowns")
                .value_name("ARGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .hide(true),
        );

        let mut guard = self.command.lock().expect("parser grammar lock poisoned");
        let command = std::mem::replace(&mut *guard, clap::Command::new("kiwi"));
        *guard = command.subcommand(sub);
    }

    /// Parses the given argv on first call; every later call returns the
    /// same cached result, whatever argv is passed.
    pub fn get_args_from<I, T>(&self, argv: I) -> Result<&ParsedArgs, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Some(args) = self.args.get() {
            return Ok(args);
        }

        // the lock makes check-parse-store atomic
        let guard = self.command.lock().expect("parser grammar lock poisoned");
        if let Some(args) = self.args.get() {
            return Ok(args);
        }

        let matches = guard.clone().try_get_matches_from(argv)?;

        let Some((name, sub)) = matches.subcommand() else {
            // unreachable while the grammar requires a subcommand
            return Err(clap::Error::new(clap::error::ErrorKind::MissingSubcommand));
        };

        let unknowns = sub
            .get_many::<String>("unknowns")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let parsed = ParsedArgs {
            verbosity: matches.get_count("verbosity"),
            command: name.to_string(),
            unknowns,
            sub: sub.clone(),
        };

        self.args.set(parsed).ok();
        Ok(self.args.get().expect("parsed args cache just populated"))
    }
}

fn help_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(HELP_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let exe = env::current_exe().context("Failed to locate the kiwi executable")?;
    Ok(exe
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

static PARSER: OnceLock<ParserState> = OnceLock::new();

/// Facade over the process-wide parser state.
///
/// Construction is idempotent: once the shared state exists, further
/// handles simply point at it.
#[derive(Clone, Copy)]
pub struct Parser {
    state: &'static ParserState,
}

impl Parser {
    /// Returns a handle to the shared parser, building the grammar on
    /// first use
    pub fn shared() -> Result<Self> {
        if PARSER.get().is_none() {
            let state = ParserState::new()?;
            // a concurrent winner is fine, the state is equivalent
            let _ = PARSER.set(state);
        }

        Ok(Self {
            state: PARSER.get().expect("shared parser just initialized"),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_state(state: &'static ParserState) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &'static ParserState {
        self.state
    }

    /// Registers a subcommand grammar into the shared state
    pub fn register(&self, sub: clap::Command) {
        self.state.register(sub);
    }

    /// Parses the process argv once and returns the cached result.
    ///
    /// A usage error (missing subcommand, bad global flag) prints clap's
    /// message and terminates the process.
    pub fn get_args(&self) -> &'static ParsedArgs {
        match self.state.get_args_from(env::args_os()) {
            Ok(args) => args,
            Err(err) => err.exit(),
        }
    }
}
