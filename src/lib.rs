//! kiwi - manage docker-compose projects in a shared workspace
//!
//! A workspace is a directory holding a `kiwi.yml` plus one subdirectory
//! per docker-compose project. The crate resolves such a directory into
//! an [`Instance`] (configuration + discovered projects) and dispatches
//! one of the fixed subcommands: `init`, `show`, `logs`, `cmd`, `shell`.

pub mod cli;
pub mod config;
pub mod instance;
pub mod projects;

pub use config::{KiwiConfig, LoadedConfig, KIWI_CONF_NAME};
pub use instance::Instance;
pub use projects::{Project, Projects};
