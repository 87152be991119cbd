//! Workspace instances
//!
//! An [`Instance`] is the resolved view of a target directory: its
//! absolute path, its (cached) configuration and its discovered
//! sub-projects. It is read-only after construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{resolve_dir, KiwiConfig, LoadedConfig, KIWI_CONF_NAME};
use crate::projects::Projects;

/// Resolved view of a workspace directory
pub struct Instance {
    directory: PathBuf,
    config: Arc<KiwiConfig>,
    projects: Projects,
}

impl Instance {
    /// Creates an instance for the given directory.
    ///
    /// A path that is not a directory is a recovered condition: a warning
    /// is logged and the process current directory is used instead.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self> {
        let mut directory = directory.as_ref().to_path_buf();

        if !directory.is_dir() {
            tracing::warn!(
                "Invalid directory in instance creation: '{}'",
                directory.display()
            );
            directory = std::env::current_dir()
                .context("Failed to determine the current directory")?;
        }

        let directory = resolve_dir(&directory);
        let config = LoadedConfig::get(&directory)?;
        let projects = Projects::from_dir(&directory)?;

        Ok(Self {
            directory,
            config,
            projects,
        })
    }

    /// Creates an instance for the process current directory
    pub fn current() -> Result<Self> {
        Self::new(".")
    }

    /// Returns true iff the directory holds a `kiwi.yml` as a direct child
    pub fn exists(&self) -> bool {
        self.directory.join(KIWI_CONF_NAME).is_file()
    }

    /// Absolute workspace directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &KiwiConfig {
        &self.config
    }

    pub fn projects(&self) -> &Projects {
        &self.projects
    }
}
