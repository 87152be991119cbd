//! Sub-project discovery
//!
//! A sub-project is a direct subdirectory of the workspace that contains
//! a `docker-compose.yml`. Directories whose name carries the `.down`
//! suffix are discovered but marked disabled.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File marking a subdirectory as a project.
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Directory name suffix marking a project as disabled.
pub const DOWN_SUFFIX: &str = ".down";

/// A discovered sub-project
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    directory: PathBuf,
    enabled: bool,
}

impl Project {
    /// Project name (directory name without the `.down` suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory containing the project's compose file
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The sub-projects of a workspace, scanned once at construction and
/// sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Projects {
    projects: Vec<Project>,
}

impl Projects {
    /// Scans a directory for sub-projects
    pub fn from_dir(directory: &Path) -> Result<Self> {
        let entries = fs::read_dir(directory)
            .with_context(|| format!("Failed to scan directory: {}", directory.display()))?;

        let mut projects = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to scan directory: {}", directory.display()))?;
            let path = entry.path();

            if !path.is_dir() || !path.join(COMPOSE_FILE_NAME).is_file() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let (name, enabled) = match dir_name.strip_suffix(DOWN_SUFFIX) {
                Some(stem) => (stem.to_string(), false),
                None => (dir_name, true),
            };

            projects.push(Project {
                name,
                directory: path,
                enabled,
            });
        }

        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { projects })
    }

    /// Looks up a project by name
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
