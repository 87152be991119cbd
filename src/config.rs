//! Configuration handling for kiwi workspaces
//!
//! A workspace is marked by a `kiwi.yml` file in its root directory.
//! Loaded configurations are cached process-wide, keyed by the resolved
//! directory, so each directory is read and parsed at most once.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved file name marking a directory as a kiwi workspace.
pub const KIWI_CONF_NAME: &str = "kiwi.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Workspace configuration, as stored in `kiwi.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KiwiConfig {
    /// Version of kiwi that created this workspace
    pub version: String,

    /// Shell candidates for `kiwi shell`, in order of preference
    pub shells: Vec<String>,

    /// Extra environment passed to every docker-compose invocation
    pub environment: BTreeMap<String, String>,
}

impl Default for KiwiConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            shells: vec!["/bin/bash".to_string()],
            environment: BTreeMap::new(),
        }
    }
}

impl KiwiConfig {
    /// Serializes the configuration to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration")
    }
}

/// Process-wide configuration store.
///
/// The first `get` for a directory performs the load; later calls return
/// the cached value without touching the file again.
pub struct LoadedConfig;

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<KiwiConfig>>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<KiwiConfig>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

impl LoadedConfig {
    /// Returns the configuration for the given directory, loading it on
    /// first use and from the cache afterwards.
    pub fn get(directory: impl AsRef<Path>) -> Result<Arc<KiwiConfig>> {
        let key = resolve_dir(directory.as_ref());

        let mut cache = cache().lock().expect("config cache lock poisoned");
        if let Some(config) = cache.get(&key) {
            return Ok(Arc::clone(config));
        }

        let config = Arc::new(Self::load(&key)?);
        cache.insert(key, Arc::clone(&config));
        Ok(config)
    }

    /// Returns the configuration for the process current directory
    pub fn get_default() -> Result<Arc<KiwiConfig>> {
        let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
        Self::get(cwd)
    }

    /// Drops all cached configurations.
    ///
    /// Needed by test harnesses and long-lived processes that want a
    /// fresh read; there is no finer-grained invalidation.
    pub fn reset() {
        cache().lock().expect("config cache lock poisoned").clear();
    }

    fn load(directory: &Path) -> Result<KiwiConfig> {
        let path = directory.join(KIWI_CONF_NAME);
        if !path.is_file() {
            return Ok(KiwiConfig::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Resolves a path to an absolute directory key.
///
/// Canonicalizes when possible so that different spellings of the same
/// directory share one cache entry.
pub(crate) fn resolve_dir(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };

    absolute.canonicalize().unwrap_or(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = KiwiConfig::default();

        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.shells, vec!["/bin/bash".to_string()]);
        assert!(config.environment.is_empty());
    }

    #[test]
    fn parse_config() {
        let yaml = r#"
version: "0.2"
shells:
  - /bin/zsh
environment:
  COMPOSE_PROJECT_NAME: kiwi
"#;

        let config: KiwiConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "0.2");
        assert_eq!(config.shells, vec!["/bin/zsh".to_string()]);
        assert_eq!(
            config.environment.get("COMPOSE_PROJECT_NAME"),
            Some(&"kiwi".to_string())
        );
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = TempDir::new().unwrap();

        let config = LoadedConfig::get(dir.path()).unwrap();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.shells, vec!["/bin/bash".to_string()]);
    }

    #[test]
    fn invalid_yaml_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(KIWI_CONF_NAME), "shells: 5\n").unwrap();

        assert!(LoadedConfig::get(dir.path()).is_err());
    }

    #[test]
    fn cache_returns_same_arc_until_reset() {
        let dir = TempDir::new().unwrap();
        let conf_path = dir.path().join(KIWI_CONF_NAME);
        fs::write(&conf_path, "version: \"first\"\n").unwrap();

        let first = LoadedConfig::get(dir.path()).unwrap();
        let second = LoadedConfig::get(dir.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.version, "first");

        // the file changes, but the cache answers until reset
        fs::write(&conf_path, "version: \"second\"\n").unwrap();
        let cached = LoadedConfig::get(dir.path()).unwrap();
        assert_eq!(cached.version, "first");

        LoadedConfig::reset();
        let fresh = LoadedConfig::get(dir.path()).unwrap();
        assert_eq!(fresh.version, "second");
    }

    #[test]
    fn resolve_dir_is_absolute() {
        let resolved = resolve_dir(Path::new("."));
        assert!(resolved.is_absolute());
    }
}
