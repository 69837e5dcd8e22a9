//! Configuration file discovery and loading.
//!
//! This module finds configuration files and loads them in the correct
//! priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::PacksmithConfig;
use crate::error::{PacksmithError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".packsmith";

/// File name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.packsmith/config.yml`)
/// 2. Project config (`.packsmith/config.yml`), or the `--config` file
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.packsmith/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .packsmith/config.yml
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self::discover_with_home(project_root, dirs::home_dir().as_deref())
    }

    /// Discover config files using an explicit home directory.
    pub fn discover_with_home(project_root: &Path, home: Option<&Path>) -> Self {
        Self {
            user_global: home.and_then(Self::find_in),
            project: Self::find_in(project_root),
        }
    }

    /// Replace the project config with an explicit file.
    pub fn with_override(mut self, path: &Path) -> Self {
        self.project = Some(path.to_path_buf());
        self
    }

    fn find_in(dir: &Path) -> Option<PathBuf> {
        let path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Returns all config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for, in each directory:
/// 1. `.packsmith` directory
/// 2. `composer.json` file
/// 3. `.git` directory
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir()
            || current.join("composer.json").is_file()
            || current.join(".git").exists()
        {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PacksmithConfig> {
    if content.trim().is_empty() {
        return Ok(PacksmithConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PacksmithError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PacksmithConfig> {
    let content = read(path)?;
    parse_config(&content, path)
}

/// Load a config file as a raw YAML value for merging.
///
/// An empty file loads as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read(path)?;
    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| PacksmithError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match value {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
        other => other,
    })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PacksmithError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PacksmithError::Io(e)
        }
    })
}

/// Load and merge the config files in `paths`.
///
/// With no files at all the defaults are returned.
pub fn load_from_paths(paths: &ConfigPaths) -> Result<PacksmithConfig> {
    let existing = paths.all_existing();
    let Some(last) = existing.last().map(|p| p.to_path_buf()) else {
        return Ok(PacksmithConfig::default());
    };

    let mut configs = Vec::with_capacity(existing.len());
    for path in existing {
        tracing::debug!("Loading config from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| PacksmithError::ConfigParseError {
        path: last,
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load and merge all config files for a project.
pub fn load_merged_config(project_root: &Path) -> Result<PacksmithConfig> {
    load_from_paths(&ConfigPaths::discover(project_root))
}

/// Load config with an optional explicit file.
///
/// The explicit file takes the place of the project config; the user
/// global config is still merged underneath it.
pub fn load_config(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<PacksmithConfig> {
    let paths = ConfigPaths::discover(project_root);
    match config_override {
        Some(path) => {
            if !path.exists() {
                return Err(PacksmithError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            load_from_paths(&paths.with_override(path))
        }
        None => load_from_paths(&paths),
    }
}
