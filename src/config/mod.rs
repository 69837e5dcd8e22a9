//! Configuration loading for packsmith.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use packsmith::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".packsmith");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(config_dir.join("config.yml"), "license: Apache-2.0").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.license, "Apache-2.0");
//! ```
//!
//! # Configuration File Locations
//!
//! Later files override earlier ones:
//! 1. User global config (`~/.packsmith/config.yml`)
//! 2. Project config (`.packsmith/config.yml`), or `--config <path>`

pub mod loader;
pub mod merger;
pub mod schema;

pub use schema::{
    AuthorConfig, InstallConfig, PacksmithConfig, PathsConfig, SkeletonConfig, DEFAULT_SKELETON,
};

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_from_paths,
    load_merged_config, parse_config, ConfigPaths, CONFIG_DIR, CONFIG_FILE,
};

pub use merger::{deep_merge, merge_configs};
