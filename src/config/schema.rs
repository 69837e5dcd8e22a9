//! Configuration schema definitions for packsmith.
//!
//! This module contains the struct definitions that map to
//! `.packsmith/config.yml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default skeleton every new package starts from.
pub const DEFAULT_SKELETON: &str = "https://github.com/Jeroen-G/packager-skeleton";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacksmithConfig {
    /// Author details substituted into new packages
    pub author: AuthorConfig,

    /// License identifier for new packages
    #[serde(default = "default_license")]
    pub license: String,

    /// Skeleton to scaffold from
    pub skeleton: SkeletonConfig,

    /// Project-relative locations
    pub paths: PathsConfig,

    /// Custom hosts mapped to URL templates
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub repositories: BTreeMap<String, String>,

    /// Commands run after registering or before removing a package
    pub install: InstallConfig,

    /// Package index used to resolve `vendor/name` shorthands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_index: Option<String>,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for PacksmithConfig {
    fn default() -> Self {
        Self {
            author: AuthorConfig::default(),
            license: default_license(),
            skeleton: SkeletonConfig::default(),
            paths: PathsConfig::default(),
            repositories: BTreeMap::new(),
            install: InstallConfig::default(),
            package_index: None,
            timeout: default_timeout(),
        }
    }
}

/// Author details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
    pub homepage: String,
}

/// Skeleton source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    /// Any repository reference, or a direct `.zip` URL
    #[serde(default = "default_skeleton_url")]
    pub url: String,

    /// Branch to download
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            url: default_skeleton_url(),
            branch: default_branch(),
        }
    }
}

/// Project-relative paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `<vendor>/<name>` package directories
    #[serde(default = "default_packages_dir")]
    pub packages: PathBuf,

    /// Dependency manifest file
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            packages: default_packages_dir(),
            manifest: default_manifest(),
        }
    }
}

/// Install and uninstall commands.
///
/// Both accept `:vendor` and `:name` tokens. Neither is set by default, so
/// registering a package only edits the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uninstall: Option<String>,
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_skeleton_url() -> String {
    DEFAULT_SKELETON.to_string()
}

fn default_branch() -> String {
    crate::repository::DEFAULT_BRANCH.to_string()
}

fn default_packages_dir() -> PathBuf {
    PathBuf::from("packages")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("composer.json")
}

fn default_timeout() -> u64 {
    30
}
