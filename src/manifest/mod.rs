//! Registering packages with the project's dependency manifest.
//!
//! [`JsonManifest`] edits a composer-style `composer.json`; [`Installer`]
//! runs the configured install and uninstall commands afterwards.

pub mod installer;
pub mod json;

pub use installer::Installer;
pub use json::JsonManifest;

use crate::error::Result;

/// A dependency manifest that can track local path packages.
pub trait DependencyManifest {
    /// Register `vendor/name` as a path package at `path` (relative to the
    /// project root). Adding a registered package again is a no-op.
    fn add_package(&mut self, vendor: &str, name: &str, path: &str) -> Result<()>;

    /// Unregister `vendor/name`. Removing an unknown package is a no-op.
    fn remove_package(&mut self, vendor: &str, name: &str) -> Result<()>;

    /// Check if `vendor/name` is registered.
    fn contains(&self, vendor: &str, name: &str) -> Result<bool>;
}
