//! Packsmith - scaffold and manage local packages.
//!
//! Packsmith creates packages from a skeleton repository, downloads or
//! clones existing ones into a project's packages directory, and keeps the
//! project's dependency manifest in step.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and merging
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Archive download, extraction, git clone and index lookup
//! - [`manifest`] - Dependency manifest editing and install commands
//! - [`package`] - Package names and on-disk locations
//! - [`repository`] - Repository references and archive URL resolution
//! - [`scaffold`] - Package creation, download, removal and listing
//! - [`template`] - Placeholder substitution and rename manifests
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use packsmith::repository::Resolver;
//!
//! let resolver = Resolver::default();
//! let url = resolver.resolve("git@gitlab.com:acme/widget.git", Some("dev")).unwrap();
//! assert_eq!(url, "https://gitlab.com/acme/widget/-/archive/dev/widget-dev.zip");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod package;
pub mod repository;
pub mod scaffold;
pub mod template;
pub mod ui;

pub use error::{PacksmithError, Result};
