//! Placeholder templating for fetched skeletons.
//!
//! This module rewrites a skeleton tree in place:
//! - [`rename`] applies the skeleton's own rename manifest
//! - [`placeholder`] holds the ordered token/value pairs
//! - [`fill`] substitutes tokens in file names and file contents
//!
//! Only literal tokens are supported; there are no conditionals or loops.
//!
//! # Example
//!
//! ```
//! use packsmith::template::{fill, PlaceholderSet};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(":lc:package.txt"), "Hello :uc:package").unwrap();
//!
//! let mut builder = PlaceholderSet::builder();
//! builder.replace(&[":uc:package", ":lc:package"], &["Widget", "widget"]).unwrap();
//! fill(temp.path(), &builder.build()).unwrap();
//!
//! let text = fs::read_to_string(temp.path().join("widget.txt")).unwrap();
//! assert_eq!(text, "Hello Widget");
//! ```

pub mod fill;
pub mod placeholder;
pub mod rename;

pub use fill::{fill, FillReport};
pub use placeholder::{PlaceholderSet, PlaceholderSetBuilder};
pub use rename::{apply_manifest, RenameManifest, RenameRule, MANIFEST_FILE};
