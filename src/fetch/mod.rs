//! Fetching package sources.
//!
//! - [`http`] downloads zip archives over HTTP(S)
//! - [`archive`] extracts them
//! - [`git`] clones repositories with the `git` binary
//! - [`index`] looks up canonical repository URLs in a package index

pub mod archive;
pub mod git;
pub mod http;
pub mod index;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use archive::extract_zip;
pub use git::GitTransport;
pub use http::{build_client, HttpArchiveTransport};
pub use index::PackageIndex;

/// Downloads and unpacks archives.
///
/// Implemented by [`HttpArchiveTransport`]; tests substitute their own.
pub trait ArchiveTransport {
    /// Download `url` into `dest_dir` and return the archive path.
    fn fetch_archive(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;

    /// Unpack `archive` into `dest` and return the content root.
    ///
    /// The content root is the single top-level directory when the archive
    /// has exactly one, else `dest` itself.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<PathBuf>;
}
