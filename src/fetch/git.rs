//! Git clone transport.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PacksmithError, Result};

/// Clones repositories with the `git` binary.
#[derive(Debug, Clone)]
pub struct GitTransport {
    program: String,
}

impl GitTransport {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Shallow-clone `url` into `dest`, optionally at `branch`.
    ///
    /// `dest` must not exist yet; its parent is created.
    pub fn clone_repo(&self, url: &str, dest: &Path, branch: Option<&str>) -> Result<PathBuf> {
        let fetch_error = |message: String| PacksmithError::Fetch {
            url: url.to_string(),
            message,
        };

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(["clone", "--depth", "1"]);
        if let Some(branch) = branch {
            cmd.args(["--branch", branch]);
        }
        cmd.arg(url).arg(dest);

        tracing::debug!("Cloning {} into {}", url, dest.display());
        let output = cmd
            .output()
            .map_err(|e| fetch_error(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(fetch_error(format!(
                "git clone failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(dest.to_path_buf())
    }
}

impl Default for GitTransport {
    fn default() -> Self {
        Self::new()
    }
}
