//! Install and uninstall commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PacksmithError, Result};
use crate::template::PlaceholderSet;

/// Runs the configured install/uninstall commands in the project root.
///
/// Commands may contain `:vendor` and `:name`, substituted before running.
#[derive(Debug, Clone, Default)]
pub struct Installer {
    project_root: PathBuf,
    install: Option<String>,
    uninstall: Option<String>,
}

impl Installer {
    pub fn new(
        project_root: impl Into<PathBuf>,
        install: Option<String>,
        uninstall: Option<String>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            install,
            uninstall,
        }
    }

    /// The install command for `vendor/name`, if one is configured.
    pub fn install_command(&self, vendor: &str, name: &str) -> Option<String> {
        render(self.install.as_deref()?, vendor, name)
    }

    /// The uninstall command for `vendor/name`, if one is configured.
    pub fn uninstall_command(&self, vendor: &str, name: &str) -> Option<String> {
        render(self.uninstall.as_deref()?, vendor, name)
    }

    /// Run the install command. Returns `false` when none is configured.
    pub fn install(&self, vendor: &str, name: &str) -> Result<bool> {
        match self.install_command(vendor, name) {
            Some(command) => run(&command, &self.project_root, vendor, name).map(|_| true),
            None => Ok(false),
        }
    }

    /// Run the uninstall command. Returns `false` when none is configured.
    pub fn uninstall(&self, vendor: &str, name: &str) -> Result<bool> {
        match self.uninstall_command(vendor, name) {
            Some(command) => run(&command, &self.project_root, vendor, name).map(|_| true),
            None => Ok(false),
        }
    }
}

fn render(template: &str, vendor: &str, name: &str) -> Option<String> {
    if template.trim().is_empty() {
        return None;
    }
    let mut builder = PlaceholderSet::builder();
    builder.pair(":vendor", vendor).pair(":name", name);
    Some(builder.build().apply(template))
}

fn shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

fn run(command: &str, cwd: &Path, vendor: &str, name: &str) -> Result<()> {
    let install_error = |message: String| PacksmithError::Install {
        package: format!("{}/{}", vendor, name),
        message,
    };

    let (program, flag) = shell();
    tracing::debug!("Running '{}' in {}", command, cwd.display());
    let output = Command::new(program)
        .args([flag, command])
        .current_dir(cwd)
        .output()
        .map_err(|e| install_error(format!("failed to run '{}': {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(install_error(format!(
            "'{}' exited with {}: {}",
            command,
            code,
            stderr.trim()
        )));
    }

    Ok(())
}
