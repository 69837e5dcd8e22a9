//! Package scaffolding.
//!
//! [`Scaffolder`] drives every command that touches packages on disk:
//! - [`Scaffolder::create`] builds a new package from the skeleton
//! - [`Scaffolder::download`] and [`Scaffolder::clone_package`] bring in an
//!   existing package
//! - [`Scaffolder::remove`] and [`Scaffolder::list`] manage what is there
//!
//! The collaborators (archive transport, git, dependency manifest,
//! installer) are held as values so tests can swap them out.

mod create;
mod existing;
mod remove;

pub use create::{CreateRequest, CREATE_STEPS};
pub use existing::{FetchRequest, EXISTING_STEPS};
pub use remove::PackageStatus;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::PacksmithConfig;
use crate::error::Result;
use crate::fetch::{ArchiveTransport, GitTransport, HttpArchiveTransport, PackageIndex};
use crate::manifest::{DependencyManifest, Installer, JsonManifest};
use crate::package::PackageLocation;
use crate::repository::{HostRegistry, Resolver};
use crate::ui::UserInterface;

/// Orchestrates package creation, download, removal and listing.
pub struct Scaffolder {
    project_root: PathBuf,
    config: PacksmithConfig,
    resolver: Resolver,
    transport: Box<dyn ArchiveTransport>,
    git: GitTransport,
    index: Option<PackageIndex>,
    manifest: Box<dyn DependencyManifest>,
    installer: Installer,
}

impl Scaffolder {
    /// Build a scaffolder for `project_root` with the production
    /// collaborators described by `config`.
    pub fn new(project_root: impl Into<PathBuf>, config: PacksmithConfig) -> Result<Self> {
        let project_root = project_root.into();
        let timeout = Duration::from_secs(config.timeout);

        let resolver = Resolver::new(HostRegistry::with_custom(&config.repositories))
            .with_default_branch(config.skeleton.branch.clone());

        let index = config
            .package_index
            .as_deref()
            .map(|url| PackageIndex::with_timeout(url, timeout))
            .transpose()?;

        let manifest = JsonManifest::new(project_root.join(&config.paths.manifest));
        let installer = Installer::new(
            project_root.clone(),
            config.install.command.clone(),
            config.install.uninstall.clone(),
        );

        Ok(Self {
            transport: Box::new(HttpArchiveTransport::with_timeout(timeout)?),
            git: GitTransport::new(),
            index,
            manifest: Box::new(manifest),
            installer,
            resolver,
            config,
            project_root,
        })
    }

    /// Replace the archive transport.
    pub fn with_transport(mut self, transport: Box<dyn ArchiveTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the git transport.
    pub fn with_git(mut self, git: GitTransport) -> Self {
        self.git = git;
        self
    }

    /// Replace the dependency manifest.
    pub fn with_manifest(mut self, manifest: Box<dyn DependencyManifest>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &PacksmithConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Absolute directory holding every vendor directory.
    pub fn packages_root(&self) -> PathBuf {
        self.project_root.join(&self.config.paths.packages)
    }

    /// Where `vendor/name` lives.
    pub fn location(&self, vendor: &str, name: &str) -> PackageLocation {
        PackageLocation::new(self.packages_root(), vendor, name)
    }

    /// Download `url`, unpack it and move its content root to the package
    /// directory. The staging directory is always cleaned up.
    fn unpack_into(&self, url: &str, location: &PackageLocation) -> Result<()> {
        let staging = location
            .vendor_path()
            .join(format!(".{}.partial", location.name()));
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        let result = self.unpack_via(url, &staging, location);

        if staging.exists() {
            if let Err(e) = fs::remove_dir_all(&staging) {
                tracing::warn!("Failed to clean up {}: {}", staging.display(), e);
            }
        }
        result
    }

    fn unpack_via(&self, url: &str, staging: &Path, location: &PackageLocation) -> Result<()> {
        let archive = self.transport.fetch_archive(url, staging)?;
        let root = self.transport.extract(&archive, &staging.join("contents"))?;
        tracing::debug!(
            "Moving {} to {}",
            root.display(),
            location.package_path().display()
        );
        fs::rename(&root, location.package_path())?;
        Ok(())
    }

    /// Add the package to the dependency manifest and run the install
    /// command. A failed install takes the manifest entry back out.
    fn register(&mut self, location: &PackageLocation, ui: &mut dyn UserInterface) -> Result<()> {
        let (vendor, name) = (location.vendor(), location.name());
        let relative = location.relative_to(&self.project_root);
        self.manifest.add_package(vendor, name, &relative)?;

        let Some(command) = self.installer.install_command(vendor, name) else {
            return Ok(());
        };

        let mut spinner = ui.start_spinner(&format!("Running {}", command));
        match self.installer.install(vendor, name) {
            Ok(_) => {
                spinner.finish_success(&format!("Installed {}/{}", vendor, name));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&format!("Failed to install {}/{}", vendor, name));
                if let Err(rollback) = self.manifest.remove_package(vendor, name) {
                    tracing::warn!("Failed to roll back manifest entry: {}", rollback);
                }
                Err(e)
            }
        }
    }
}
