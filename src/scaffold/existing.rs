//! `get` and `git`: bring in an existing package.

use std::fs;

use super::Scaffolder;
use crate::error::{PacksmithError, Result};
use crate::package::{validate_name, PackageLocation};
use crate::repository::RepositoryReference;
use crate::ui::UserInterface;

/// Progress steps shown while downloading or cloning a package.
pub const EXISTING_STEPS: usize = 4;

/// Arguments for [`Scaffolder::download`] and [`Scaffolder::clone_package`].
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    /// Repository reference, clone URL or direct `.zip` URL.
    pub url: String,
    /// Defaults to the vendor of the parsed reference.
    pub vendor: Option<String>,
    /// Defaults to the name of the parsed reference.
    pub name: Option<String>,
    pub branch: Option<String>,
}

/// How the package content is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Archive,
    Clone,
}

impl Scaffolder {
    /// Download the package archive for `request.url` and register it.
    pub fn download(
        &mut self,
        request: &FetchRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<PackageLocation> {
        let location = self.fetch_existing(request, Method::Archive, ui)?;
        ui.success("Package downloaded successfully!");
        Ok(location)
    }

    /// Clone the package repository for `request.url` and register it.
    pub fn clone_package(
        &mut self,
        request: &FetchRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<PackageLocation> {
        let location = self.fetch_existing(request, Method::Clone, ui)?;
        ui.success("Package cloned successfully!");
        Ok(location)
    }

    fn fetch_existing(
        &mut self,
        request: &FetchRequest,
        method: Method,
        ui: &mut dyn UserInterface,
    ) -> Result<PackageLocation> {
        ui.show_progress(1, EXISTING_STEPS);
        request.validate()?;
        let raw = match &self.index {
            Some(index) => index.canonicalize(request.url.trim()),
            None => request.url.trim().to_string(),
        };
        let is_zip = method == Method::Archive && raw.ends_with(".zip");
        let reference = self.resolver.parse(&raw);

        // a direct archive URL says nothing about vendor and name
        let derived = if is_zip { None } else { reference.as_ref().ok() };
        let (vendor, name) = package_identity(request, derived)
            .ok_or_else(|| PacksmithError::InvalidReference {
                reference: raw.clone(),
            })?;
        let location = self.location(&vendor, &name);
        location.ensure_vacant()?;
        ui.show_header(&format!("Adding {}/{}", vendor, name));

        ui.show_progress(2, EXISTING_STEPS);
        fs::create_dir_all(location.vendor_path())?;

        ui.show_progress(3, EXISTING_STEPS);
        let mut spinner = ui.start_spinner(&format!("Fetching {}...", raw));
        let fetched = match method {
            Method::Archive => {
                let url = if is_zip {
                    Ok(raw.clone())
                } else {
                    reference.and_then(|r| self.resolver.render(&r, request.branch.as_deref()))
                };
                url.and_then(|url| {
                    tracing::debug!("Package archive: {}", url);
                    self.unpack_into(&url, &location)
                })
            }
            Method::Clone => {
                let url = clone_url(&raw, reference.as_ref().ok());
                self.git
                    .clone_repo(&url, &location.package_path(), request.branch.as_deref())
                    .map(|_| ())
            }
        };
        if let Err(e) = fetched {
            spinner.finish_error(&format!("Failed to fetch {}", raw));
            return Err(e);
        }
        spinner.finish_success(&format!("Fetched {}/{}", vendor, name));

        ui.show_progress(4, EXISTING_STEPS);
        self.register(&location, ui)?;
        Ok(location)
    }
}

/// Vendor and name for the package, explicit values first.
///
/// Explicit values are validated; values taken from the reference are not.
fn package_identity(
    request: &FetchRequest,
    reference: Option<&RepositoryReference>,
) -> Option<(String, String)> {
    let vendor = request
        .vendor
        .clone()
        .or_else(|| reference.map(|r| r.vendor().to_string()))?;
    let name = request
        .name
        .clone()
        .or_else(|| reference.map(|r| r.name().to_string()))?;
    Some((vendor, name))
}

impl FetchRequest {
    /// Validate the explicitly given vendor and name.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.vendor, &self.name].into_iter().flatten() {
            validate_name(name)?;
        }
        Ok(())
    }
}

/// The URL handed to `git clone`.
///
/// Full URLs pass through; shorthands become an HTTPS clone URL on the
/// resolved host.
fn clone_url(raw: &str, reference: Option<&RepositoryReference>) -> String {
    if raw.contains("://") || raw.contains('@') {
        return raw.to_string();
    }
    match reference {
        Some(r) => format!(
            "https://{}/{}/{}.git",
            r.host().unwrap_or(crate::repository::DEFAULT_HOST),
            r.vendor(),
            r.name()
        ),
        None => raw.to_string(),
    }
}
