//! Where packages live on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PacksmithError, Result};

/// The on-disk location of a single package.
///
/// Vendor and package directories use the names exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocation {
    packages_root: PathBuf,
    vendor: String,
    name: String,
}

impl PackageLocation {
    /// Create a location below `packages_root`.
    pub fn new(packages_root: impl Into<PathBuf>, vendor: &str, name: &str) -> Self {
        Self {
            packages_root: packages_root.into(),
            vendor: vendor.to_string(),
            name: name.to_string(),
        }
    }

    /// Root directory that holds every vendor directory.
    pub fn packages_root(&self) -> &Path {
        &self.packages_root
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<packages_root>/<vendor>`
    pub fn vendor_path(&self) -> PathBuf {
        self.packages_root.join(&self.vendor)
    }

    /// `<packages_root>/<vendor>/<name>`
    pub fn package_path(&self) -> PathBuf {
        self.vendor_path().join(&self.name)
    }

    /// Check if the package directory exists.
    pub fn exists(&self) -> bool {
        self.package_path().exists()
    }

    /// Fail with `PackageExists` if the package directory is already there.
    pub fn ensure_vacant(&self) -> Result<()> {
        if self.exists() {
            return Err(PacksmithError::PackageExists {
                path: self.package_path(),
            });
        }
        Ok(())
    }

    /// Fail with `PackageNotFound` unless the package directory is there.
    pub fn ensure_present(&self) -> Result<()> {
        if !self.exists() {
            return Err(PacksmithError::PackageNotFound {
                path: self.package_path(),
            });
        }
        Ok(())
    }

    /// Path of the package relative to `project_root`, with `/` separators.
    ///
    /// Falls back to the absolute path when the package is outside the
    /// project.
    pub fn relative_to(&self, project_root: &Path) -> String {
        let path = self.package_path();
        let rel = path.strip_prefix(project_root).unwrap_or(&path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Remove the package directory, and the vendor directory if it is now
    /// empty.
    pub fn remove(&self) -> Result<()> {
        self.ensure_present()?;
        fs::remove_dir_all(self.package_path())?;

        let vendor_path = self.vendor_path();
        if fs::read_dir(&vendor_path)?.next().is_none() {
            fs::remove_dir(&vendor_path)?;
        }
        Ok(())
    }
}

/// An installed package found by [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPackage {
    pub vendor: String,
    pub name: String,
    pub path: PathBuf,
}

/// List `<vendor>/<name>` directories under `packages_root`, sorted.
///
/// A missing root yields an empty list.
pub fn discover(packages_root: &Path) -> Result<Vec<DiscoveredPackage>> {
    if !packages_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for vendor in fs::read_dir(packages_root)? {
        let vendor = vendor?;
        if !vendor.file_type()?.is_dir() {
            continue;
        }
        let vendor_name = vendor.file_name().to_string_lossy().into_owned();
        if vendor_name.starts_with('.') {
            continue;
        }
        for package in fs::read_dir(vendor.path())? {
            let package = package?;
            if !package.file_type()?.is_dir() {
                continue;
            }
            let name = package.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            found.push(DiscoveredPackage {
                vendor: vendor_name.clone(),
                name,
                path: package.path(),
            });
        }
    }

    found.sort_by(|a, b| (&a.vendor, &a.name).cmp(&(&b.vendor, &b.name)));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn derived_paths() {
        let location = PackageLocation::new("/p/packages", "MyVendor", "MyPackage");
        assert_eq!(location.vendor_path(), PathBuf::from("/p/packages/MyVendor"));
        assert_eq!(
            location.package_path(),
            PathBuf::from("/p/packages/MyVendor/MyPackage")
        );
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let location = PackageLocation::new("/p/packages", "acme", "widget");
        assert_eq!(location.relative_to(Path::new("/p")), "packages/acme/widget");
    }

    #[test]
    fn ensure_vacant_and_present() {
        let temp = TempDir::new().unwrap();
        let location = PackageLocation::new(temp.path(), "acme", "widget");

        assert!(location.ensure_vacant().is_ok());
        assert!(matches!(
            location.ensure_present(),
            Err(PacksmithError::PackageNotFound { .. })
        ));

        fs::create_dir_all(location.package_path()).unwrap();
        assert!(matches!(
            location.ensure_vacant(),
            Err(PacksmithError::PackageExists { .. })
        ));
        assert!(location.ensure_present().is_ok());
    }

    #[test]
    fn remove_cleans_empty_vendor() {
        let temp = TempDir::new().unwrap();
        let location = PackageLocation::new(temp.path(), "acme", "widget");
        fs::create_dir_all(location.package_path()).unwrap();

        location.remove().unwrap();
        assert!(!location.vendor_path().exists());
    }

    #[test]
    fn remove_keeps_vendor_with_other_packages() {
        let temp = TempDir::new().unwrap();
        let location = PackageLocation::new(temp.path(), "acme", "widget");
        fs::create_dir_all(location.package_path()).unwrap();
        fs::create_dir_all(temp.path().join("acme/gadget")).unwrap();

        location.remove().unwrap();
        assert!(location.vendor_path().is_dir());
    }

    #[test]
    fn discover_lists_sorted_packages() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("zeta/one")).unwrap();
        fs::create_dir_all(temp.path().join("acme/widget")).unwrap();
        fs::create_dir_all(temp.path().join("acme/gadget")).unwrap();
        fs::create_dir_all(temp.path().join(".cache/x")).unwrap();
        fs::write(temp.path().join("acme/README.md"), "").unwrap();

        let found = discover(temp.path()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| format!("{}/{}", p.vendor, p.name))
            .collect();
        assert_eq!(names, vec!["acme/gadget", "acme/widget", "zeta/one"]);
    }

    #[test]
    fn discover_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(discover(&temp.path().join("nope")).unwrap().is_empty());
    }
}
