//! `remove` and `list`.

use serde::Serialize;

use super::Scaffolder;
use crate::error::Result;
use crate::package::{discover, validate_name, PackageLocation};
use crate::ui::{Prompt, UserInterface};

/// A package found under the packages directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageStatus {
    pub vendor: String,
    pub name: String,
    /// Path relative to the project root, `/`-separated.
    pub path: String,
    /// Whether the dependency manifest references the package.
    pub registered: bool,
}

impl Scaffolder {
    /// Unregister, uninstall and delete `vendor/name`.
    ///
    /// Both parts must be valid names, so nothing outside the packages
    /// directory is reachable. Asks for confirmation unless `force` is set
    /// or the UI is not interactive. Returns `false` if the user declined.
    pub fn remove(
        &mut self,
        vendor: &str,
        name: &str,
        force: bool,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        validate_name(vendor)?;
        validate_name(name)?;

        let location = self.location(vendor, name);
        location.ensure_present()?;

        if !force && ui.is_interactive() {
            let question = format!(
                "Remove {}/{} and delete {}?",
                vendor,
                name,
                location.relative_to(&self.project_root)
            );
            let answer = ui.prompt(&Prompt::confirm("confirm_remove", &question, false))?;
            if answer.as_bool() != Some(true) {
                ui.message("Removal cancelled");
                return Ok(false);
            }
        }

        ui.show_header(&format!("Removing {}/{}", vendor, name));
        self.manifest.remove_package(vendor, name)?;
        self.uninstall(&location, ui)?;
        location.remove()?;

        ui.success("Package removed successfully!");
        Ok(true)
    }

    fn uninstall(&self, location: &PackageLocation, ui: &mut dyn UserInterface) -> Result<()> {
        let (vendor, name) = (location.vendor(), location.name());
        let Some(command) = self.installer.uninstall_command(vendor, name) else {
            return Ok(());
        };

        let mut spinner = ui.start_spinner(&format!("Running {}", command));
        match self.installer.uninstall(vendor, name) {
            Ok(_) => {
                spinner.finish_success(&format!("Uninstalled {}/{}", vendor, name));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&format!("Failed to uninstall {}/{}", vendor, name));
                Err(e)
            }
        }
    }

    /// Every package under the packages directory, sorted by vendor and name.
    pub fn list(&self) -> Result<Vec<PackageStatus>> {
        discover(&self.packages_root())?
            .into_iter()
            .map(|found| {
                let location = self.location(&found.vendor, &found.name);
                Ok(PackageStatus {
                    registered: self.manifest.contains(&found.vendor, &found.name)?,
                    path: location.relative_to(&self.project_root),
                    vendor: found.vendor,
                    name: found.name,
                })
            })
            .collect()
    }
}
