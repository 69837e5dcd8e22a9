//! `new`: build a package from the skeleton.

use std::fs;

use super::Scaffolder;
use crate::error::Result;
use crate::package::PackageNames;
use crate::template::{apply_manifest, fill, PlaceholderSet, PlaceholderSetBuilder};
use crate::ui::{Prompt, UserInterface};

/// Progress steps shown while creating a package.
pub const CREATE_STEPS: usize = 6;

/// Arguments for [`Scaffolder::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub vendor: String,
    pub name: String,
    /// Ask for names, author details, description and license.
    pub interactive: bool,
    /// Skeleton reference or direct `.zip` URL; the configured skeleton
    /// when `None`.
    pub skeleton: Option<String>,
    pub branch: Option<String>,
}

/// Author and license values substituted into the skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PackageDetails {
    author_name: String,
    author_email: String,
    author_homepage: String,
    description: Option<String>,
    license: String,
}

impl Scaffolder {
    /// Create `vendor/name` from the skeleton.
    ///
    /// # Errors
    ///
    /// - `InvalidName` before anything touches the filesystem
    /// - `PackageExists` if the package directory is already there
    /// - `InvalidReference`, `UnknownHost` or `Fetch` for the skeleton
    /// - `Install` if registering the package fails
    pub fn create(
        &mut self,
        request: &CreateRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<PackageNames> {
        // 1. names
        ui.show_progress(1, CREATE_STEPS);
        let (vendor, name) = if request.interactive {
            (
                ask(ui, "vendor", "What will be the vendor name?", &request.vendor)?,
                ask(ui, "name", "What will be the package name?", &request.name)?,
            )
        } else {
            (request.vendor.clone(), request.name.clone())
        };
        let names = PackageNames::new(&vendor, &name)?;
        let location = self.location(names.vendor(), names.package());
        location.ensure_vacant()?;

        let details = self.details(request.interactive, ui)?;
        ui.show_header(&format!("Creating {}", names.full_name()));

        // 2. packages directory
        ui.show_progress(2, CREATE_STEPS);
        fs::create_dir_all(location.packages_root())?;

        // 3. vendor directory
        ui.show_progress(3, CREATE_STEPS);
        fs::create_dir_all(location.vendor_path())?;

        // 4. skeleton
        ui.show_progress(4, CREATE_STEPS);
        let url = self.skeleton_url(request)?;
        tracing::debug!("Skeleton archive: {}", url);
        let mut spinner = ui.start_spinner("Downloading skeleton...");
        if let Err(e) = self.unpack_into(&url, &location) {
            spinner.finish_error("Failed to download skeleton");
            return Err(e);
        }
        spinner.finish_success("Downloaded skeleton");

        if let Some(renamed) = apply_manifest(&location.package_path())? {
            tracing::debug!("Applied rename manifest: {} paths", renamed);
        }

        // 5. placeholders
        ui.show_progress(5, CREATE_STEPS);
        let placeholders = placeholders_for(&names, &details)?;
        let report = fill(&location.package_path(), &placeholders)?;
        if report.skipped_binary > 0 {
            ui.show_hint(&format!(
                "{} binary file(s) were left unchanged",
                report.skipped_binary
            ));
        }

        // 6. register
        ui.show_progress(6, CREATE_STEPS);
        self.register(&location, ui)?;

        ui.success("Package created successfully!");
        Ok(names)
    }

    /// The archive URL for the requested (or configured) skeleton.
    fn skeleton_url(&self, request: &CreateRequest) -> Result<String> {
        let skeleton = request
            .skeleton
            .as_deref()
            .unwrap_or(&self.config.skeleton.url);

        if skeleton.ends_with(".zip") {
            return Ok(skeleton.to_string());
        }

        let branch = request
            .branch
            .as_deref()
            .unwrap_or(&self.config.skeleton.branch);
        self.resolver.resolve(skeleton, Some(branch))
    }

    fn details(&self, interactive: bool, ui: &mut dyn UserInterface) -> Result<PackageDetails> {
        let author = &self.config.author;
        if !interactive {
            return Ok(PackageDetails {
                author_name: author.name.clone(),
                author_email: author.email.clone(),
                author_homepage: author.homepage.clone(),
                description: None,
                license: self.config.license.clone(),
            });
        }

        Ok(PackageDetails {
            author_name: ask(ui, "author_name", "Who is the author?", &author.name)?,
            author_email: ask(ui, "author_email", "What is the author's e-mail?", &author.email)?,
            author_homepage: ask(
                ui,
                "author_homepage",
                "What is the author's website?",
                &author.homepage,
            )?,
            description: Some(ask(
                ui,
                "description",
                "How would you describe the package?",
                "",
            )?),
            license: ask(
                ui,
                "license",
                "Under which license will it be released?",
                &self.config.license,
            )?,
        })
    }
}

fn ask(ui: &mut dyn UserInterface, key: &str, question: &str, default: &str) -> Result<String> {
    let default = (!default.is_empty()).then_some(default);
    let answer = ui.prompt(&Prompt::input(key, question, default))?;
    Ok(answer.as_string())
}

/// The skeleton placeholders, in substitution order.
fn placeholders_for(names: &PackageNames, details: &PackageDetails) -> Result<PlaceholderSet> {
    let mut builder = PlaceholderSetBuilder::new();
    builder.replace(
        &[":uc:vendor", ":uc:package", ":lc:vendor", ":lc:package"],
        &[
            names.vendor_studly(),
            names.package_studly(),
            names.vendor_lower(),
            names.package_lower(),
        ],
    )?;
    builder.replace(
        &[":author_name", ":author_email", ":author_homepage"],
        &[
            &details.author_name,
            &details.author_email,
            &details.author_homepage,
        ],
    )?;
    if let Some(description) = &details.description {
        builder.pair(":package_description", description);
    }
    builder.pair(":license", &details.license);
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(description: Option<&str>) -> PackageDetails {
        PackageDetails {
            author_name: "Jane Doe".into(),
            author_email: "jane@example.com".into(),
            author_homepage: "https://example.com".into(),
            description: description.map(String::from),
            license: "MIT".into(),
        }
    }

    fn tokens(set: &PlaceholderSet) -> Vec<&str> {
        set.pairs().iter().map(|(t, _)| t.as_str()).collect()
    }

    #[test]
    fn placeholder_order_without_description() {
        let names = PackageNames::new("my-vendor", "MyPackage").unwrap();
        let set = placeholders_for(&names, &details(None)).unwrap();
        assert_eq!(
            tokens(&set),
            vec![
                ":uc:vendor",
                ":uc:package",
                ":lc:vendor",
                ":lc:package",
                ":author_name",
                ":author_email",
                ":author_homepage",
                ":license",
            ]
        );
    }

    #[test]
    fn placeholder_description_precedes_license() {
        let names = PackageNames::new("acme", "widget").unwrap();
        let set = placeholders_for(&names, &details(Some("A widget"))).unwrap();
        let tokens = tokens(&set);
        assert_eq!(tokens[7], ":package_description");
        assert_eq!(tokens[8], ":license");
    }

    #[test]
    fn placeholder_values_use_case_forms() {
        let names = PackageNames::new("my-vendor", "MyPackage").unwrap();
        let set = placeholders_for(&names, &details(None)).unwrap();
        assert_eq!(
            set.apply(":uc:vendor\\:uc:package :lc:vendor/:lc:package"),
            "MyVendor\\MyPackage my-vendor/mypackage"
        );
    }
}
