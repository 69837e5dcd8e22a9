//! Vendor and package name handling.
//!
//! Names must start with a letter and continue with letters, digits, `-`
//! or `_`. A leading digit is rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PacksmithError, Result};

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());

/// Check if `name` is a valid vendor or package name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Validate a single name.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(PacksmithError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Studly form: `my-vendor` becomes `MyVendor`.
///
/// Words are split on `-`, `_` and spaces; each word's first letter is
/// upper-cased and the rest kept, so `MyVendor` stays `MyVendor`.
pub fn studly(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// A validated vendor/package pair with its derived case forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNames {
    vendor: String,
    package: String,
}

impl PackageNames {
    /// Validate both names.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for the first name that fails validation.
    pub fn new(vendor: &str, package: &str) -> Result<Self> {
        validate_name(vendor)?;
        validate_name(package)?;
        Ok(Self {
            vendor: vendor.to_string(),
            package: package.to_string(),
        })
    }

    /// Vendor as given.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Package as given.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// `vendor/package` as given.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.vendor, self.package)
    }

    /// Studly vendor, e.g. `MyVendor`.
    pub fn vendor_studly(&self) -> String {
        studly(&self.vendor)
    }

    /// Studly package, e.g. `MyPackage`.
    pub fn package_studly(&self) -> String {
        studly(&self.package)
    }

    /// Lower-case vendor.
    pub fn vendor_lower(&self) -> String {
        self.vendor.to_lowercase()
    }

    /// Lower-case package.
    pub fn package_lower(&self) -> String {
        self.package.to_lowercase()
    }
}
