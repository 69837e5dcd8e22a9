//! composer.json editing.
//!
//! Adding `acme/widget` at `packages/acme/widget` produces:
//!
//! ```json
//! {
//!     "repositories": [
//!         { "type": "path", "url": "packages/acme/widget", "options": { "symlink": true } }
//!     ],
//!     "require": { "acme/widget": "@dev" }
//! }
//! ```
//!
//! Key order is preserved and the file is written with four-space indents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{PacksmithError, Result};
use crate::manifest::DependencyManifest;

/// Version constraint written for local path packages.
pub const DEV_CONSTRAINT: &str = "@dev";

/// A composer-style JSON manifest on disk.
#[derive(Debug, Clone)]
pub struct JsonManifest {
    path: PathBuf,
}

impl JsonManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, package: &str, message: impl Into<String>) -> PacksmithError {
        PacksmithError::Install {
            package: package.to_string(),
            message: format!("{}: {}", self.path.display(), message.into()),
        }
    }

    /// Read the manifest, creating it as `{}` if it does not exist.
    fn load(&self, package: &str) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            tracing::debug!("Creating {}", self.path.display());
            fs::write(&self.path, "{}\n")?;
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.error(package, "top level is not an object")),
            Err(e) => Err(self.error(package, e.to_string())),
        }
    }

    fn save(&self, root: Map<String, Value>) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Value::Object(root)
            .serialize(&mut serializer)
            .map_err(|e| PacksmithError::Other(e.into()))?;
        buf.push(b'\n');
        fs::write(&self.path, buf)?;
        Ok(())
    }
}

fn full_name(vendor: &str, name: &str) -> String {
    format!("{}/{}", vendor, name)
}

/// Check if a repositories entry points at `vendor/name`.
fn is_repository_for(entry: &Value, vendor: &str, name: &str) -> bool {
    let Some(url) = entry.get("url").and_then(Value::as_str) else {
        return false;
    };
    let suffix = full_name(vendor, name);
    entry.get("type").and_then(Value::as_str) == Some("path")
        && (url == suffix || url.ends_with(&format!("/{}", suffix)))
}

impl DependencyManifest for JsonManifest {
    fn add_package(&mut self, vendor: &str, name: &str, path: &str) -> Result<()> {
        let package = full_name(vendor, name);
        let mut root = self.load(&package)?;

        let entry = json!({
            "type": "path",
            "url": path,
            "options": { "symlink": true }
        });

        match root
            .entry("repositories")
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(repositories) => {
                let known = repositories
                    .iter()
                    .any(|r| r.get("url").and_then(Value::as_str) == Some(path));
                if !known {
                    repositories.push(entry);
                }
            }
            Value::Object(repositories) => {
                repositories.entry(package.clone()).or_insert(entry);
            }
            _ => return Err(self.error(&package, "\"repositories\" must be an array")),
        }

        match root
            .entry("require")
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(require) => {
                require
                    .entry(package.clone())
                    .or_insert_with(|| Value::String(DEV_CONSTRAINT.to_string()));
            }
            _ => return Err(self.error(&package, "\"require\" must be an object")),
        }

        tracing::debug!("Registered {} in {}", package, self.path.display());
        self.save(root)
    }

    fn remove_package(&mut self, vendor: &str, name: &str) -> Result<()> {
        let package = full_name(vendor, name);
        let mut root = self.load(&package)?;

        if let Some(Value::Object(require)) = root.get_mut("require") {
            require.shift_remove(&package);
        }

        match root.get_mut("repositories") {
            Some(Value::Array(repositories)) => {
                repositories.retain(|r| !is_repository_for(r, vendor, name));
            }
            Some(Value::Object(repositories)) => {
                repositories.shift_remove(&package);
            }
            _ => {}
        }

        tracing::debug!("Unregistered {} from {}", package, self.path.display());
        self.save(root)
    }

    fn contains(&self, vendor: &str, name: &str) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let package = full_name(vendor, name);
        let root = self.load(&package)?;
        Ok(root
            .get("require")
            .and_then(Value::as_object)
            .is_some_and(|require| require.contains_key(&package)))
    }
}
