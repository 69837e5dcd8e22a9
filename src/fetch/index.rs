//! Package index lookups.
//!
//! A Packagist-style index answers `GET <index>/packages/<vendor>/<name>.json`
//! with the package's canonical repository URL:
//!
//! ```json
//! { "package": { "name": "acme/widget", "repository": "https://github.com/Acme/widget" } }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{PacksmithError, Result};
use crate::fetch::http::{build_client, DEFAULT_TIMEOUT};

#[derive(Debug, Deserialize)]
struct IndexResponse {
    package: IndexPackage,
}

#[derive(Debug, Deserialize)]
struct IndexPackage {
    repository: Option<String>,
}

/// Client for a Packagist-style package index.
#[derive(Debug)]
pub struct PackageIndex {
    base_url: String,
    client: Client,
}

impl PackageIndex {
    /// Create a client for the index at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }

    /// The index base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the repository URL of `vendor/name`.
    ///
    /// Returns `Ok(None)` when the index does not know the package.
    pub fn repository_url(&self, vendor: &str, name: &str) -> Result<Option<String>> {
        let url = format!("{}/packages/{}/{}.json", self.base_url, vendor, name);
        let fetch_error = |message: String| PacksmithError::Fetch {
            url: url.clone(),
            message,
        };

        tracing::debug!("Looking up {}/{} at {}", vendor, name, url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }

        let body: IndexResponse = response.json().map_err(|e| fetch_error(e.to_string()))?;
        Ok(body.package.repository.filter(|r| !r.is_empty()))
    }

    /// Resolve `reference` through the index when it is a `vendor/name`
    /// shorthand, falling back to the reference itself on any failure.
    pub fn canonicalize(&self, reference: &str) -> String {
        let Some((vendor, name)) = reference.split_once('/') else {
            return reference.to_string();
        };
        if reference.contains("://") || reference.contains('@') || name.contains('/') {
            return reference.to_string();
        }

        match self.repository_url(vendor, name) {
            Ok(Some(url)) => {
                tracing::debug!("Index resolved {} to {}", reference, url);
                url
            }
            Ok(None) => reference.to_string(),
            Err(e) => {
                tracing::warn!("Package index lookup failed: {}", e);
                reference.to_string()
            }
        }
    }
}
