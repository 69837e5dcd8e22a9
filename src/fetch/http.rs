//! HTTP archive downloads.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use crate::error::{PacksmithError, Result};
use crate::fetch::{archive, ArchiveTransport};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the blocking client shared by the HTTP collaborators.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("packsmith/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| PacksmithError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))
}

/// Downloads zip archives over HTTP(S).
#[derive(Debug)]
pub struct HttpArchiveTransport {
    client: Client,
    timeout: Duration,
}

impl HttpArchiveTransport {
    /// Create a transport with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Local file name for a downloaded archive.
    ///
    /// Uses a hash of the URL so repeated downloads land in the same place.
    pub fn archive_name(url: &str) -> String {
        let hash = Sha256::digest(url.as_bytes());
        format!("{}.zip", hex::encode(&hash[..8]))
    }
}

impl ArchiveTransport for HttpArchiveTransport {
    fn fetch_archive(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let fetch_error = |message: String| PacksmithError::Fetch {
            url: url.to_string(),
            message,
        };

        tracing::debug!("Downloading {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let bytes = response.bytes().map_err(|e| fetch_error(e.to_string()))?;

        fs::create_dir_all(dest_dir)?;
        let path = dest_dir.join(Self::archive_name(url));
        fs::write(&path, &bytes)?;
        tracing::debug!("Saved {} bytes to {}", bytes.len(), path.display());

        Ok(path)
    }

    fn extract(&self, archive: &Path, dest: &Path) -> Result<PathBuf> {
        archive::extract_zip(archive, dest)
    }
}
