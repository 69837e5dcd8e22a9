//! Repository URL resolution.
//!
//! This module turns heterogeneous repository references into archive
//! download URLs:
//! - [`RepositoryReference`] parses shorthand, SSH and HTTPS references
//! - [`HostPattern`] strategies know each provider's archive layout
//! - [`HostRegistry`] maps host names to strategies
//! - [`Resolver`] ties them together with a default branch
//!
//! Everything here is pure: no filesystem or network access.
//!
//! # Example
//!
//! ```
//! use packsmith::repository::Resolver;
//!
//! let resolver = Resolver::default();
//! let url = resolver.resolve("git@gitlab.com:author/package.git", Some("dev")).unwrap();
//! assert_eq!(url, "https://gitlab.com/author/package/-/archive/dev/package-dev.zip");
//! ```

pub mod host;
pub mod reference;
pub mod registry;

pub use host::{BitbucketPattern, GitHubPattern, GitLabPattern, HostPattern, TemplatePattern};
pub use reference::RepositoryReference;
pub use registry::{HostRegistry, DEFAULT_HOST};

use crate::error::Result;

/// Branch used when none is requested.
pub const DEFAULT_BRANCH: &str = "master";

/// Resolves repository references to archive URLs.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: HostRegistry,
    default_branch: String,
}

impl Resolver {
    /// Create a resolver over `registry`.
    pub fn new(registry: HostRegistry) -> Self {
        Self {
            registry,
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Override the branch used when none is requested.
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    /// The underlying host registry.
    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    /// Parse a reference and pin shorthand references to the default host.
    pub fn parse(&self, reference: &str) -> Result<RepositoryReference> {
        let parsed = RepositoryReference::parse(reference)?;
        Ok(match parsed.host() {
            Some(_) => parsed,
            None => parsed.with_host(self.registry.default_host()),
        })
    }

    /// Render the archive URL for an already parsed reference.
    pub fn render(&self, reference: &RepositoryReference, branch: Option<&str>) -> Result<String> {
        let branch = branch.unwrap_or(self.default_branch.as_str());
        let url = self.registry.render(reference, branch)?;
        tracing::debug!("Resolved {} at {} to {}", reference, branch, url);
        Ok(url)
    }

    /// Parse `reference` and render its archive URL at `branch`.
    pub fn resolve(&self, reference: &str, branch: Option<&str>) -> Result<String> {
        let parsed = self.parse(reference)?;
        self.render(&parsed, branch)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(HostRegistry::new())
    }
}
