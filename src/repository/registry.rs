//! Host pattern registry.
//!
//! Maps host names to [`HostPattern`] strategies. Built-in hosts are
//! registered first; configured hosts are layered on top and replace a
//! built-in with the same key.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{PacksmithError, Result};
use crate::repository::host::{
    BitbucketPattern, GitHubPattern, GitLabPattern, HostPattern, TemplatePattern,
};
use crate::repository::reference::RepositoryReference;

/// Host used for shorthand references.
pub const DEFAULT_HOST: &str = "github.com";

/// Registry of hosting providers, keyed by host name.
#[derive(Debug, Clone)]
pub struct HostRegistry {
    patterns: HashMap<String, Arc<dyn HostPattern>>,
    default_host: String,
}

impl HostRegistry {
    /// Create a registry with the built-in providers.
    pub fn new() -> Self {
        let mut registry = Self::empty(DEFAULT_HOST);
        registry.register(DEFAULT_HOST, GitHubPattern);
        registry.register("gitlab.com", GitLabPattern);
        registry.register("bitbucket.org", BitbucketPattern);
        registry
    }

    /// Create a registry with no providers.
    pub fn empty(default_host: &str) -> Self {
        Self {
            patterns: HashMap::new(),
            default_host: default_host.to_lowercase(),
        }
    }

    /// Create the built-in registry extended with custom URL templates.
    pub fn with_custom<'a>(custom: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut registry = Self::new();
        for (host, template) in custom {
            registry.register(host, TemplatePattern::new(template.as_str()));
        }
        registry
    }

    /// Register (or replace) the strategy for `host`.
    pub fn register(&mut self, host: &str, pattern: impl HostPattern + 'static) {
        tracing::debug!("Registering {} host pattern for {}", pattern.kind(), host);
        self.patterns.insert(host.to_lowercase(), Arc::new(pattern));
    }

    /// Host used when a reference does not name one.
    pub fn default_host(&self) -> &str {
        &self.default_host
    }

    /// Look up the strategy for a host.
    pub fn get(&self, host: &str) -> Option<&dyn HostPattern> {
        self.patterns.get(&host.to_lowercase()).map(|p| p.as_ref())
    }

    /// Check if a host is registered.
    pub fn has(&self, host: &str) -> bool {
        self.patterns.contains_key(&host.to_lowercase())
    }

    /// All registered host names, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.patterns.keys().map(|s| s.as_str()).collect();
        hosts.sort();
        hosts
    }

    /// Render the archive URL for `reference` at `branch`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHost` if the reference's host (or the default host,
    /// for shorthand references) has no registered pattern.
    pub fn render(&self, reference: &RepositoryReference, branch: &str) -> Result<String> {
        let host = reference.host().unwrap_or(self.default_host.as_str());
        let pattern = self.get(host).ok_or_else(|| PacksmithError::UnknownHost {
            host: host.to_string(),
        })?;

        Ok(pattern.render_url(host, reference.vendor(), reference.name(), branch))
    }
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self::new()
    }
}
