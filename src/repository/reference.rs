//! Repository reference parsing.
//!
//! Turns a user-supplied reference into a normalized [`RepositoryReference`].
//! Three shapes are accepted, tried in this order:
//!
//! 1. Shorthand: `vendor/name`
//! 2. SSH: `git@host:vendor/name.git`
//! 3. HTTPS: `https://host/vendor/name` (trailing `/` or `.git` allowed)

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PacksmithError, Result};

static SHORTHAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").unwrap());

static SSH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@([A-Za-z0-9.-]+):([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$").unwrap()
});

static HTTPS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://([A-Za-z0-9.-]+(?::[0-9]+)?)/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$",
    )
    .unwrap()
});

/// A parsed reference to a repository on a hosting provider.
///
/// `host` is `None` for shorthand references, meaning the registry's
/// default host applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryReference {
    host: Option<String>,
    vendor: String,
    name: String,
}

impl RepositoryReference {
    /// Parse a raw reference string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the input matches no supported shape.
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();

        if is_shorthand(reference) {
            // no `.git` suffix on shorthands
            if reference.ends_with(".git") {
                return Err(invalid(reference));
            }
            if let Some(caps) = SHORTHAND_REGEX.captures(reference) {
                return Self::build(None, &caps[1], &caps[2], reference);
            }
        }

        if let Some(caps) = SSH_REGEX.captures(reference) {
            return Self::build(Some(&caps[1]), &caps[2], &caps[3], reference);
        }

        if let Some(caps) = HTTPS_REGEX.captures(reference) {
            return Self::build(Some(&caps[1]), &caps[2], &caps[3], reference);
        }

        Err(invalid(reference))
    }

    fn build(host: Option<&str>, vendor: &str, name: &str, raw: &str) -> Result<Self> {
        // `.` and `..` would slip through the character class
        if [vendor, name].iter().any(|s| s.chars().all(|c| c == '.')) {
            return Err(invalid(raw));
        }

        Ok(Self {
            host: host.map(|h| h.to_lowercase()),
            vendor: vendor.to_string(),
            name: name.to_string(),
        })
    }

    /// The host this reference points at, if one was given.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The vendor (owner) segment, case preserved.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// The repository name segment, case preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a copy pinned to `host`.
    ///
    /// Used to make a shorthand reference explicit once the default host is
    /// known, so that equal repositories compare equal.
    pub fn with_host(&self, host: &str) -> Self {
        Self {
            host: Some(host.to_lowercase()),
            ..self.clone()
        }
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}/{}/{}", host, self.vendor, self.name),
            None => write!(f, "{}/{}", self.vendor, self.name),
        }
    }
}

/// No scheme, no `@`, exactly one `/`.
fn is_shorthand(reference: &str) -> bool {
    !reference.contains("://") && !reference.contains('@') && reference.matches('/').count() == 1
}

fn invalid(reference: &str) -> PacksmithError {
    PacksmithError::InvalidReference {
        reference: reference.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand_without_host() {
        let r = RepositoryReference::parse("jeroen-g/laravel-packager").unwrap();
        assert_eq!(r.host(), None);
        assert_eq!(r.vendor(), "jeroen-g");
        assert_eq!(r.name(), "laravel-packager");
    }

    #[test]
    fn shorthand_preserves_case() {
        let r = RepositoryReference::parse("Jeroen-G/Packager").unwrap();
        assert_eq!(r.vendor(), "Jeroen-G");
        assert_eq!(r.name(), "Packager");
    }

    #[test]
    fn parses_ssh_and_strips_git_suffix() {
        let r = RepositoryReference::parse("git@gitlab.com:author/package.git").unwrap();
        assert_eq!(r.host(), Some("gitlab.com"));
        assert_eq!(r.vendor(), "author");
        assert_eq!(r.name(), "package");
    }

    #[test]
    fn parses_ssh_without_git_suffix() {
        let r = RepositoryReference::parse("git@github.com:author/package").unwrap();
        assert_eq!(r.name(), "package");
    }

    #[test]
    fn parses_https() {
        let r = RepositoryReference::parse("https://bitbucket.org/author/package").unwrap();
        assert_eq!(r.host(), Some("bitbucket.org"));
        assert_eq!(r.vendor(), "author");
        assert_eq!(r.name(), "package");
    }

    #[test]
    fn parses_https_with_trailing_slash_and_git_suffix() {
        let a = RepositoryReference::parse("https://github.com/author/package/").unwrap();
        let b = RepositoryReference::parse("https://github.com/author/package.git").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), "package");
    }

    #[test]
    fn parses_plain_http() {
        let r = RepositoryReference::parse("http://github.com/Jeroen-G/packager-skeleton").unwrap();
        assert_eq!(r.host(), Some("github.com"));
        assert_eq!(r.vendor(), "Jeroen-G");
    }

    #[test]
    fn https_and_ssh_forms_are_equal() {
        let https = RepositoryReference::parse("https://github.com/author/package").unwrap();
        let ssh = RepositoryReference::parse("git@github.com:author/package.git").unwrap();
        assert_eq!(https, ssh);
    }

    #[test]
    fn host_is_lowercased() {
        let r = RepositoryReference::parse("https://GitHub.com/author/package").unwrap();
        assert_eq!(r.host(), Some("github.com"));
    }

    #[test]
    fn keeps_port_in_host() {
        let r = RepositoryReference::parse("https://git.local:8443/team/lib").unwrap();
        assert_eq!(r.host(), Some("git.local:8443"));
    }

    #[test]
    fn rejects_unsupported_shapes() {
        for input in [
            "",
            "package",
            "vendor/",
            "/name",
            "a/b/c",
            "vendor/na me",
            "ftp://github.com/author/package",
            "https://github.com/author",
            "https://github.com/author/package/tree/main",
            "git@github.com/author/package.git",
            "vendor/..",
            "vendor/package.git",
        ] {
            let err = RepositoryReference::parse(input).unwrap_err();
            assert!(
                matches!(err, PacksmithError::InvalidReference { .. }),
                "expected InvalidReference for {input:?}"
            );
        }
    }

    #[test]
    fn with_host_pins_shorthand() {
        let r = RepositoryReference::parse("author/package").unwrap();
        let pinned = r.with_host("GitHub.com");
        assert_eq!(
            pinned,
            RepositoryReference::parse("https://github.com/author/package").unwrap()
        );
    }

    #[test]
    fn display_includes_host_when_present() {
        let r = RepositoryReference::parse("git@gitlab.com:author/package.git").unwrap();
        assert_eq!(r.to_string(), "gitlab.com/author/package");
        let r = RepositoryReference::parse("author/package").unwrap();
        assert_eq!(r.to_string(), "author/package");
    }
}
