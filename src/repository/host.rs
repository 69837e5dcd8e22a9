//! Per-host archive URL strategies.
//!
//! Each hosting provider lays out its archive downloads differently. Every
//! known layout is a [`HostPattern`]; user-configured hosts use
//! [`TemplatePattern`], which substitutes `:host`, `:vendor`, `:name` and
//! `:branch` in a template string.

use std::fmt::Debug;

/// Renders an archive download URL for a repository on one host.
pub trait HostPattern: Debug + Send + Sync {
    /// Render the archive URL for `vendor/name` at `branch` on `host`.
    fn render_url(&self, host: &str, vendor: &str, name: &str, branch: &str) -> String;

    /// Short description shown in diagnostics.
    fn kind(&self) -> &'static str;
}

/// GitHub-style layout: `/<vendor>/<name>/archive/<branch>.zip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubPattern;

impl HostPattern for GitHubPattern {
    fn render_url(&self, host: &str, vendor: &str, name: &str, branch: &str) -> String {
        format!("https://{host}/{vendor}/{name}/archive/{branch}.zip")
    }

    fn kind(&self) -> &'static str {
        "github"
    }
}

/// GitLab-style layout; the file name repeats name and branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabPattern;

impl HostPattern for GitLabPattern {
    fn render_url(&self, host: &str, vendor: &str, name: &str, branch: &str) -> String {
        format!("https://{host}/{vendor}/{name}/-/archive/{branch}/{name}-{branch}.zip")
    }

    fn kind(&self) -> &'static str {
        "gitlab"
    }
}

/// Bitbucket-style layout: `/<vendor>/<name>/get/<branch>.zip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitbucketPattern;

impl HostPattern for BitbucketPattern {
    fn render_url(&self, host: &str, vendor: &str, name: &str, branch: &str) -> String {
        format!("https://{host}/{vendor}/{name}/get/{branch}.zip")
    }

    fn kind(&self) -> &'static str {
        "bitbucket"
    }
}

/// A user-supplied URL template such as `https://:host/:vendor/:name/:branch.zip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePattern {
    template: String,
}

const TEMPLATE_TOKENS: [&str; 4] = [":host", ":vendor", ":name", ":branch"];

impl TemplatePattern {
    /// Create a pattern from a template string.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl HostPattern for TemplatePattern {
    /// Tokens are replaced in a single left-to-right scan, so substituted
    /// values are never themselves re-expanded.
    fn render_url(&self, host: &str, vendor: &str, name: &str, branch: &str) -> String {
        let values = [host, vendor, name, branch];
        let mut out = String::with_capacity(self.template.len() + 32);
        let mut rest = self.template.as_str();

        'scan: while let Some(pos) = rest.find(':') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            for (token, value) in TEMPLATE_TOKENS.iter().zip(values) {
                if tail.starts_with(token) {
                    out.push_str(value);
                    rest = &tail[token.len()..];
                    continue 'scan;
                }
            }
            out.push(':');
            rest = &tail[1..];
        }
        out.push_str(rest);
        out
    }

    fn kind(&self) -> &'static str {
        "custom"
    }
}
