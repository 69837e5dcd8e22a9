//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Packsmith - scaffold and manage local packages.
#[derive(Debug, Parser)]
#[command(name = "packsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .packsmith/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new package from the skeleton
    New(NewArgs),

    /// Download an existing package archive and register it
    Get(FetchArgs),

    /// Clone an existing package with git and register it
    Git(FetchArgs),

    /// List packages in the packages directory
    List(ListArgs),

    /// Unregister and delete a package
    Remove(RemoveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NewArgs {
    /// Vendor name, e.g. `MyVendor`
    pub vendor: String,

    /// Package name, e.g. `MyPackage`
    pub name: String,

    /// Ask for names, author details, description and license
    #[arg(short, long)]
    pub interactive: bool,

    /// Skeleton repository reference or direct .zip URL
    #[arg(long, value_name = "REF")]
    pub skeleton: Option<String>,

    /// Skeleton branch to download
    #[arg(short, long)]
    pub branch: Option<String>,
}

/// Arguments for the `get` and `git` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FetchArgs {
    /// Repository reference (vendor/name, SSH or HTTPS URL)
    pub url: String,

    /// Vendor directory to use (defaults to the repository vendor)
    pub vendor: Option<String>,

    /// Package directory to use (defaults to the repository name)
    pub name: Option<String>,

    /// Branch to fetch
    #[arg(short, long)]
    pub branch: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remove` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoveArgs {
    pub vendor: String,

    pub name: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_new_with_flags() {
        let cli = Cli::parse_from([
            "packsmith",
            "new",
            "Acme",
            "Widget",
            "-i",
            "--skeleton",
            "acme/skeleton",
            "--branch",
            "main",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(args.vendor, "Acme");
        assert_eq!(args.name, "Widget");
        assert!(args.interactive);
        assert_eq!(args.skeleton.as_deref(), Some("acme/skeleton"));
        assert_eq!(args.branch.as_deref(), Some("main"));
    }

    #[test]
    fn parses_get_with_optional_names() {
        let cli = Cli::parse_from(["packsmith", "get", "acme/widget"]);
        let Commands::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.url, "acme/widget");
        assert!(args.vendor.is_none() && args.name.is_none());

        let cli = Cli::parse_from(["packsmith", "git", "acme/widget", "Mine", "Thing"]);
        let Commands::Git(args) = cli.command else {
            panic!("expected git");
        };
        assert_eq!(args.vendor.as_deref(), Some("Mine"));
        assert_eq!(args.name.as_deref(), Some("Thing"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["packsmith", "list", "--project", "/tmp/x", "--quiet"]);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/x")));
        assert!(cli.quiet);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["packsmith"]).is_err());
    }
}
