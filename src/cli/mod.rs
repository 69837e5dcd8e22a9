//! Command-line interface for packsmith.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, FetchArgs, ListArgs, NewArgs, RemoveArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
