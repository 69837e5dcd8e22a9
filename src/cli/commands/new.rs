//! New command implementation.
//!
//! The `packsmith new` command creates a package from the skeleton.

use crate::cli::args::NewArgs;
use crate::error::{PacksmithError, Result};
use crate::scaffold::CreateRequest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, INVALID_NAME_MESSAGE};

/// The new command implementation.
pub struct NewCommand {
    context: CommandContext,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new `new` command.
    pub fn new(context: CommandContext, args: NewArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &NewArgs {
        &self.args
    }

    fn request(&self) -> CreateRequest {
        CreateRequest {
            vendor: self.args.vendor.clone(),
            name: self.args.name.clone(),
            interactive: self.args.interactive,
            skeleton: self.args.skeleton.clone(),
            branch: self.args.branch.clone(),
        }
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut scaffolder = self.context.scaffolder()?;

        match scaffolder.create(&self.request(), ui) {
            Ok(names) => {
                tracing::info!("Created {}", names.full_name());
                Ok(CommandResult::success())
            }
            Err(PacksmithError::InvalidName { name }) => {
                tracing::debug!("Rejected name '{}'", name);
                ui.error(INVALID_NAME_MESSAGE);
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
