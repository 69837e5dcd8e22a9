//! Remove command implementation.
//!
//! The `packsmith remove` command unregisters a package and deletes it.

use crate::cli::args::RemoveArgs;
use crate::error::{PacksmithError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, INVALID_NAME_MESSAGE};

/// The remove command implementation.
pub struct RemoveCommand {
    context: CommandContext,
    args: RemoveArgs,
}

impl RemoveCommand {
    /// Create a new remove command.
    pub fn new(context: CommandContext, args: RemoveArgs) -> Self {
        Self { context, args }
    }
}

impl Command for RemoveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut scaffolder = self.context.scaffolder()?;
        match scaffolder.remove(&self.args.vendor, &self.args.name, self.args.force, ui) {
            Ok(removed) => {
                if !removed {
                    tracing::debug!("Removal of {}/{} declined", self.args.vendor, self.args.name);
                }
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
