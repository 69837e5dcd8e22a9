//! List command implementation.
//!
//! The `packsmith list` command shows the packages under the packages
//! directory and whether the dependency manifest references them.

use crate::cli::args::ListArgs;
use crate::error::{PacksmithError, Result};
use crate::scaffold::PackageStatus;
use crate::ui::{should_use_colors, PacksmithTheme, Table, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let scaffolder = self.context.scaffolder()?;
        let packages = scaffolder.list()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&packages)
                .map_err(|e| PacksmithError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if packages.is_empty() {
            ui.message(&format!(
                "No packages found in {}",
                scaffolder.config().paths.packages.display()
            ));
            return Ok(CommandResult::success());
        }

        ui.message(&render(&packages));
        Ok(CommandResult::success())
    }
}

fn render(packages: &[PackageStatus]) -> String {
    let theme = if should_use_colors() {
        PacksmithTheme::new()
    } else {
        PacksmithTheme::plain()
    };

    let mut table = Table::new(vec!["Package", "Path", "Registered"]);
    for package in packages {
        let registered = if package.registered {
            theme.success.apply_to("yes").to_string()
        } else {
            theme.dim.apply_to("no").to_string()
        };
        table.add_row(&[
            format!("{}/{}", package.vendor, package.name),
            package.path.clone(),
            registered,
        ]);
    }
    table.render()
}
