//! Get and git command implementations.
//!
//! `packsmith get` downloads a package archive, `packsmith git` clones the
//! repository. Both register the result in the dependency manifest.

use crate::cli::args::FetchArgs;
use crate::error::{PacksmithError, Result};
use crate::scaffold::FetchRequest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, INVALID_NAME_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Download,
    Clone,
}

/// The get/git command implementation.
pub struct FetchCommand {
    context: CommandContext,
    args: FetchArgs,
    mode: Mode,
}

impl FetchCommand {
    /// `packsmith get`.
    pub fn download(context: CommandContext, args: FetchArgs) -> Self {
        Self {
            context,
            args,
            mode: Mode::Download,
        }
    }

    /// `packsmith git`.
    pub fn clone_repo(context: CommandContext, args: FetchArgs) -> Self {
        Self {
            context,
            args,
            mode: Mode::Clone,
        }
    }

    fn request(&self) -> FetchRequest {
        FetchRequest {
            url: self.args.url.clone(),
            vendor: self.args.vendor.clone(),
            name: self.args.name.clone(),
            branch: self.args.branch.clone(),
        }
    }
}

impl Command for FetchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = self.request();
        if let Err(PacksmithError::InvalidName { .. }) = request.validate() {
            ui.error(INVALID_NAME_MESSAGE);
            return Ok(CommandResult::failure(1));
        }

        let mut scaffolder = self.context.scaffolder()?;
        let location = match self.mode {
            Mode::Download => scaffolder.download(&request, ui)?,
            Mode::Clone => scaffolder.clone_package(&request, ui)?,
        };
        tracing::info!(
            "Added {}/{} at {}",
            location.vendor(),
            location.name(),
            location.package_path().display()
        );
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn invalid_explicit_name_fails_before_fetching() {
        let temp = TempDir::new().unwrap();
        let args = FetchArgs {
            url: "acme/widget".to_string(),
            vendor: Some("1234-invalid".to_string()),
            ..Default::default()
        };
        let cmd = FetchCommand::download(CommandContext::new(temp.path()), args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error(INVALID_NAME_MESSAGE));
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn unparseable_reference_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = FetchArgs {
            url: "not a reference".to_string(),
            ..Default::default()
        };
        let cmd = FetchCommand::clone_repo(CommandContext::new(temp.path()), args);

        let err = cmd.execute(&mut MockUI::new()).unwrap_err();
        assert!(matches!(err, PacksmithError::InvalidReference { .. }));
    }

    #[test]
    fn existing_package_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("packages/acme/widget")).unwrap();
        let args = FetchArgs {
            url: "acme/widget".to_string(),
            ..Default::default()
        };
        let cmd = FetchCommand::download(CommandContext::new(temp.path()), args);

        let err = cmd.execute(&mut MockUI::new()).unwrap_err();
        assert!(matches!(err, PacksmithError::PackageExists { .. }));
    }
}
