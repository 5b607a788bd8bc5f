//! Check command implementation.
//!
//! The `puzzle-reqs check` command validates a level manifest with the
//! built-in manifest rules.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::level::{has_errors, validate, Severity};
use crate::ui::UserInterface;

use super::common::{load_level, Loaded};
use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    base_dir: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(base_dir: &Path, args: CheckArgs) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = match load_level(&self.base_dir, self.args.manifest.as_deref(), ui)? {
            Loaded::Manifest(manifest) => manifest,
            Loaded::Failed(result) => return Ok(result),
        };

        let issues = validate(&manifest);
        let failed = has_errors(&issues);

        if self.args.json {
            ui.raw(&serde_json::to_string_pretty(&issues)?);
        } else if issues.is_empty() {
            ui.success(&format!("{} is valid", manifest.display_name()));
        } else {
            for issue in &issues {
                match issue.severity {
                    Severity::Error => ui.error(&issue.to_string()),
                    Severity::Warning => ui.warning(&issue.to_string()),
                }
            }
        }

        if failed {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
