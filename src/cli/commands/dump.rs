//! Dump command implementation.
//!
//! The `puzzle-reqs dump` command lists every item of a level with the
//! index requirements refer to it by, grouped by spawn location.

use std::path::{Path, PathBuf};

use crate::cli::args::DumpArgs;
use crate::error::Result;
use crate::level::{Level, LevelLifecycle};
use crate::ui::UserInterface;

use super::common::{load_level, Loaded};
use super::dispatcher::{Command, CommandResult};

/// The dump command implementation.
pub struct DumpCommand {
    base_dir: PathBuf,
    args: DumpArgs,
}

impl DumpCommand {
    /// Create a new dump command.
    pub fn new(base_dir: &Path, args: DumpArgs) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for DumpCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = match load_level(&self.base_dir, self.args.manifest.as_deref(), ui)? {
            Loaded::Manifest(manifest) => manifest,
            Loaded::Failed(result) => return Ok(result),
        };

        let level = Level::from_manifest(&manifest);
        let mut lifecycle = LevelLifecycle::new();
        lifecycle.load(&level)?;
        let dump = lifecycle.diagnostic_dump();

        if self.args.json {
            ui.raw(&serde_json::to_string_pretty(&dump)?);
            return Ok(CommandResult::success());
        }

        ui.show_header(level.name());
        if dump.is_empty() {
            ui.message("No items registered");
        } else {
            ui.raw(dump.to_string().trim_end());
        }

        Ok(CommandResult::success())
    }
}
