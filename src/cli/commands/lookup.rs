//! Lookup command implementation.
//!
//! The `puzzle-reqs lookup --sensor N` command resolves a level and asks
//! the movable-puzzle index which puzzle owns sensor `N`.

use std::path::{Path, PathBuf};

use crate::cli::args::LookupArgs;
use crate::entity::{PuzzleEntity, SensorId};
use crate::error::Result;
use crate::level::{ensure_valid, Level, LevelLifecycle};
use crate::ui::UserInterface;

use super::common::{load_level, Loaded};
use super::dispatcher::{Command, CommandResult};

/// The lookup command implementation.
pub struct LookupCommand {
    base_dir: PathBuf,
    args: LookupArgs,
}

impl LookupCommand {
    /// Create a new lookup command.
    pub fn new(base_dir: &Path, args: LookupArgs) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for LookupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = match load_level(&self.base_dir, self.args.manifest.as_deref(), ui)? {
            Loaded::Manifest(manifest) => manifest,
            Loaded::Failed(result) => return Ok(result),
        };

        // Puzzle ids are reported back, so they must be unambiguous.
        ensure_valid(&manifest)?;

        let level = Level::from_manifest(&manifest);
        let mut lifecycle = LevelLifecycle::new();
        lifecycle.load(&level)?;

        let sensor = SensorId(self.args.sensor);
        let Some(puzzle) = lifecycle.movable_puzzle(sensor) else {
            ui.warning(&format!("No movable puzzle owns {}", sensor));
            return Ok(CommandResult::failure(1));
        };

        let id = level
            .puzzle_id_of(&puzzle)
            .map(str::to_string)
            .unwrap_or_else(|| puzzle.label());
        ui.success(&format!("{} owns {}", id, sensor));
        if let Some(placed) = level.puzzle(&id) {
            ui.show_field("Requires", &placed.entity.required_item_names().join(", "));
        }

        Ok(CommandResult::success())
    }
}
