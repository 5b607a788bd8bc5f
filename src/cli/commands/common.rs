//! Manifest loading shared by the level commands.

use std::path::Path;

use crate::error::{PuzzleReqError, Result};
use crate::level::{load_manifest, manifest_path, LevelManifest};
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Outcome of loading the manifest a command was pointed at.
pub enum Loaded {
    Manifest(LevelManifest),
    /// The problem was already reported; the command should end with this result.
    Failed(CommandResult),
}

/// Load the manifest for a command, reporting the common failures on `ui`.
///
/// A missing manifest ends with exit code 2 and a malformed one with 1;
/// any other error is propagated.
pub fn load_level(
    base_dir: &Path,
    manifest: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Loaded> {
    let path = manifest_path(base_dir, manifest);
    match load_manifest(&path) {
        Ok(manifest) => Ok(Loaded::Manifest(manifest)),
        Err(PuzzleReqError::ConfigNotFound { path }) => {
            ui.error(&format!("No level manifest found at {}", path.display()));
            Ok(Loaded::Failed(CommandResult::failure(2)))
        }
        Err(PuzzleReqError::ConfigParseError { path, message }) => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            Ok(Loaded::Failed(CommandResult::failure(1)))
        }
        Err(e) => Err(e),
    }
}
