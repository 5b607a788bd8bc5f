//! Manifest discovery and loading.

use crate::error::{PuzzleReqError, Result};
use crate::level::manifest::LevelManifest;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up when no manifest path is given.
pub const DEFAULT_MANIFEST: &str = "level.yml";

/// Resolve the manifest path for a command.
///
/// An explicit path is used as given (relative to `base` when relative);
/// otherwise `base/level.yml`.
pub fn manifest_path(base: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => base.join(path),
        None => base.join(DEFAULT_MANIFEST),
    }
}

/// Load a manifest file and parse it into a [`LevelManifest`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_manifest(path: &Path) -> Result<LevelManifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PuzzleReqError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PuzzleReqError::Io(e)
        }
    })?;

    tracing::debug!("loaded manifest from {}", path.display());
    parse_manifest(&content, path)
}

/// Parse YAML content into a [`LevelManifest`].
///
/// `source_path` is only used for error reporting.
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<LevelManifest> {
    serde_yaml::from_str(content).map_err(|e| PuzzleReqError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
