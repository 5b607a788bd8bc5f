//! Error types for puzzle-reqs operations.
//!
//! This module defines [`PuzzleReqError`], the primary error type used
//! throughout the crate, [`RegistryError`] for lifecycle misuse of the
//! requirement registry, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Failures inside a resolve pass (dangling handles, unexpected cluster
//!   children) are logged and skipped, never returned
//! - Calling the registry out of order is a [`RegistryError`]
//! - Use `anyhow::Error` (via `PuzzleReqError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::Phase;

/// Lifecycle misuse of a [`RequirementRegistry`](crate::registry::RequirementRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A discovery call arrived while the registry was not discovering.
    #[error("cannot {operation} while the registry is {phase}; reset it first")]
    OutOfPhase {
        operation: &'static str,
        phase: Phase,
    },

    /// `resolve` was called twice in the same cycle.
    #[error("requirements were already resolved for this cycle")]
    AlreadyResolved,

    /// Every item index in this cycle has been issued.
    #[error("no item handles left in this cycle; reset it first")]
    HandlesExhausted,
}

/// Core error type for puzzle-reqs operations.
#[derive(Debug, Error)]
pub enum PuzzleReqError {
    /// Level manifest not found at expected location.
    #[error("Manifest not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a level manifest.
    #[error("Failed to parse manifest at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid manifest structure or values.
    #[error("Invalid manifest: {message}")]
    ConfigValidationError { message: String },

    /// The registry rejected a lifecycle call.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for puzzle-reqs operations.
pub type Result<T> = std::result::Result<T, PuzzleReqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PuzzleReqError::ConfigNotFound {
            path: PathBuf::from("/levels/r1a1.yml"),
        };
        assert!(err.to_string().contains("/levels/r1a1.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PuzzleReqError::ConfigParseError {
            path: PathBuf::from("/level.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/level.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn out_of_phase_names_operation_and_phase() {
        let err = RegistryError::OutOfPhase {
            operation: "register an item",
            phase: Phase::Resolved,
        };
        let msg = err.to_string();
        assert!(msg.contains("register an item"));
        assert!(msg.contains("resolved"));
    }

    #[test]
    fn registry_error_is_transparent() {
        let err: PuzzleReqError = RegistryError::AlreadyResolved.into();
        assert_eq!(
            err.to_string(),
            "requirements were already resolved for this cycle"
        );
        assert!(matches!(
            err,
            PuzzleReqError::Registry(RegistryError::AlreadyResolved)
        ));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PuzzleReqError = io_err.into();
        assert!(matches!(err, PuzzleReqError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PuzzleReqError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
