//! Reference host: level manifests and the entities built from them.
//!
//! The registry only knows capability traits. This module provides a host
//! that satisfies them in memory, so a level described in YAML can be
//! discovered, resolved and inspected without an engine.
//!
//! # Modules
//!
//! - [`host`] - In-memory items, puzzles, clusters and the [`Level`] holding them
//! - [`lifecycle`] - Cleanup / discover / enter hooks around a registry
//! - [`loader`] - Manifest file loading
//! - [`manifest`] - Manifest schema
//! - [`validator`] - Manifest checks

pub mod host;
pub mod lifecycle;
pub mod loader;
pub mod manifest;
pub mod validator;

pub use host::{HostCluster, HostItem, HostPuzzle, Level, PlacedCluster, PlacedPuzzle};
pub use lifecycle::LevelLifecycle;
pub use loader::{load_manifest, manifest_path, parse_manifest, DEFAULT_MANIFEST};
pub use manifest::{ChildSpec, ClusterSpec, DiscoveryOrder, ItemSpec, LevelManifest, PuzzleSpec};
pub use validator::{ensure_valid, has_errors, validate, ManifestIssue, ManifestRule, Severity};
