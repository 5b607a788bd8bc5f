//! puzzle-reqs - Deferred resolution of puzzle item requirements.
//!
//! During level discovery, items and puzzles appear in no guaranteed order.
//! Puzzles declare the items they require by index before those items may
//! exist; a single resolve pass at the end of discovery links every
//! declaration to the real items and indexes movable puzzles by sensor.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`entity`] - Handles, locations and the traits host entities implement
//! - [`error`] - Error types and result aliases
//! - [`level`] - Level manifests, in-memory host entities and lifecycle hooks
//! - [`registry`] - The requirement registry and its resolve pass
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use puzzle_reqs::level::{parse_manifest, Level, LevelLifecycle};
//! use std::path::Path;
//!
//! let manifest = parse_manifest(
//!     "items:\n  - name: Power Cell\npuzzles:\n  - id: door\n    required_items: [1]\n",
//!     Path::new("level.yml"),
//! )
//! .unwrap();
//! let level = Level::from_manifest(&manifest);
//!
//! let mut lifecycle = LevelLifecycle::new();
//! lifecycle.load(&level).unwrap();
//!
//! let door = &level.puzzle("door").unwrap().entity;
//! assert_eq!(door.required_item_names(), vec!["Power Cell"]);
//! ```

pub mod cli;
pub mod entity;
pub mod error;
pub mod level;
pub mod registry;
pub mod ui;

pub use error::{PuzzleReqError, RegistryError, Result};
