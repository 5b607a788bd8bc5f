//! Schema command implementation.
//!
//! The `puzzle-reqs schema` command prints the JSON schema of level
//! manifests, for editor completion and validation.

use crate::error::Result;
use crate::level::LevelManifest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = schemars::schema_for!(LevelManifest);
        ui.raw(&serde_json::to_string_pretty(&schema)?);
        Ok(CommandResult::success())
    }
}
