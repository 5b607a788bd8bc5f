//! Resolve command implementation.
//!
//! The `puzzle-reqs resolve` command runs a full discovery cycle for a
//! level and shows which items each puzzle ended up requiring.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::ResolveArgs;
use crate::entity::PuzzleEntity;
use crate::error::Result;
use crate::level::{has_errors, validate, Level, LevelLifecycle};
use crate::registry::ResolveReport;
use crate::ui::UserInterface;

use super::common::{load_level, Loaded};
use super::dispatcher::{Command, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand {
    base_dir: PathBuf,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(base_dir: &Path, args: ResolveArgs) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            args,
        }
    }

    fn show_json(
        &self,
        level: &Level,
        report: &ResolveReport,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let puzzles: Vec<_> = level
            .puzzles()
            .iter()
            .map(|placed| {
                json!({
                    "id": placed.id,
                    "movable": placed.entity.is_movable(),
                    "sensor": placed.entity.sensor_id().0,
                    "required_items": placed.entity.required_item_names(),
                })
            })
            .collect();
        let output = json!({
            "level": level.name(),
            "report": report,
            "puzzles": puzzles,
        });
        ui.raw(&serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn show_human(&self, level: &Level, report: &ResolveReport, ui: &mut dyn UserInterface) {
        ui.show_header(level.name());

        for placed in level.puzzles() {
            let names = placed.entity.required_item_names();
            let requires = if names.is_empty() {
                "nothing".to_string()
            } else {
                names.join(", ")
            };
            ui.message(&format!("{} requires {}", placed.id, requires));
        }

        ui.show_field("Items", &level.items().len().to_string());
        ui.show_field("Puzzles", &report.puzzles_visited.to_string());
        ui.show_field("Attached", &report.items_attached.to_string());
        ui.show_field("Movable", &report.movable_indexed.to_string());

        if report.is_clean() {
            ui.success(&format!(
                "Resolved {} declaration(s)",
                report.direct_declarations + report.cluster_declarations
            ));
            return;
        }

        if report.unresolved_handles > 0 {
            ui.warning(&format!(
                "{} item index(es) had no registered item",
                report.unresolved_handles
            ));
        }
        if report.skipped_children > 0 {
            ui.warning(&format!(
                "{} cluster child(ren) were not puzzles",
                report.skipped_children
            ));
        }
        if report.sensor_collisions > 0 {
            ui.warning(&format!(
                "{} movable puzzle(s) lost their sensor to another puzzle",
                report.sensor_collisions
            ));
        }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = match load_level(&self.base_dir, self.args.manifest.as_deref(), ui)? {
            Loaded::Manifest(manifest) => manifest,
            Loaded::Failed(result) => return Ok(result),
        };

        if has_errors(&validate(&manifest)) {
            ui.warning("Manifest has errors; run `puzzle-reqs check` for details");
        }

        let level = Level::from_manifest(&manifest);
        let mut lifecycle = LevelLifecycle::new();
        let report = lifecycle.load(&level)?;

        if self.args.json {
            self.show_json(&level, &report, ui)?;
        } else {
            self.show_human(&level, &report, ui);
        }

        Ok(CommandResult::success())
    }
}
