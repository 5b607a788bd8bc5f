//! Level lifecycle hooks around a requirement registry.
//!
//! A host tears a level down, discovers the next one, then enters it.
//! [`LevelLifecycle`] maps those moments onto the registry:
//!
//! - `on_cleanup` resets the registry
//! - `discover` replays items and declarations in the level's discovery order
//! - `on_enter` resolves and logs the item dump

use std::rc::Rc;

use crate::entity::{PuzzleEntity, SensorId};
use crate::error::Result;
use crate::level::host::Level;
use crate::level::manifest::DiscoveryOrder;
use crate::registry::{DiagnosticReport, RequirementRegistry, ResolveReport};

/// Drives one [`RequirementRegistry`] through successive levels.
#[derive(Default)]
pub struct LevelLifecycle {
    registry: RequirementRegistry,
}

impl LevelLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The level is being torn down; forget everything about it.
    pub fn on_cleanup(&mut self) {
        self.registry.reset();
    }

    /// Replay the discovery sequence of `level` into the registry.
    ///
    /// Items are always registered in manifest order so their handles match
    /// the indices the manifest uses.
    pub fn discover(&mut self, level: &Level) -> Result<()> {
        tracing::debug!(
            "discovering level '{}' ({} items, {} puzzles, {} clusters, {:?})",
            level.name(),
            level.items().len(),
            level.puzzles().len(),
            level.clusters().len(),
            level.discovery_order()
        );

        match level.discovery_order() {
            DiscoveryOrder::PuzzlesFirst => {
                self.declare_all(level)?;
                self.register_items(level)?;
            }
            DiscoveryOrder::ItemsFirst => {
                self.register_items(level)?;
                self.declare_all(level)?;
            }
        }
        Ok(())
    }

    /// The level has been entered; link requirements and log the item dump.
    pub fn on_enter(&mut self) -> Result<ResolveReport> {
        let report = self.registry.resolve()?;
        let dump = self.registry.diagnostic_dump();
        tracing::debug!("level items:\n{}", dump);
        Ok(report)
    }

    /// Run a whole cycle for `level`: cleanup, discovery, enter.
    pub fn load(&mut self, level: &Level) -> Result<ResolveReport> {
        self.on_cleanup();
        self.discover(level)?;
        self.on_enter()
    }

    /// Movable puzzle owning `sensor`, if one was indexed.
    pub fn movable_puzzle(&self, sensor: SensorId) -> Option<Rc<dyn PuzzleEntity>> {
        self.registry.lookup_movable_puzzle(sensor)
    }

    /// Item dump of the current cycle.
    pub fn diagnostic_dump(&self) -> DiagnosticReport {
        self.registry.diagnostic_dump()
    }

    pub fn registry(&self) -> &RequirementRegistry {
        &self.registry
    }

    fn register_items(&mut self, level: &Level) -> Result<()> {
        for item in level.items() {
            self.registry.register_item(item.clone())?;
        }
        Ok(())
    }

    fn declare_all(&mut self, level: &Level) -> Result<()> {
        for puzzle in level.puzzles() {
            if !puzzle.required.is_empty() {
                self.registry
                    .declare_requirement(puzzle.entity.clone(), puzzle.required.clone())?;
            }
        }
        for cluster in level.clusters() {
            if !cluster.required.is_empty() {
                self.registry
                    .declare_cluster_requirement(cluster.entity.clone(), cluster.required.clone())?;
            }
        }
        Ok(())
    }
}
