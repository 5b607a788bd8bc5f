//! The resolve pass.
//!
//! Walks every pending declaration once, attaches the registered items to
//! their puzzles and indexes movable puzzles by sensor. Nothing in here is
//! fatal: a bad handle or an unexpected cluster child is logged and
//! skipped so the rest of the level still resolves.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use serde::Serialize;

use super::{Phase, RequirementRegistry};
use crate::entity::{ClusterChild, ItemEntity, ItemHandle, PuzzleEntity, SensorId};
use crate::error::RegistryError;

/// Summary of one resolve pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    /// Direct declarations processed.
    pub direct_declarations: usize,
    /// Cluster declarations processed.
    pub cluster_declarations: usize,
    /// Puzzles the attach step ran for, cluster children included.
    pub puzzles_visited: usize,
    /// Item attachments made across all puzzles.
    pub items_attached: usize,
    /// Handle references that had no registered item.
    pub unresolved_handles: usize,
    /// Cluster children skipped because they were not puzzles.
    pub skipped_children: usize,
    /// Movable puzzles added to the sensor index.
    pub movable_indexed: usize,
    /// Movable puzzles rejected because another puzzle owned the sensor.
    pub sensor_collisions: usize,
}

impl ResolveReport {
    /// Whether the pass hit any degraded case.
    pub fn is_clean(&self) -> bool {
        self.unresolved_handles == 0 && self.skipped_children == 0 && self.sensor_collisions == 0
    }
}

impl RequirementRegistry {
    /// Link every pending declaration to its items.
    ///
    /// Runs once per discovery cycle. A second call without an intervening
    /// [`reset`](Self::reset) returns [`RegistryError::AlreadyResolved`] and
    /// changes nothing.
    pub fn resolve(&mut self) -> Result<ResolveReport, RegistryError> {
        if self.phase == Phase::Resolved {
            tracing::error!("resolve called twice in one discovery cycle");
            return Err(RegistryError::AlreadyResolved);
        }

        let Self {
            items,
            direct,
            clusters,
            movable,
            ..
        } = self;

        let mut report = ResolveReport::default();
        let mut attach = Attach {
            items,
            movable,
            attached: HashSet::new(),
            report: &mut report,
        };

        for declaration in direct.iter() {
            attach.report.direct_declarations += 1;
            attach.run(&declaration.puzzle, &declaration.handles);
        }

        for declaration in clusters.iter() {
            attach.report.cluster_declarations += 1;
            for child in declaration.cluster.children() {
                match child {
                    ClusterChild::Puzzle(puzzle) => attach.run(&puzzle, &declaration.handles),
                    ClusterChild::Other { kind } => {
                        tracing::error!(
                            "cluster '{}' has a child of kind '{}' that cannot take required items",
                            declaration.cluster.label(),
                            kind
                        );
                        attach.report.skipped_children += 1;
                    }
                }
            }
        }

        self.phase = Phase::Resolved;
        tracing::debug!(
            "resolved {} direct and {} cluster declarations: {} items attached, {} unresolved",
            report.direct_declarations,
            report.cluster_declarations,
            report.items_attached,
            report.unresolved_handles
        );
        Ok(report)
    }
}

/// Borrowed state for the attach step.
struct Attach<'a> {
    items: &'a BTreeMap<ItemHandle, Rc<dyn ItemEntity>>,
    movable: &'a mut HashMap<SensorId, Rc<dyn PuzzleEntity>>,
    /// `(puzzle, handle)` pairs attached so far in this pass.
    attached: HashSet<(*const (), ItemHandle)>,
    report: &'a mut ResolveReport,
}

impl Attach<'_> {
    fn run(&mut self, puzzle: &Rc<dyn PuzzleEntity>, handles: &[ItemHandle]) {
        if handles.is_empty() {
            return;
        }
        self.report.puzzles_visited += 1;

        let mut attached_any = false;
        let unique: BTreeSet<ItemHandle> = handles.iter().copied().collect();
        for handle in unique {
            let Some(item) = self.items.get(&handle) else {
                tracing::error!(
                    "puzzle '{}' requires unregistered item index {}",
                    puzzle.label(),
                    handle
                );
                self.report.unresolved_handles += 1;
                continue;
            };

            // A puzzle reached by several declarations gets each item once.
            if !self.attached.insert((entity_key(puzzle), handle)) {
                continue;
            }

            puzzle.attach_required_item(Rc::clone(item));
            self.report.items_attached += 1;
            attached_any = true;
        }

        if attached_any && puzzle.is_movable() {
            self.index_movable(puzzle);
        }
    }

    fn index_movable(&mut self, puzzle: &Rc<dyn PuzzleEntity>) {
        let sensor = puzzle.sensor_id();
        match self.movable.entry(sensor) {
            Entry::Vacant(slot) => {
                slot.insert(Rc::clone(puzzle));
                self.report.movable_indexed += 1;
            }
            Entry::Occupied(existing) if same_entity(existing.get(), puzzle) => {}
            Entry::Occupied(existing) => {
                tracing::warn!(
                    "{} is already owned by puzzle '{}'; ignoring puzzle '{}'",
                    sensor,
                    existing.get().label(),
                    puzzle.label()
                );
                self.report.sensor_collisions += 1;
            }
        }
    }
}

fn same_entity(a: &Rc<dyn PuzzleEntity>, b: &Rc<dyn PuzzleEntity>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

fn entity_key(puzzle: &Rc<dyn PuzzleEntity>) -> *const () {
    Rc::as_ptr(puzzle) as *const ()
}
