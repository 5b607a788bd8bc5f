//! Deferred item requirement registry.
//!
//! Items and requirement declarations arrive in any order while a level is
//! being discovered. Nothing is linked until [`RequirementRegistry::resolve`]
//! runs, at which point every declaration is matched against the item table
//! in one pass.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use puzzle_reqs::entity::{ItemHandle, SensorId, SpawnLocation};
//! use puzzle_reqs::level::{HostItem, HostPuzzle};
//! use puzzle_reqs::registry::RequirementRegistry;
//!
//! let mut registry = RequirementRegistry::new();
//! let puzzle = Rc::new(HostPuzzle::new("door", true, SensorId(7)));
//!
//! // Declarations may reference items that are not registered yet.
//! registry.declare_requirement(puzzle.clone(), vec![ItemHandle(1)]).unwrap();
//! let cell = Rc::new(HostItem::new("Cell", SpawnLocation::default()));
//! assert_eq!(registry.register_item(cell).unwrap(), ItemHandle(1));
//!
//! registry.resolve().unwrap();
//! assert_eq!(puzzle.required_item_names(), vec!["Cell".to_string()]);
//! assert!(registry.lookup_movable_puzzle(SensorId(7)).is_some());
//! ```
//!
//! # Modules
//!
//! - [`dump`] - Diagnostic report of registered items
//! - [`phase`] - Lifecycle phases
//! - [`resolve`] - The resolve pass and its summary

pub mod dump;
pub mod phase;
pub mod resolve;

pub use dump::{DiagnosticEntry, DiagnosticReport};
pub use phase::Phase;
pub use resolve::ResolveReport;

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::entity::{ClusterEntity, ItemEntity, ItemHandle, PuzzleEntity, SensorId};
use crate::error::RegistryError;

/// A requirement declared against a single puzzle.
struct DirectDeclaration {
    puzzle: Rc<dyn PuzzleEntity>,
    handles: Vec<ItemHandle>,
}

/// A requirement declared against every puzzle child of a cluster.
struct ClusterDeclaration {
    cluster: Rc<dyn ClusterEntity>,
    handles: Vec<ItemHandle>,
}

/// Collects items and requirement declarations for one discovery cycle and
/// links them on [`resolve`](Self::resolve).
///
/// The registry is single threaded: it holds `Rc` references to
/// host-owned entities and is therefore neither `Send` nor `Sync`.
pub struct RequirementRegistry {
    items: BTreeMap<ItemHandle, Rc<dyn ItemEntity>>,
    next_handle: ItemHandle,
    direct: Vec<DirectDeclaration>,
    clusters: Vec<ClusterDeclaration>,
    movable: HashMap<SensorId, Rc<dyn PuzzleEntity>>,
    phase: Phase,
}

impl Default for RequirementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_handle: ItemHandle::FIRST,
            direct: Vec::new(),
            clusters: Vec::new(),
            movable: HashMap::new(),
            phase: Phase::Empty,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Register a discovered item and return its handle.
    ///
    /// Handles are issued as 1, 2, 3, ... in call order. The caller
    /// guarantees one call per physical item. Fails with
    /// [`RegistryError::HandlesExhausted`] instead of wrapping once the
    /// index space is used up; the item is not registered then.
    pub fn register_item(
        &mut self,
        item: Rc<dyn ItemEntity>,
    ) -> Result<ItemHandle, RegistryError> {
        self.begin_discovery("register an item")?;

        let handle = self.next_handle;
        self.next_handle = handle.next().ok_or(RegistryError::HandlesExhausted)?;
        tracing::trace!("registered item '{}' as {}", item.display_name(), handle);
        self.items.insert(handle, item);
        Ok(handle)
    }

    /// Declare that `puzzle` requires the items behind `handles`.
    ///
    /// The handles are not checked until [`resolve`](Self::resolve), so
    /// they may refer to items that have not been registered yet.
    pub fn declare_requirement(
        &mut self,
        puzzle: Rc<dyn PuzzleEntity>,
        handles: Vec<ItemHandle>,
    ) -> Result<(), RegistryError> {
        self.begin_discovery("declare a requirement")?;
        self.direct.push(DirectDeclaration { puzzle, handles });
        Ok(())
    }

    /// Declare that every puzzle child of `cluster` requires the items
    /// behind `handles`.
    ///
    /// Children are enumerated at resolve time, not now.
    pub fn declare_cluster_requirement(
        &mut self,
        cluster: Rc<dyn ClusterEntity>,
        handles: Vec<ItemHandle>,
    ) -> Result<(), RegistryError> {
        self.begin_discovery("declare a cluster requirement")?;
        self.clusters.push(ClusterDeclaration { cluster, handles });
        Ok(())
    }

    /// Find the movable puzzle whose sensor is `sensor`.
    ///
    /// Only movable puzzles that received at least one required item are
    /// indexed. Always `None` before resolve and after reset.
    pub fn lookup_movable_puzzle(&self, sensor: SensorId) -> Option<Rc<dyn PuzzleEntity>> {
        self.movable.get(&sensor).cloned()
    }

    /// Drop all state for the current cycle and restart handles at 1.
    pub fn reset(&mut self) {
        if self.phase != Phase::Empty {
            tracing::debug!(
                "resetting requirement registry ({} items, {} declarations)",
                self.items.len(),
                self.direct.len() + self.clusters.len()
            );
        }
        self.items.clear();
        self.next_handle = ItemHandle::FIRST;
        self.direct.clear();
        self.clusters.clear();
        self.movable.clear();
        self.phase = Phase::Empty;
    }

    /// Number of registered items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Item registered under `handle`, if any.
    pub fn item(&self, handle: ItemHandle) -> Option<&Rc<dyn ItemEntity>> {
        self.items.get(&handle)
    }

    /// Number of pending direct and cluster declarations.
    pub fn pending_declarations(&self) -> (usize, usize) {
        (self.direct.len(), self.clusters.len())
    }

    /// Number of movable puzzles indexed by sensor.
    pub fn movable_count(&self) -> usize {
        self.movable.len()
    }

    fn begin_discovery(&mut self, operation: &'static str) -> Result<(), RegistryError> {
        if !self.phase.accepts_registration() {
            tracing::error!("rejected attempt to {} after resolve", operation);
            return Err(RegistryError::OutOfPhase {
                operation,
                phase: self.phase,
            });
        }
        self.phase = Phase::Discovering;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SpawnLocation;
    use crate::level::{HostItem, HostPuzzle};

    fn item(name: &str) -> Rc<dyn ItemEntity> {
        Rc::new(HostItem::new(name, SpawnLocation::default()))
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = RequirementRegistry::new();
        assert_eq!(registry.phase(), Phase::Empty);
        assert_eq!(registry.item_count(), 0);
        assert_eq!(registry.pending_declarations(), (0, 0));
    }

    #[test]
    fn handles_are_dense_and_start_at_one() {
        let mut registry = RequirementRegistry::new();
        let handles: Vec<u32> = (0..5)
            .map(|i| registry.register_item(item(&format!("item{}", i))).unwrap().get())
            .collect();
        assert_eq!(handles, vec![1, 2, 3, 4, 5]);
        assert_eq!(registry.item_count(), 5);
    }

    #[test]
    fn exhausted_handles_are_an_error() {
        let mut registry = RequirementRegistry::new();
        registry.next_handle = ItemHandle(u32::MAX - 1);

        let last = registry.register_item(item("last")).unwrap();
        let err = registry.register_item(item("overflow")).unwrap_err();

        assert_eq!(last, ItemHandle(u32::MAX - 1));
        assert_eq!(err, RegistryError::HandlesExhausted);
        assert_eq!(registry.item_count(), 1);
    }

    #[test]
    fn registering_moves_to_discovering() {
        let mut registry = RequirementRegistry::new();
        registry.register_item(item("a")).unwrap();
        assert_eq!(registry.phase(), Phase::Discovering);
    }

    #[test]
    fn declaring_moves_to_discovering() {
        let mut registry = RequirementRegistry::new();
        let puzzle = Rc::new(HostPuzzle::new("p", false, SensorId(1)));
        registry.declare_requirement(puzzle, vec![]).unwrap();
        assert_eq!(registry.phase(), Phase::Discovering);
        assert_eq!(registry.pending_declarations(), (1, 0));
    }

    #[test]
    fn item_lookup_by_handle() {
        let mut registry = RequirementRegistry::new();
        let handle = registry.register_item(item("Cell")).unwrap();
        assert_eq!(registry.item(handle).unwrap().display_name(), "Cell");
        assert!(registry.item(ItemHandle(99)).is_none());
    }

    #[test]
    fn register_after_resolve_is_rejected() {
        let mut registry = RequirementRegistry::new();
        registry.register_item(item("a")).unwrap();
        registry.resolve().unwrap();

        let err = registry.register_item(item("b")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::OutOfPhase {
                operation: "register an item",
                phase: Phase::Resolved,
            }
        );
        assert_eq!(registry.item_count(), 1);
    }

    #[test]
    fn declare_after_resolve_is_rejected() {
        let mut registry = RequirementRegistry::new();
        registry.resolve().unwrap();
        let puzzle = Rc::new(HostPuzzle::new("p", false, SensorId(1)));
        assert!(registry
            .declare_requirement(puzzle, vec![ItemHandle(1)])
            .is_err());
        assert_eq!(registry.pending_declarations(), (0, 0));
    }

    #[test]
    fn reset_restarts_handles() {
        let mut registry = RequirementRegistry::new();
        registry.register_item(item("a")).unwrap();
        registry.register_item(item("b")).unwrap();
        registry.reset();

        assert_eq!(registry.phase(), Phase::Empty);
        assert_eq!(registry.register_item(item("c")).unwrap(), ItemHandle(1));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut registry = RequirementRegistry::new();
        registry.reset();
        registry.reset();
        assert_eq!(registry.phase(), Phase::Empty);
        assert_eq!(registry.item_count(), 0);
    }

    #[test]
    fn reset_reopens_registration_after_resolve() {
        let mut registry = RequirementRegistry::new();
        registry.resolve().unwrap();
        registry.reset();
        assert!(registry.register_item(item("a")).is_ok());
    }
}
