//! Capabilities the registry needs from host-owned entities.
//!
//! The registry never builds or destroys items, puzzles or clusters. It sees
//! them only through the traits in this module and holds shared references
//! (`Rc<dyn ...>`) until the next reset.
//!
//! # Modules
//!
//! - [`location`] - Spawn location and the spatial sort key

pub mod location;

pub use location::{Layer, SpawnLocation};

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

/// Index assigned to an item when it is registered.
///
/// Handles start at 1 and are dense within a discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemHandle(pub u32);

impl ItemHandle {
    /// The first handle issued in every cycle.
    pub const FIRST: ItemHandle = ItemHandle(1);

    /// Raw index value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The handle after this one, or `None` once the index space runs out.
    pub(crate) fn next(self) -> Option<ItemHandle> {
        self.0.checked_add(1).map(ItemHandle)
    }
}

impl From<u32> for ItemHandle {
    fn from(value: u32) -> Self {
        ItemHandle(value)
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the runtime sensor owned by a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SensorId(pub u64);

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sensor#{}", self.0)
    }
}

/// A pickupable item that puzzles can require.
pub trait ItemEntity {
    /// Player-facing name of the item.
    fn display_name(&self) -> String;

    /// Where the item spawned.
    fn spawn_location(&self) -> SpawnLocation;
}

/// A puzzle objective that can require items to be present.
///
/// Attachment takes `&self`: the entity is shared with its host, which is
/// expected to use interior mutability.
pub trait PuzzleEntity {
    /// Short name used in log lines.
    fn label(&self) -> String;

    /// Add `item` to the puzzle's required objective items.
    ///
    /// Calls accumulate; they never replace earlier attachments.
    fn attach_required_item(&self, item: Rc<dyn ItemEntity>);

    /// Whether the puzzle's sensor can change position at runtime.
    fn is_movable(&self) -> bool;

    /// Identity of the puzzle's sensor.
    fn sensor_id(&self) -> SensorId;
}

/// A child slot of a cluster, as the host reports it.
#[derive(Clone)]
pub enum ClusterChild {
    /// A child that accepts required items.
    Puzzle(Rc<dyn PuzzleEntity>),
    /// A child of some other kind. It cannot take requirements.
    Other { kind: String },
}

impl fmt::Debug for ClusterChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterChild::Puzzle(puzzle) => f.debug_tuple("Puzzle").field(&puzzle.label()).finish(),
            ClusterChild::Other { kind } => f.debug_struct("Other").field("kind", kind).finish(),
        }
    }
}

/// A group entity that owns several child puzzles.
pub trait ClusterEntity {
    /// Short name used in log lines.
    fn label(&self) -> String;

    /// Current children, in host order.
    fn children(&self) -> Vec<ClusterChild>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_start_at_one() {
        assert_eq!(ItemHandle::FIRST.get(), 1);
        assert_eq!(ItemHandle::FIRST.next(), Some(ItemHandle(2)));
    }

    #[test]
    fn last_handle_has_no_successor() {
        assert_eq!(ItemHandle(u32::MAX).next(), None);
    }

    #[test]
    fn handle_displays_raw_index() {
        assert_eq!(ItemHandle(7).to_string(), "7");
    }

    #[test]
    fn sensor_display() {
        assert_eq!(SensorId(42).to_string(), "sensor#42");
    }

    #[test]
    fn handle_serializes_transparently() {
        let json = serde_json::to_string(&ItemHandle(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn other_child_debug_shows_kind() {
        let child = ClusterChild::Other {
            kind: "sustained".into(),
        };
        assert!(format!("{:?}", child).contains("sustained"));
    }
}
