//! In-memory host entities.
//!
//! These stand in for the engine objects a real host would hand to the
//! registry. A [`Level`] owns one set of them, built from a manifest.

use std::cell::RefCell;
use std::rc::Rc;

use crate::entity::{
    ClusterChild, ClusterEntity, ItemEntity, ItemHandle, PuzzleEntity, SensorId, SpawnLocation,
};
use crate::level::manifest::{ChildSpec, DiscoveryOrder, LevelManifest};

/// A pickupable item.
#[derive(Debug)]
pub struct HostItem {
    name: String,
    location: SpawnLocation,
}

impl HostItem {
    pub fn new(name: impl Into<String>, location: SpawnLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

impl ItemEntity for HostItem {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn spawn_location(&self) -> SpawnLocation {
        self.location
    }
}

/// A puzzle that records the items attached to it.
pub struct HostPuzzle {
    label: String,
    movable: bool,
    sensor: SensorId,
    required: RefCell<Vec<Rc<dyn ItemEntity>>>,
}

impl HostPuzzle {
    pub fn new(label: impl Into<String>, movable: bool, sensor: SensorId) -> Self {
        Self {
            label: label.into(),
            movable,
            sensor,
            required: RefCell::new(Vec::new()),
        }
    }

    /// Names of the attached items, in attachment order.
    pub fn required_item_names(&self) -> Vec<String> {
        self.required
            .borrow()
            .iter()
            .map(|item| item.display_name())
            .collect()
    }

    /// Number of attached items.
    pub fn required_count(&self) -> usize {
        self.required.borrow().len()
    }
}

impl PuzzleEntity for HostPuzzle {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn attach_required_item(&self, item: Rc<dyn ItemEntity>) {
        self.required.borrow_mut().push(item);
    }

    fn is_movable(&self) -> bool {
        self.movable
    }

    fn sensor_id(&self) -> SensorId {
        self.sensor
    }
}

/// A cluster whose children can change until resolve.
pub struct HostCluster {
    label: String,
    children: RefCell<Vec<ClusterChild>>,
}

impl HostCluster {
    pub fn new(label: impl Into<String>, children: Vec<ClusterChild>) -> Self {
        Self {
            label: label.into(),
            children: RefCell::new(children),
        }
    }

    /// Add a child after construction, as hosts do when clusters spawn
    /// their children lazily.
    pub fn push_child(&self, child: ClusterChild) {
        self.children.borrow_mut().push(child);
    }
}

impl ClusterEntity for HostCluster {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn children(&self) -> Vec<ClusterChild> {
        self.children.borrow().clone()
    }
}

/// A puzzle placed in a level, with its own requirement.
pub struct PlacedPuzzle {
    pub id: String,
    pub entity: Rc<HostPuzzle>,
    pub required: Vec<ItemHandle>,
}

/// A cluster placed in a level, with the requirement shared by its children.
pub struct PlacedCluster {
    pub id: String,
    pub entity: Rc<HostCluster>,
    pub required: Vec<ItemHandle>,
}

/// Every entity of one level, ready to be replayed into a registry.
pub struct Level {
    name: String,
    order: DiscoveryOrder,
    items: Vec<Rc<HostItem>>,
    puzzles: Vec<PlacedPuzzle>,
    clusters: Vec<PlacedCluster>,
}

impl Level {
    /// Build the entities a manifest describes.
    ///
    /// Cluster children that are puzzles are listed in [`puzzles`](Self::puzzles)
    /// after the stand-alone puzzles, carrying their own requirement.
    pub fn from_manifest(manifest: &LevelManifest) -> Self {
        let items = manifest
            .items
            .iter()
            .map(|spec| Rc::new(HostItem::new(spec.name.clone(), spec.location())))
            .collect();

        let puzzles: Vec<PlacedPuzzle> = manifest
            .sensor_assignments()
            .into_iter()
            .map(|(spec, sensor)| PlacedPuzzle {
                id: spec.id.clone(),
                entity: Rc::new(HostPuzzle::new(spec.id.clone(), spec.movable, sensor)),
                required: handles(&spec.required_items),
            })
            .collect();

        // Children appear in `puzzles` in cluster order, right after the
        // stand-alone puzzles.
        let mut child_index = manifest.puzzles.len();
        let mut clusters = Vec::with_capacity(manifest.clusters.len());
        for spec in &manifest.clusters {
            let children = spec
                .children
                .iter()
                .map(|child| match child {
                    ChildSpec::Puzzle(_) => {
                        let placed = &puzzles[child_index];
                        child_index += 1;
                        ClusterChild::Puzzle(placed.entity.clone())
                    }
                    ChildSpec::Other(kind) => ClusterChild::Other { kind: kind.clone() },
                })
                .collect();
            clusters.push(PlacedCluster {
                id: spec.id.clone(),
                entity: Rc::new(HostCluster::new(spec.id.clone(), children)),
                required: handles(&spec.required_items),
            });
        }

        Self {
            name: manifest.display_name().to_string(),
            order: manifest.discovery,
            items,
            puzzles,
            clusters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Order discovery is replayed in.
    pub fn discovery_order(&self) -> DiscoveryOrder {
        self.order
    }

    /// Items in registration order.
    pub fn items(&self) -> &[Rc<HostItem>] {
        &self.items
    }

    /// Every puzzle, cluster children included.
    pub fn puzzles(&self) -> &[PlacedPuzzle] {
        &self.puzzles
    }

    pub fn clusters(&self) -> &[PlacedCluster] {
        &self.clusters
    }

    /// Find a puzzle by id.
    pub fn puzzle(&self, id: &str) -> Option<&PlacedPuzzle> {
        self.puzzles.iter().find(|p| p.id == id)
    }

    /// Id of the puzzle backing `entity`, if it belongs to this level.
    pub fn puzzle_id_of(&self, entity: &Rc<dyn PuzzleEntity>) -> Option<&str> {
        self.puzzles
            .iter()
            .find(|p| std::ptr::addr_eq(Rc::as_ptr(&p.entity), Rc::as_ptr(entity)))
            .map(|p| p.id.as_str())
    }
}

fn handles(indices: &[u32]) -> Vec<ItemHandle> {
    indices.iter().copied().map(ItemHandle::from).collect()
}
