//! Level manifest schema.
//!
//! A manifest describes one level for the reference host: the items that
//! spawn in it, the puzzles and clusters that exist, and which item indices
//! each of them requires. Item indices are the handles the registry issues,
//! which follow the order of the `items` list starting at 1.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entity::{Layer, SensorId, SpawnLocation};

/// Root of a level manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LevelManifest {
    /// Level name, shown in output.
    #[serde(default)]
    pub name: Option<String>,

    /// Order the host replays discovery in.
    #[serde(default)]
    pub discovery: DiscoveryOrder,

    /// Items in registration order. The first item gets index 1.
    #[serde(default)]
    pub items: Vec<ItemSpec>,

    /// Stand-alone puzzles.
    #[serde(default)]
    pub puzzles: Vec<PuzzleSpec>,

    /// Clusters of puzzles that share a requirement.
    #[serde(default)]
    pub clusters: Vec<ClusterSpec>,
}

/// Which half of discovery the host replays first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryOrder {
    /// Declare requirements before any item is registered.
    #[default]
    PuzzlesFirst,
    /// Register every item before declaring requirements.
    ItemsFirst,
}

/// A pickupable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    /// Player-facing name.
    pub name: String,

    /// Dimension index.
    #[serde(default)]
    pub dimension: u32,

    /// Layer the item spawns in.
    #[serde(default)]
    pub layer: Layer,

    /// Zone index local to the layer.
    #[serde(default)]
    pub zone: u32,

    /// Zone number shown to players. Defaults to `zone`.
    #[serde(default)]
    pub zone_alias: Option<u32>,
}

impl ItemSpec {
    /// Spawn location described by this spec.
    pub fn location(&self) -> SpawnLocation {
        SpawnLocation {
            dimension: self.dimension,
            layer: self.layer,
            zone: self.zone,
            zone_alias: self.zone_alias.unwrap_or(self.zone),
        }
    }
}

/// A puzzle that can require items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PuzzleSpec {
    /// Identifier, unique across puzzles, clusters and cluster children.
    pub id: String,

    /// Whether the puzzle's sensor moves at runtime.
    #[serde(default)]
    pub movable: bool,

    /// Sensor identity. Assigned automatically when omitted.
    #[serde(default)]
    pub sensor: Option<u64>,

    /// Item indices this puzzle requires.
    #[serde(default)]
    pub required_items: Vec<u32>,
}

/// A cluster of child puzzles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ClusterSpec {
    /// Identifier, unique across puzzles, clusters and cluster children.
    pub id: String,

    /// Item indices every puzzle child requires.
    #[serde(default)]
    pub required_items: Vec<u32>,

    /// Children in host order, each a one-key map such as
    /// `puzzle: { id: c1 }` or `other: sustained`.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    #[schemars(with = "Vec<ChildSpec>")]
    pub children: Vec<ChildSpec>,
}

/// One child slot of a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChildSpec {
    /// A puzzle child. Its own `required_items` are declared directly.
    Puzzle(PuzzleSpec),
    /// A child of another kind, named by its kind.
    Other(String),
}

impl LevelManifest {
    /// Level name, or `"unnamed"`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Every puzzle spec, stand-alone puzzles first, then cluster children
    /// in cluster order.
    pub fn all_puzzles(&self) -> impl Iterator<Item = &PuzzleSpec> {
        let children = self.clusters.iter().flat_map(|cluster| {
            cluster.children.iter().filter_map(|child| match child {
                ChildSpec::Puzzle(spec) => Some(spec),
                ChildSpec::Other(_) => None,
            })
        });
        self.puzzles.iter().chain(children)
    }

    /// Sensor identity of every puzzle, in [`all_puzzles`](Self::all_puzzles) order.
    ///
    /// Explicit sensors are kept as written. Puzzles without one get the
    /// lowest identity from 1 upward not used explicitly anywhere in the
    /// manifest, so automatic identities never collide.
    pub fn sensor_assignments(&self) -> Vec<(&PuzzleSpec, SensorId)> {
        let explicit: HashSet<u64> = self.all_puzzles().filter_map(|p| p.sensor).collect();
        let mut next = 1u64;

        self.all_puzzles()
            .map(|spec| {
                let sensor = match spec.sensor {
                    Some(value) => value,
                    None => {
                        while explicit.contains(&next) {
                            next += 1;
                        }
                        next += 1;
                        next - 1
                    }
                };
                (spec, SensorId(sensor))
            })
            .collect()
    }
}
