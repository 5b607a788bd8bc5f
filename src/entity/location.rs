//! Spatial placement of discovered items.

use std::cmp::Ordering;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Level layer an entity spawned in.
///
/// Ordered the way layers are unlocked: main, then secondary, then third.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    #[default]
    Main,
    Secondary,
    Third,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Main => "MainLayer",
            Layer::Secondary => "SecondaryLayer",
            Layer::Third => "ThirdLayer",
        };
        f.write_str(name)
    }
}

/// Where an item spawned: dimension, layer and zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SpawnLocation {
    /// Dimension index (0 is the base reality).
    pub dimension: u32,
    /// Layer within the dimension.
    pub layer: Layer,
    /// Zone index local to the layer.
    pub zone: u32,
    /// Zone number shown to players. Display only.
    pub zone_alias: u32,
}

impl SpawnLocation {
    /// Compare by the spatial sort key `(dimension, layer, zone)`.
    ///
    /// `zone_alias` does not participate, so two locations in the same zone
    /// compare equal even if their aliases differ.
    pub fn spatial_cmp(&self, other: &Self) -> Ordering {
        (self.dimension, self.layer, self.zone).cmp(&(other.dimension, other.layer, other.zone))
    }
}
