//! Diagnostic listing of every registered item.
//!
//! Level authors reference items by the index the registry hands out, so
//! the dump lists each item with its index, grouped by where it spawned.

use std::fmt;

use serde::Serialize;

use super::RequirementRegistry;
use crate::entity::{ItemHandle, SpawnLocation};

/// One registered item in a [`DiagnosticReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEntry {
    /// Index the item was registered under.
    pub handle: ItemHandle,
    /// Player-facing item name.
    pub name: String,
    /// Where the item spawned.
    pub location: SpawnLocation,
}

/// Every registered item, ordered by dimension, layer and zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub entries: Vec<DiagnosticEntry>,
}

impl DiagnosticReport {
    /// Number of items listed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no items were registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "Item Name: {}", entry.name)?;
            writeln!(
                f,
                "Zone {}, Layer {}, Dim {}",
                entry.location.zone_alias, entry.location.layer, entry.location.dimension
            )?;
            writeln!(f, "Item Index: {}", entry.handle)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl RequirementRegistry {
    /// Build a report of every registered item.
    ///
    /// Items are sorted by `(dimension, layer, zone)`; items in the same
    /// zone keep their registration order.
    pub fn diagnostic_dump(&self) -> DiagnosticReport {
        // The item table iterates in handle order, and sort_by is stable.
        let mut entries: Vec<DiagnosticEntry> = self
            .items
            .iter()
            .map(|(handle, item)| DiagnosticEntry {
                handle: *handle,
                name: item.display_name(),
                location: item.spawn_location(),
            })
            .collect();
        entries.sort_by(|a, b| a.location.spatial_cmp(&b.location));

        DiagnosticReport { entries }
    }
}
