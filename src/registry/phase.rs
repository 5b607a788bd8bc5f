//! Registry lifecycle phases.

use std::fmt;

use serde::Serialize;

/// Where the registry is in its discovery cycle.
///
/// `Empty -> Discovering -> Resolved`, and back to `Empty` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing registered since construction or the last reset.
    #[default]
    Empty,
    /// At least one item or declaration has been registered.
    Discovering,
    /// Declarations have been resolved; lookups are served.
    Resolved,
}

impl Phase {
    /// Whether registration calls are accepted.
    pub fn accepts_registration(self) -> bool {
        matches!(self, Phase::Empty | Phase::Discovering)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Empty => "empty",
            Phase::Discovering => "discovering",
            Phase::Resolved => "resolved",
        };
        f.write_str(name)
    }
}
