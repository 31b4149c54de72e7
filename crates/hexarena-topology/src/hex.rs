//! Map cells addressed by axial coordinates.
//!
//! Axial coordinates use two axes (q, r) at 60 degrees. A cell's identity is
//! its `(q, r)` pair alone: terrain attributes ride along for display but two
//! cells at the same position are interchangeable as layout and style keys.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A single tile of the arena map.
///
/// Equality, hashing and ordering only look at `(q, r)`.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCell {
    q: i64,
    r: i64,
    /// Terrain kind as reported by the game server
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    kind: i64,
    /// Movement cost of the tile
    #[cfg_attr(feature = "serde", serde(default))]
    cost: i64,
}

impl HexCell {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { q: 0, r: 0, kind: 0, cost: 0 };

    /// Create a cell with no terrain information.
    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r, kind: 0, cost: 0 }
    }

    /// Create a cell carrying terrain kind and movement cost.
    pub const fn with_terrain(q: i64, r: i64, kind: i64, cost: i64) -> Self {
        Self { q, r, kind, cost }
    }

    /// First axial coordinate.
    pub const fn q(&self) -> i64 {
        self.q
    }

    /// Second axial coordinate.
    pub const fn r(&self) -> i64 {
        self.r
    }

    /// Terrain kind.
    pub const fn kind(&self) -> i64 {
        self.kind
    }

    /// Movement cost.
    pub const fn cost(&self) -> i64 {
        self.cost
    }

    /// Implicit third axis: s = -q - r.
    pub const fn s(&self) -> i64 {
        -self.q - self.r
    }

    fn coords(&self) -> (i64, i64) {
        (self.q, self.r)
    }
}

impl PartialEq for HexCell {
    fn eq(&self, other: &Self) -> bool {
        self.coords() == other.coords()
    }
}

impl Eq for HexCell {}

impl Hash for HexCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coords().hash(state);
    }
}

impl PartialOrd for HexCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coords().cmp(&other.coords())
    }
}

impl std::fmt::Display for HexCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
