//! Arena snapshot model.

use hexarena_topology::HexCell;
use serde::Serialize;
use serde_json::{Map, Value};

/// An ant as reported in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ant {
    pub q: i64,
    pub r: i64,
    /// Ant role (worker, warrior, scout, ...) as numbered by the game server
    #[serde(rename = "type")]
    pub kind: i64,
    pub health: i64,
    pub id: String,
}

/// A food pile. Fields other than the position are carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Food {
    pub q: i64,
    pub r: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A home (anthill) cell. Fields other than the position are carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Home {
    pub q: i64,
    pub r: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One observed state of the arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaSnapshot {
    pub map: Vec<HexCell>,
    pub ants: Vec<Ant>,
    pub food: Vec<Food>,
    pub home: Vec<Home>,
    pub turn_no: i64,
    pub score: i64,
}

/// Terrain kinds of map tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    AntSpot,
    Plain,
    Dirt,
    Acid,
    Rock,
    Unknown,
}

impl TileKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => TileKind::AntSpot,
            2 => TileKind::Plain,
            3 => TileKind::Dirt,
            4 => TileKind::Acid,
            5 => TileKind::Rock,
            _ => TileKind::Unknown,
        }
    }

    /// Fill colour used by the viewer.
    pub fn color(&self) -> &'static str {
        match self {
            TileKind::AntSpot => "#f7fbff",
            TileKind::Plain => "#d9f0a3",
            TileKind::Dirt => "#fee597",
            TileKind::Acid => "#fdae61",
            TileKind::Rock => "#e6550d",
            TileKind::Unknown => "lightgray",
        }
    }
}

impl From<&HexCell> for TileKind {
    fn from(cell: &HexCell) -> Self {
        TileKind::from_code(cell.kind())
    }
}
