//! Assembling snapshots into the data the viewer binds to.

use std::collections::BTreeMap;

use hexarena_topology::{Bounds, CellRect, HexCell, HexLayout};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::model::{Ant, ArenaSnapshot, Food, Home, TileKind};

/// Key a cell is published under, `"q,r"`.
pub fn cell_key(cell: &HexCell) -> String {
    format!("{},{}", cell.q(), cell.r())
}

/// Rendered rectangle of every map cell.
///
/// Serializes as an object from [`cell_key`] to the cell's inline CSS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyleMap {
    rects: BTreeMap<HexCell, CellRect>,
}

impl CellStyleMap {
    /// Lay out all cells against the bounds of the whole map.
    pub fn build(cells: &[HexCell], layout: &HexLayout) -> Self {
        let bounds = Bounds::of(cells);
        let rects = cells
            .iter()
            .map(|cell| (*cell, layout.project(*cell, bounds)))
            .collect();
        Self { rects }
    }

    pub fn get(&self, cell: &HexCell) -> Option<&CellRect> {
        self.rects.get(cell)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HexCell, &CellRect)> {
        self.rects.iter()
    }
}

impl Serialize for CellStyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rects.len()))?;
        for (cell, rect) in &self.rects {
            map.serialize_entry(&cell_key(cell), &rect.to_style())?;
        }
        map.end()
    }
}

/// Everything the viewer needs to draw one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    pub map: Vec<HexCell>,
    pub ants: Vec<Ant>,
    pub food: Vec<Food>,
    pub home: Vec<Home>,
    pub turn_no: i64,
    pub score: i64,
    pub cell_styles: CellStyleMap,
    pub cell_colors: BTreeMap<String, &'static str>,
    pub current_index: usize,
    pub total_documents: usize,
}

impl RenderData {
    /// Assemble with the default layout.
    pub fn assemble(snapshot: ArenaSnapshot, current_index: usize, total_documents: usize) -> Self {
        Self::assemble_with_layout(snapshot, &HexLayout::default(), current_index, total_documents)
    }

    pub fn assemble_with_layout(
        snapshot: ArenaSnapshot,
        layout: &HexLayout,
        current_index: usize,
        total_documents: usize,
    ) -> Self {
        let cell_styles = CellStyleMap::build(&snapshot.map, layout);
        let cell_colors = snapshot
            .map
            .iter()
            .map(|cell| (cell_key(cell), TileKind::from(cell).color()))
            .collect();

        Self {
            map: snapshot.map,
            ants: snapshot.ants,
            food: snapshot.food,
            home: snapshot.home,
            turn_no: snapshot.turn_no,
            score: snapshot.score,
            cell_styles,
            cell_colors,
            current_index,
            total_documents,
        }
    }
}
