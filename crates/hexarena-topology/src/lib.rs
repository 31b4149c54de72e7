//! Hexarena Topology
//!
//! Axial hex cells and the pixel layout used to draw an arena snapshot with
//! absolutely positioned elements.
//!
//! # Layout
//!
//! Cells are laid out in offset rows: every cell is normalized against the
//! smallest `q` and `r` of the whole map, so the top-left cell sits at the
//! origin and every position is non-negative. Odd rows are shifted right by
//! half a column.
//!
//! ```
//! use hexarena_topology::{Bounds, HexCell, HexLayout};
//!
//! let cells = [HexCell::new(0, 0), HexCell::new(1, 1)];
//! let bounds = Bounds::of(&cells);
//! let rect = HexLayout::default().project(cells[1], bounds);
//! assert_eq!(rect.to_style(), "left: 103.9px; top: 60.0px; width: 69.3px; height: 80.0px;");
//! ```

mod hex;
mod layout;

pub use hex::HexCell;
pub use layout::{project, Bounds, CellRect, HexLayout, CELL_SIZE};
