//! Pixel layout of axial cells.
//!
//! Rows are laid out top to bottom with odd rows pushed right by half a
//! column ("odd-r" offset layout). The rendered box is taller than the row
//! pitch by a factor of 4/3 so neighbouring rows overlap the way a hex
//! tiling does.

use crate::hex::HexCell;

/// Cell radius in layout units.
pub const CELL_SIZE: f64 = 40.0;

/// Smallest `q` and `r` over a map, used to normalize every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min_q: i64,
    pub min_r: i64,
}

impl Bounds {
    pub const fn new(min_q: i64, min_r: i64) -> Self {
        Self { min_q, min_r }
    }

    /// Compute the bounds of a set of cells. An empty map yields `(0, 0)`.
    pub fn of<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a HexCell>,
    {
        let mut min: Option<(i64, i64)> = None;
        for cell in cells {
            min = Some(match min {
                None => (cell.q(), cell.r()),
                Some((q, r)) => (q.min(cell.q()), r.min(cell.r())),
            });
        }
        let (min_q, min_r) = min.unwrap_or((0, 0));
        Self { min_q, min_r }
    }
}

/// Absolute position and size of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    /// Inline CSS for the rectangle, every number fixed to one decimal.
    pub fn to_style(&self) -> String {
        format!(
            "left: {:.1}px; top: {:.1}px; width: {:.1}px; height: {:.1}px;",
            self.left, self.top, self.width, self.height
        )
    }
}

impl std::fmt::Display for CellRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_style())
    }
}

/// Projects axial cells onto a 2D plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    size: f64,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self { size: CELL_SIZE }
    }
}

impl HexLayout {
    /// Layout with a custom cell radius.
    pub const fn with_size(size: f64) -> Self {
        Self { size }
    }

    /// Horizontal distance between adjacent columns.
    pub fn column_width(&self) -> f64 {
        3f64.sqrt() * self.size
    }

    /// Vertical distance between adjacent rows.
    pub fn row_height(&self) -> f64 {
        self.size * 1.5
    }

    /// Rectangle for a cell, normalized against the map bounds.
    pub fn project(&self, cell: HexCell, bounds: Bounds) -> CellRect {
        self.project_axial(cell.q(), cell.r(), bounds)
    }

    /// Rectangle for raw axial coordinates.
    pub fn project_axial(&self, q: i64, r: i64, bounds: Bounds) -> CellRect {
        let width = self.column_width();
        let height = self.row_height();

        // i128 so that any pair of i64 coordinates has a representable offset
        let norm_q = i128::from(q) - i128::from(bounds.min_q);
        let norm_r = i128::from(r) - i128::from(bounds.min_r);

        // rem_euclid keeps the shift in {0, 1} even for out-of-bounds input
        let shift = norm_r.rem_euclid(2) as f64;
        let x = norm_q as f64 * width + shift * width / 2.0;
        let y = norm_r as f64 * height;

        CellRect {
            left: x,
            top: y,
            width,
            height: height * 4.0 / 3.0,
        }
    }
}

/// Project `(q, r)` with the default cell size.
pub fn project(q: i64, r: i64, min_q: i64, min_r: i64) -> CellRect {
    HexLayout::default().project_axial(q, r, Bounds::new(min_q, min_r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn origin_cell_sits_at_zero() {
        let rect = project(0, 0, 0, 0);
        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.top, 0.0);
        assert!((rect.width - 69.282_032_302_755_09).abs() < EPS);
        assert!((rect.height - 80.0).abs() < EPS);
        assert_eq!(
            rect.to_style(),
            "left: 0.0px; top: 0.0px; width: 69.3px; height: 80.0px;"
        );
    }

    #[test]
    fn odd_rows_shift_half_a_column() {
        let even = project(2, 2, 0, 0);
        let odd = project(2, 3, 0, 0);
        let half = HexLayout::default().column_width() / 2.0;
        assert!((odd.left - even.left - half).abs() < EPS);
        assert!((odd.top - 180.0).abs() < EPS);
        assert_eq!(odd.to_style(), "left: 173.2px; top: 180.0px; width: 69.3px; height: 80.0px;");
    }

    #[test]
    fn negative_coordinates_normalize() {
        // Row -3 against min_r -4 is normalized row 1, which is odd
        let rect = project(-5, -3, -5, -4);
        assert!((rect.left - HexLayout::default().column_width() / 2.0).abs() < EPS);
        assert!((rect.top - 60.0).abs() < EPS);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let rect = project(i64::MAX, i64::MAX, -1, i64::MIN);
        assert!(rect.left.is_finite() && rect.left > 0.0);
        assert!(rect.top.is_finite() && rect.top > 0.0);

        let cells = [HexCell::new(i64::MAX, 0), HexCell::new(-1, 0)];
        let bounds = Bounds::of(&cells);
        assert_eq!(bounds, Bounds::new(-1, 0));
        let layout = HexLayout::default();
        let rect = layout.project(cells[0], bounds);
        let columns = rect.left / layout.column_width();
        assert!((columns / 2f64.powi(63) - 1.0).abs() < 1e-12);
        assert_eq!(rect.top, 0.0);
    }

    #[test]
    fn bounds_of_map() {
        let cells = [HexCell::new(3, -1), HexCell::new(-2, 4), HexCell::new(0, 0)];
        assert_eq!(Bounds::of(&cells), Bounds::new(-2, -1));
    }

    #[test]
    fn bounds_of_empty_map() {
        let cells: [HexCell; 0] = [];
        assert_eq!(Bounds::of(&cells), Bounds::default());
    }

    #[test]
    fn custom_size_scales_linearly() {
        let layout = HexLayout::with_size(20.0);
        let rect = layout.project(HexCell::new(1, 1), Bounds::default());
        let base = project(1, 1, 0, 0);
        assert!((rect.left * 2.0 - base.left).abs() < EPS);
        assert!((rect.height * 2.0 - base.height).abs() < EPS);
    }

    proptest! {
        #[test]
        fn positions_are_non_negative(
            min_q in -10_000i64..10_000,
            min_r in -10_000i64..10_000,
            dq in 0i64..10_000,
            dr in 0i64..10_000,
        ) {
            let rect = project(min_q + dq, min_r + dr, min_q, min_r);
            prop_assert!(rect.left >= 0.0);
            prop_assert!(rect.top >= 0.0);
        }

        #[test]
        fn translation_covariant(
            q in -1_000i64..1_000,
            r in -1_000i64..1_000,
            min_q in -2_000i64..-1_000,
            min_r in -2_000i64..-1_000,
            shift_q in -5_000i64..5_000,
            shift_r in -5_000i64..5_000,
        ) {
            let base = project(q, r, min_q, min_r);
            let moved = project(q + shift_q, r + shift_r, min_q + shift_q, min_r + shift_r);
            prop_assert_eq!(base, moved);
        }
    }
}
