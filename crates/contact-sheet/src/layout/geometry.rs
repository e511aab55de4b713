//! Grid geometry calculation
//!
//! This module converts the physical page into a pixel canvas and splits
//! it into equally sized cells.

use crate::types::{GridSpec, PageSpec};

use super::{CellGeometry, GridPosition};

// =============================================================================
// Sheet Geometry
// =============================================================================

/// Pixel geometry of one sheet for a given page format and grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    grid: GridSpec,
    /// Width of the drawable area in pixels
    pub canvas_width: u32,
    /// Height of the drawable area in pixels
    pub canvas_height: u32,
    /// Maximum width of each cell in pixels
    pub cell_width: u32,
    /// Maximum height of each cell in pixels
    pub cell_height: u32,
}

impl SheetGeometry {
    /// Resolve the drawable area and cell size.
    ///
    /// The drawable size is `(page - 2 * margin) * density`, floored. Cells
    /// divide it with integer division; the remainder is left unused after
    /// the last column and row.
    pub fn new(page: &PageSpec, grid: GridSpec) -> Self {
        let (content_width_pt, content_height_pt) = page.content_size_pt();
        let canvas_width = page.pt_to_px(content_width_pt);
        let canvas_height = page.pt_to_px(content_height_pt);

        Self {
            grid,
            canvas_width,
            canvas_height,
            cell_width: canvas_width / grid.columns() as u32,
            cell_height: canvas_height / grid.rows() as u32,
        }
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Row-major grid position of a local index on the page.
    ///
    /// Indices past the page capacity wrap around to the first cells.
    pub fn position(&self, local_index: usize) -> GridPosition {
        let slot = local_index % self.grid.capacity();
        GridPosition::new(slot / self.grid.columns(), slot % self.grid.columns())
    }

    /// Bounds of the cell at `pos`
    pub fn cell(&self, pos: GridPosition) -> CellGeometry {
        CellGeometry {
            x: pos.col as u32 * self.cell_width,
            y: pos.row as u32 * self.cell_height,
            max_width: self.cell_width,
            max_height: self.cell_height,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width_pt: f32, height_pt: f32, margin_pt: f32, dpi: f32) -> PageSpec {
        PageSpec {
            width_pt,
            height_pt,
            margin_pt,
            dpi,
        }
    }

    #[test]
    fn test_a4_canvas_size() {
        let geometry = SheetGeometry::new(&PageSpec::a4(), GridSpec::new(4, 3).unwrap());

        // (595.28 - 60) * 300 / 72 = 2230.33, (841.89 - 60) * 300 / 72 = 3257.875
        assert_eq!(geometry.canvas_width, 2230);
        assert_eq!(geometry.canvas_height, 3257);
        assert_eq!(geometry.cell_width, 743);
        assert_eq!(geometry.cell_height, 814);
    }

    #[test]
    fn test_remainder_pixels_unused() {
        // 100pt at 72dpi = 100px, split into 3 columns
        let page = page(120.0, 120.0, 10.0, 72.0);
        let geometry = SheetGeometry::new(&page, GridSpec::new(3, 3).unwrap());

        assert_eq!(geometry.canvas_width, 100);
        assert_eq!(geometry.cell_width, 33);

        let last = geometry.cell(GridPosition::new(2, 2));
        assert_eq!(last.x + last.max_width, 99);
        assert_eq!(last.y + last.max_height, 99);
    }

    #[test]
    fn test_row_major_positions() {
        let geometry = SheetGeometry::new(&PageSpec::a4(), GridSpec::new(4, 3).unwrap());

        assert_eq!(geometry.position(0), GridPosition::new(0, 0));
        assert_eq!(geometry.position(2), GridPosition::new(0, 2));
        assert_eq!(geometry.position(4), GridPosition::new(1, 1));
        assert_eq!(geometry.position(11), GridPosition::new(3, 2));
    }

    #[test]
    fn test_position_wraps_past_capacity() {
        let geometry = SheetGeometry::new(&PageSpec::a4(), GridSpec::new(2, 2).unwrap());

        assert_eq!(geometry.position(4), GridPosition::new(0, 0));
        assert_eq!(geometry.position(7), GridPosition::new(1, 1));
    }

    #[test]
    fn test_cell_bounds() {
        let page = page(220.0, 320.0, 10.0, 72.0);
        let geometry = SheetGeometry::new(&page, GridSpec::new(3, 2).unwrap());

        // 200 x 300 px canvas, 100 x 100 px cells
        let cell = geometry.cell(GridPosition::new(1, 1));
        assert_eq!(cell.x, 100);
        assert_eq!(cell.y, 100);
        assert_eq!(cell.max_width, 100);
        assert_eq!(cell.max_height, 100);

        let origin = geometry.cell(GridPosition::new(0, 0));
        assert_eq!((origin.x, origin.y), (0, 0));
    }
}
