//! Layout data types for contact sheets
//!
//! All coordinates are in canvas pixels with the origin at the top-left
//! corner of the drawable area.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Bounds of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    /// Left edge of the cell
    pub x: u32,
    /// Top edge of the cell
    pub y: u32,
    /// Maximum width available to an image
    pub max_width: u32,
    /// Maximum height available to an image
    pub max_height: u32,
}

/// Final placement of a source image on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    /// Scale applied to the native size, never above 1.0
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    /// Left edge of the placed image
    pub x: u32,
    /// Top edge of the placed image
    pub y: u32,
}

impl PlacedImage {
    /// Whether the source pixels need resampling
    pub fn needs_resize(&self, native_width: u32, native_height: u32) -> bool {
        self.width != native_width || self.height != native_height
    }
}

/// A pixel rectangle that may extend past the canvas edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
