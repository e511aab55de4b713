//! Image placement within cells
//!
//! Images are shrunk to fit their cell while keeping their aspect ratio,
//! then centered. Images smaller than the cell keep their native size.

use super::{CellGeometry, PlacedImage};

/// Calculate the placement of an image inside a cell.
///
/// # Arguments
/// * `native_width` - Width of the source image in pixels
/// * `native_height` - Height of the source image in pixels
/// * `cell` - The cell the image is assigned to
///
/// The same scale is applied to both axes and never exceeds 1.0. Centering
/// uses integer division, so odd leftovers bias toward the top-left.
pub fn fit_image(native_width: u32, native_height: u32, cell: &CellGeometry) -> PlacedImage {
    let scale = calculate_scale(native_width, native_height, cell.max_width, cell.max_height);

    let width = scaled_length(native_width, scale);
    let height = scaled_length(native_height, scale);

    PlacedImage {
        scale,
        width,
        height,
        x: cell.x + cell.max_width.saturating_sub(width) / 2,
        y: cell.y + cell.max_height.saturating_sub(height) / 2,
    }
}

/// Largest scale that fits `native` inside `max` on both axes, capped at 1.0
pub fn calculate_scale(
    native_width: u32,
    native_height: u32,
    max_width: u32,
    max_height: u32,
) -> f64 {
    let scale_w = max_width as f64 / native_width.max(1) as f64;
    let scale_h = max_height as f64 / native_height.max(1) as f64;
    scale_w.min(scale_h).min(1.0)
}

fn scaled_length(native: u32, scale: f64) -> u32 {
    ((native as f64 * scale).floor() as u32).max(1)
}

// =============================================================================
// Tests
// =============================================================================
