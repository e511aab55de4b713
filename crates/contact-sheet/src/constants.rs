//! Shared constants for contact sheet composition
//!
//! This module centralizes the page format, label styling and font
//! defaults used throughout the pipeline.

use image::Rgb;

// =============================================================================
// Page Format
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// A4 width in points (210mm)
pub const A4_WIDTH_PT: f32 = 595.28;

/// A4 height in points (297mm)
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Default margin on every side of the page (points)
pub const DEFAULT_MARGIN_PT: f32 = 30.0;

/// Default raster density of the page canvas
pub const DEFAULT_DPI: f32 = 300.0;

// =============================================================================
// Grid
// =============================================================================

pub const DEFAULT_ROWS: usize = 4;

pub const DEFAULT_COLUMNS: usize = 3;

// =============================================================================
// Labels
// =============================================================================

/// Label font size (points)
pub const DEFAULT_FONT_SIZE_PT: f32 = 10.0;

/// Offset of the label text from the image's top-left corner (points)
pub const DEFAULT_LABEL_PADDING_PT: f32 = 5.0;

/// Extra space around the label text inside its background box (points)
pub const DEFAULT_BACKGROUND_PADDING_PT: f32 = 2.0;

/// Page background
pub const CANVAS_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Label box fill
pub const LABEL_BACKGROUND_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Label text
pub const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

// =============================================================================
// Fonts and Input
// =============================================================================

/// Faces tried in order when resolving the label font
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "Helvetica.ttf",
    "Arial.ttf",
    "arial.ttf",
    "Times New Roman.ttf",
    "DejaVuSans.ttf",
];

/// File extensions picked up by the directory scan (case-sensitive)
pub const DEFAULT_EXTENSIONS: &[&str] = &["png"];

/// Prefix of the scratch directory holding per-page artifacts
pub const ARTIFACT_DIR_PREFIX: &str = "contact-sheet-pages-";

/// Prefix of the output document while it is still being written
pub const PARTIAL_OUTPUT_PREFIX: &str = ".contact-sheet-partial-";
