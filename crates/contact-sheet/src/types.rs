use crate::constants::{A4_HEIGHT_PT, A4_WIDTH_PT, DEFAULT_DPI, DEFAULT_MARGIN_PT, POINTS_PER_INCH};
use image::RgbImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("No images to compose")]
    NoImages,
    #[error("Input directory not found: {0}")]
    InputDirectory(PathBuf),
    #[error("No usable font found (tried: {0})")]
    FontNotFound(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Cannot allocate a {width}x{height} canvas for page {page}")]
    CanvasAllocation { page: usize, width: u32, height: u32 },
    #[error("Failed to access artifact {path} for page {page}: {source}")]
    Artifact {
        page: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// One rendered grid sheet. Owned by the composer while it is drawn,
/// then moved into a [`PageSink`](crate::PageSink).
pub type PageCanvas = RgbImage;

/// Physical page format and raster density.
///
/// Lengths are in points (1/72 inch). `dpi` sets the pixel density of the
/// page canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSpec {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
    pub dpi: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageSpec {
    /// A4 portrait with the default margin and density
    pub fn a4() -> Self {
        Self {
            width_pt: A4_WIDTH_PT,
            height_pt: A4_HEIGHT_PT,
            margin_pt: DEFAULT_MARGIN_PT,
            dpi: DEFAULT_DPI,
        }
    }

    /// Pixels per point at this page's density
    pub fn pixels_per_point(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }

    /// Convert a length in points to whole pixels (floored)
    pub fn pt_to_px(&self, pt: f32) -> u32 {
        (pt * self.pixels_per_point()).floor() as u32
    }

    /// Size of the area inside the margins, in points
    pub fn content_size_pt(&self) -> (f32, f32) {
        (
            self.width_pt - 2.0 * self.margin_pt,
            self.height_pt - 2.0 * self.margin_pt,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let all_positive = [self.width_pt, self.height_pt, self.margin_pt, self.dpi]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !all_positive {
            return Err(SheetError::Config(
                "Page width, height, margin and dpi must be positive".to_string(),
            ));
        }

        if 2.0 * self.margin_pt >= self.width_pt || 2.0 * self.margin_pt >= self.height_pt {
            return Err(SheetError::Config(format!(
                "Margin {}pt leaves no drawable area on a {}x{}pt page",
                self.margin_pt, self.width_pt, self.height_pt
            )));
        }

        Ok(())
    }
}

/// Grid shape of a sheet. Always at least 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    rows: usize,
    columns: usize,
}

impl GridSpec {
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows < 1 || columns < 1 {
            return Err(SheetError::Config(format!(
                "Grid must have at least one row and one column (got {}x{})",
                rows, columns
            )));
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Images per page
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }
}

/// Summary of a run, known before any page is composed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetStatistics {
    /// Number of input images
    pub source_images: usize,
    /// Images per page (rows x columns)
    pub capacity: usize,
    /// Number of output pages
    pub pages: usize,
    /// Cells left blank on the final page
    pub empty_cells: usize,
}
