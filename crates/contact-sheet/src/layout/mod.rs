//! Layout calculation modules for contact sheets
//!
//! This module handles all the geometric calculations for a sheet:
//! - Grid geometry (drawable area, cell bounds, row-major cell order)
//! - Image fitting (non-upscaling scale, centering within a cell)

mod fit;
mod geometry;
mod types;

pub use fit::*;
pub use geometry::*;
pub use types::*;
