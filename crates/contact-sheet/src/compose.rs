//! Rendering of a single grid sheet
//!
//! The composer draws up to `rows * columns` images onto one canvas:
//! 1. Allocate a blank canvas of the drawable area
//! 2. Fit and center each image in its row-major cell
//! 3. Stamp each image with its run-wide ordinal

use crate::constants::CANVAS_COLOR;
use crate::font::Typeface;
use crate::label::{LabelMetrics, LabelStamp};
use crate::layout::{SheetGeometry, fit_image};
use crate::source::SourceImage;
use crate::types::{GridSpec, PageCanvas, PageSpec, Result, SheetError};
use image::imageops::{self, FilterType};

/// Renders sheets for one page format, grid and label font.
pub struct PageComposer<'a> {
    geometry: SheetGeometry,
    labels: LabelMetrics,
    face: &'a dyn Typeface,
}

impl<'a> PageComposer<'a> {
    pub fn new(
        page: &PageSpec,
        grid: GridSpec,
        labels: LabelMetrics,
        face: &'a dyn Typeface,
    ) -> Self {
        Self {
            geometry: SheetGeometry::new(page, grid),
            labels,
            face,
        }
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    pub fn grid(&self) -> GridSpec {
        self.geometry.grid()
    }

    /// Compose one sheet.
    ///
    /// `start_ordinal` is the number of images on all earlier pages; the
    /// image at local index `i` is labeled `start_ordinal + i + 1`.
    ///
    /// Callers pass at most one page's worth of images. Extra images are
    /// not rejected: their index wraps modulo the capacity and they are
    /// drawn over the earlier cells.
    pub fn compose(&self, images: &[SourceImage], start_ordinal: usize) -> Result<PageCanvas> {
        let page_index = start_ordinal / self.grid().capacity();
        let mut canvas = self.allocate(page_index)?;

        for (i, image) in images.iter().enumerate() {
            let cell = self.geometry.cell(self.geometry.position(i));

            let decoded = image.decode()?;
            let (native_width, native_height) = (decoded.width(), decoded.height());
            let placed = fit_image(native_width, native_height, &cell);

            let mut pixels = decoded.to_rgb8();
            if placed.needs_resize(native_width, native_height) {
                pixels = imageops::resize(
                    &pixels,
                    placed.width,
                    placed.height,
                    FilterType::Lanczos3,
                );
            }
            imageops::replace(&mut canvas, &pixels, placed.x as i64, placed.y as i64);

            let stamp = LabelStamp::new(start_ordinal + i + 1, &placed, &self.labels, self.face);
            stamp.draw(&mut canvas, self.face);
        }

        Ok(canvas)
    }

    fn allocate(&self, page_index: usize) -> Result<PageCanvas> {
        let width = self.geometry.canvas_width;
        let height = self.geometry.canvas_height;

        let fits = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .is_some_and(|bytes| bytes > 0 && bytes <= isize::MAX as usize);
        if !fits {
            return Err(SheetError::CanvasAllocation {
                page: page_index,
                width,
                height,
            });
        }

        Ok(PageCanvas::from_pixel(width, height, CANVAS_COLOR))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LABEL_BACKGROUND_COLOR, LABEL_TEXT_COLOR};
    use image::{DynamicImage, Rgb, RgbImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

    struct BlockFace;

    impl Typeface for BlockFace {
        fn measure(&self, text: &str) -> (u32, u32) {
            (text.chars().count() as u32 * 6, 10)
        }

        fn draw(&self, canvas: &mut PageCanvas, color: Rgb<u8>, x: i32, y: i32, text: &str) {
            let (w, h) = self.measure(text);
            draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w, h), color);
        }
    }

    /// 200x200 px canvas (72 dpi, 10pt margins), 2x2 grid of 100px cells
    fn composer(face: &BlockFace) -> PageComposer<'_> {
        let page = PageSpec {
            width_pt: 220.0,
            height_pt: 220.0,
            margin_pt: 10.0,
            dpi: 72.0,
        };
        let labels = LabelMetrics {
            text_padding: 4,
            background_padding: 2,
        };
        PageComposer::new(&page, GridSpec::new(2, 2).unwrap(), labels, face)
    }

    fn solid(name: &str, width: u32, height: u32, color: Rgb<u8>) -> SourceImage {
        let image = RgbImage::from_pixel(width, height, color);
        SourceImage::in_memory(name, DynamicImage::ImageRgb8(image))
    }

    fn region_is(canvas: &PageCanvas, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) -> bool {
        (y..y + h).all(|py| (x..x + w).all(|px| *canvas.get_pixel(px, py) == color))
    }

    #[test]
    fn test_canvas_size_and_background() {
        let face = BlockFace;
        let canvas = composer(&face).compose(&[], 0).unwrap();

        assert_eq!(canvas.dimensions(), (200, 200));
        assert!(region_is(&canvas, 0, 0, 200, 200, CANVAS_COLOR));
    }

    #[test]
    fn test_small_image_centered_with_label() {
        let face = BlockFace;
        let canvas = composer(&face)
            .compose(&[solid("a", 40, 20, RED)], 0)
            .unwrap();

        // Placed at (30, 40); label box covers (32..54, 42..56)
        assert_eq!(*canvas.get_pixel(30, 40), RED);
        assert_eq!(*canvas.get_pixel(69, 59), RED);
        assert_eq!(*canvas.get_pixel(29, 40), CANVAS_COLOR);
        assert_eq!(*canvas.get_pixel(70, 59), CANVAS_COLOR);
        assert_eq!(*canvas.get_pixel(32, 42), LABEL_BACKGROUND_COLOR);
        assert_eq!(*canvas.get_pixel(34, 44), LABEL_TEXT_COLOR);
        assert_eq!(*canvas.get_pixel(60, 50), RED);
    }

    #[test]
    fn test_large_image_scaled_into_cell() {
        let face = BlockFace;
        let images = [solid("a", 10, 10, RED), solid("b", 400, 200, BLUE)];
        let canvas = composer(&face).compose(&images, 0).unwrap();

        // 400x200 at scale 0.25 -> 100x50 at (100, 25) in cell (0, 1)
        assert!(region_is(&canvas, 130, 45, 70, 30, BLUE));
        assert!(region_is(&canvas, 100, 0, 100, 25, CANVAS_COLOR));
        assert!(region_is(&canvas, 100, 75, 100, 25, CANVAS_COLOR));
    }

    #[test]
    fn test_partial_page_leaves_cells_blank() {
        let face = BlockFace;
        let images = [
            solid("a", 50, 50, RED),
            solid("b", 50, 50, RED),
            solid("c", 50, 50, RED),
        ];
        let canvas = composer(&face).compose(&images, 4).unwrap();

        assert!(region_is(&canvas, 100, 100, 100, 100, CANVAS_COLOR));
        // Third image sits in cell (1, 0) at (25, 125), its label box at (27, 127)
        assert_eq!(*canvas.get_pixel(25, 125), RED);
        assert_eq!(*canvas.get_pixel(27, 127), LABEL_BACKGROUND_COLOR);
    }

    #[test]
    fn test_label_width_follows_ordinal() {
        let face = BlockFace;
        let composer = composer(&face);
        let image = [solid("a", 100, 100, RED)];

        // "(5)" is 18px wide, "(105)" is 30px; box starts at x = 2
        let short = composer.compose(&image, 4).unwrap();
        let long = composer.compose(&image, 104).unwrap();

        assert_eq!(*short.get_pixel(30, 8), RED);
        assert_eq!(*long.get_pixel(30, 8), LABEL_TEXT_COLOR);
        assert_eq!(*long.get_pixel(35, 8), LABEL_BACKGROUND_COLOR);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let face = BlockFace;
        let composer = composer(&face);
        let images = [solid("a", 300, 120, BLUE), solid("b", 33, 77, GREEN)];

        let first = composer.compose(&images, 8).unwrap();
        let second = composer.compose(&images, 8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_images_wrap_into_first_cell() {
        let face = BlockFace;
        let images = [
            solid("a", 100, 100, RED),
            solid("b", 10, 10, RED),
            solid("c", 10, 10, RED),
            solid("d", 10, 10, RED),
            solid("e", 20, 20, GREEN),
        ];
        let canvas = composer(&face).compose(&images, 0).unwrap();

        // Fifth image lands centered in cell (0, 0) over the first
        assert_eq!(*canvas.get_pixel(59, 59), GREEN);
        assert_eq!(*canvas.get_pixel(90, 90), RED);
        assert_eq!(*canvas.get_pixel(42, 42), LABEL_BACKGROUND_COLOR);
    }

    #[test]
    fn test_decode_failure_propagates() {
        let face = BlockFace;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"garbage").unwrap();

        let images = [solid("a", 10, 10, RED), SourceImage::from_path(&path)];
        match composer(&face).compose(&images, 0) {
            Err(SheetError::Decode { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Decode error, got {:?}", other.map(|_| ())),
        }
    }
}
