//! Ordinal labels stamped over placed images

use crate::constants::{LABEL_BACKGROUND_COLOR, LABEL_TEXT_COLOR};
use crate::font::Typeface;
use crate::layout::{PixelRect, PlacedImage};
use crate::types::{PageCanvas, PageSpec};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Label spacing resolved to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMetrics {
    /// Offset of the text from the image's top-left corner
    pub text_padding: u32,
    /// Space between the text box and the edge of its background
    pub background_padding: u32,
}

impl LabelMetrics {
    pub fn from_points(page: &PageSpec, text_padding_pt: f32, background_padding_pt: f32) -> Self {
        Self {
            text_padding: page.pt_to_px(text_padding_pt),
            background_padding: page.pt_to_px(background_padding_pt),
        }
    }
}

/// Everything needed to draw one label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStamp {
    pub ordinal: usize,
    pub text: String,
    /// Top-left corner of the text
    pub anchor: (i32, i32),
    /// Opaque box behind the text
    pub background: PixelRect,
}

impl LabelStamp {
    /// Lay out the label for `ordinal` on an image placed at `placed`.
    pub fn new(
        ordinal: usize,
        placed: &PlacedImage,
        metrics: &LabelMetrics,
        face: &dyn Typeface,
    ) -> Self {
        let text = label_text(ordinal);
        let (text_width, text_height) = face.measure(&text);

        let anchor_x = (placed.x + metrics.text_padding) as i32;
        let anchor_y = (placed.y + metrics.text_padding) as i32;
        let pad = metrics.background_padding;

        Self {
            ordinal,
            text,
            anchor: (anchor_x, anchor_y),
            background: PixelRect::new(
                anchor_x - pad as i32,
                anchor_y - pad as i32,
                text_width + 2 * pad,
                text_height + 2 * pad,
            ),
        }
    }

    /// Fill the background box, then draw the text over it
    pub fn draw(&self, canvas: &mut PageCanvas, face: &dyn Typeface) {
        let bg = &self.background;
        if bg.width > 0 && bg.height > 0 {
            draw_filled_rect_mut(
                canvas,
                Rect::at(bg.x, bg.y).of_size(bg.width, bg.height),
                LABEL_BACKGROUND_COLOR,
            );
        }
        face.draw(
            canvas,
            LABEL_TEXT_COLOR,
            self.anchor.0,
            self.anchor.1,
            &self.text,
        );
    }
}

/// `(N)` for ordinal N
pub fn label_text(ordinal: usize) -> String {
    format!("({})", ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Every character is a solid 6x10 block
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

    fn placed_at(x: u32, y: u32) -> PlacedImage {
        PlacedImage {
            scale: 1.0,
            width: 50,
            height: 50,
            x,
            y,
        }
    }

    #[test]
    fn test_label_text_format() {
        assert_eq!(label_text(1), "(1)");
        assert_eq!(label_text(42), "(42)");
    }

    #[test]
    fn test_metrics_from_points() {
        let metrics = LabelMetrics::from_points(&PageSpec::a4(), 5.0, 2.0);
        // 5 * 300 / 72 = 20.8, 2 * 300 / 72 = 8.3
        assert_eq!(metrics.text_padding, 20);
        assert_eq!(metrics.background_padding, 8);
    }

    #[test]
    fn test_stamp_layout() {
        let metrics = LabelMetrics {
            text_padding: 4,
            background_padding: 2,
        };
        let stamp = LabelStamp::new(12, &placed_at(10, 20), &metrics, &BlockFace);

        assert_eq!(stamp.text, "(12)");
        assert_eq!(stamp.anchor, (14, 24));
        assert_eq!(stamp.background, PixelRect::new(12, 22, 28, 14));
    }

    #[test]
    fn test_draw_fills_background_then_text() {
        let metrics = LabelMetrics {
            text_padding: 4,
            background_padding: 2,
        };
        let stamp = LabelStamp::new(3, &placed_at(0, 0), &metrics, &BlockFace);
        let mut canvas = PageCanvas::from_pixel(60, 40, Rgb([255, 255, 255]));

        stamp.draw(&mut canvas, &BlockFace);

        // Padding ring is background, the text block is text color
        assert_eq!(*canvas.get_pixel(2, 2), LABEL_BACKGROUND_COLOR);
        assert_eq!(*canvas.get_pixel(4, 4), LABEL_TEXT_COLOR);
        assert_eq!(*canvas.get_pixel(21, 13), LABEL_TEXT_COLOR);
        assert_eq!(*canvas.get_pixel(23, 15), LABEL_BACKGROUND_COLOR);
        // Outside the box is untouched
        assert_eq!(*canvas.get_pixel(24, 16), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([255, 255, 255]));
    }
}
