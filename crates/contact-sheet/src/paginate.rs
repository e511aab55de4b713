//! Splitting an image list into sheets

use crate::compose::PageComposer;
use crate::source::SourceImage;
use crate::stats::calculate_statistics;
use crate::types::{PageCanvas, Result, SheetStatistics};

/// Receives finished sheets in page order.
pub trait PageSink {
    /// Take ownership of the canvas for page `page_index` (0-based)
    fn accept(&mut self, page_index: usize, canvas: PageCanvas) -> Result<()>;
}

/// Keeps every sheet in memory
impl PageSink for Vec<PageCanvas> {
    fn accept(&mut self, _page_index: usize, canvas: PageCanvas) -> Result<()> {
        self.push(canvas);
        Ok(())
    }
}

/// Compose every page of `images` and stream the sheets into `sink`.
///
/// Pages hold `capacity` consecutive images in input order; only the last
/// may be short. Page `k` continues numbering at `k * capacity + 1`. Each
/// sheet is handed to the sink before the next one is composed, and the
/// first error stops the run.
pub fn paginate(
    images: &[SourceImage],
    composer: &PageComposer<'_>,
    sink: &mut dyn PageSink,
) -> Result<SheetStatistics> {
    let stats = calculate_statistics(images.len(), composer.grid())?;
    let capacity = stats.capacity;

    for (page_index, chunk) in images.chunks(capacity).enumerate() {
        let canvas = composer.compose(chunk, page_index * capacity)?;
        log::debug!(
            "Composed page {}/{} ({} images)",
            page_index + 1,
            stats.pages,
            chunk.len()
        );
        sink.accept(page_index, canvas)?;
    }

    Ok(stats)
}
