use crate::types::*;

/// Calculate the page count and fill of a run before composing it
pub fn calculate_statistics(image_count: usize, grid: GridSpec) -> Result<SheetStatistics> {
    if image_count == 0 {
        return Err(SheetError::NoImages);
    }

    let capacity = grid.capacity();
    let pages = image_count.div_ceil(capacity);

    Ok(SheetStatistics {
        source_images: image_count,
        capacity,
        pages,
        empty_cells: pages * capacity - image_count,
    })
}
