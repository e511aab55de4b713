pub mod assemble;
pub mod compose;
pub mod constants;
pub mod font;
pub mod label;
pub mod layout;
mod options;
mod paginate;
mod source;
mod stats;
mod types;

pub use assemble::PdfAssembler;
pub use compose::PageComposer;
pub use font::{FontDirectoryLoader, FontLoader, TrueTypeFace, Typeface, resolve_font};
pub use options::*;
pub use paginate::{PageSink, paginate};
pub use source::{SourceImage, scan_directory};
pub use stats::calculate_statistics;
pub use types::*;

use std::path::Path;

/// Compose `images` into a grid PDF at `output_path` using `face` for labels.
///
/// Sheets are staged next to the output file and removed afterwards. On
/// any error no output file is written.
pub fn write_contact_sheet(
    images: &[SourceImage],
    options: &ContactSheetOptions,
    face: &dyn Typeface,
    output_path: impl AsRef<Path>,
) -> Result<SheetStatistics> {
    options.validate()?;
    let output_path = output_path.as_ref();

    let composer = PageComposer::new(
        &options.page,
        options.grid()?,
        options.label_metrics(),
        face,
    );
    log::debug!(
        "Canvas {}x{}px, cells {}x{}px",
        composer.geometry().canvas_width,
        composer.geometry().canvas_height,
        composer.geometry().cell_width,
        composer.geometry().cell_height
    );

    let mut assembler = PdfAssembler::new(&options.page, assemble::parent_dir(output_path))?;
    let stats = paginate(images, &composer, &mut assembler)?;
    assembler.finish(output_path)?;

    Ok(stats)
}

/// Resolve the label font and write the contact sheet off the async runtime
pub async fn generate_pdf(
    images: Vec<SourceImage>,
    options: &ContactSheetOptions,
    output_path: impl AsRef<Path>,
) -> Result<SheetStatistics> {
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // Decoding, resampling and encoding are CPU-bound
    tokio::task::spawn_blocking(move || {
        options.validate()?;
        let face = resolve_font(
            &options.font_loader(),
            &options.font_candidates,
            options.font_size_px(),
        )?;
        log::info!("Label font {} at {}px", face.name(), face.size_px());
        write_contact_sheet(&images, &options, &face, &output_path)
    })
    .await?
}
