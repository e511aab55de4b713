//! PDF assembly from rendered sheets
//!
//! Each sheet is Flate-compressed into a private scratch directory as soon
//! as it is composed, and its canvas is dropped, so at most one raw canvas
//! is alive at a time. `finish` embeds the compressed streams as image
//! XObjects without decoding them again, then writes the document through a
//! temporary file that is renamed into place. The scratch directory is
//! removed when the assembler is dropped, whether or not the run succeeded.

use crate::constants::{ARTIFACT_DIR_PREFIX, PARTIAL_OUTPUT_PREFIX, POINTS_PER_INCH};
use crate::paginate::PageSink;
use crate::types::{PageCanvas, PageSpec, Result, SheetError};
use lopdf::{Dictionary, Stream};
use printpdf::{
    DictItem, ExternalStream, ExternalXObject, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt,
    Px, XObjectTransform,
};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One composed sheet stored on disk as an RGB8 image stream
#[derive(Debug, Clone)]
struct PageArtifact {
    path: PathBuf,
    width: u32,
    height: u32,
    /// Content is zlib data rather than raw pixels
    deflated: bool,
}

impl PageArtifact {
    fn to_xobject(&self, content: Vec<u8>, dpi: f32) -> ExternalXObject {
        let name = |n: &str| DictItem::Name(n.as_bytes().to_vec());
        let mut dict = BTreeMap::from([
            ("Type".to_string(), name("XObject")),
            ("Subtype".to_string(), name("Image")),
            ("Width".to_string(), DictItem::Int(self.width as i64)),
            ("Height".to_string(), DictItem::Int(self.height as i64)),
            ("ColorSpace".to_string(), name("DeviceRGB")),
            ("BitsPerComponent".to_string(), DictItem::Int(8)),
        ]);
        if self.deflated {
            dict.insert("Filter".to_string(), name("FlateDecode"));
        }

        ExternalXObject {
            stream: ExternalStream {
                dict,
                content,
                compress: false,
            },
            width: Some(Px(self.width as usize)),
            height: Some(Px(self.height as usize)),
            dpi: Some(dpi),
        }
    }
}

pub struct PdfAssembler {
    page: PageSpec,
    scratch: TempDir,
    artifacts: Vec<PageArtifact>,
}

impl PdfAssembler {
    /// Create an assembler whose scratch directory lives under `scratch_parent`
    pub fn new(page: &PageSpec, scratch_parent: impl AsRef<Path>) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix(ARTIFACT_DIR_PREFIX)
            .tempdir_in(scratch_parent)?;
        log::debug!("Page artifacts in {}", scratch.path().display());

        Ok(Self {
            page: *page,
            scratch,
            artifacts: Vec::new(),
        })
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    pub fn page_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Build the document from the stored sheets and write it to `output_path`
    pub fn finish(self, output_path: impl AsRef<Path>) -> Result<()> {
        let output_path = output_path.as_ref();
        if self.artifacts.is_empty() {
            return Err(SheetError::NoImages);
        }

        let mut doc = PdfDocument::new("Contact Sheet");
        let mut pages = Vec::with_capacity(self.artifacts.len());

        for (page_index, artifact) in self.artifacts.iter().enumerate() {
            let content =
                std::fs::read(&artifact.path).map_err(|source| SheetError::Artifact {
                    page: page_index,
                    path: artifact.path.clone(),
                    source,
                })?;
            let image_id = doc.add_xobject(&artifact.to_xobject(content, self.page.dpi));

            pages.push(PdfPage::new(
                Mm::from(Pt(self.page.width_pt)),
                Mm::from(Pt(self.page.height_pt)),
                vec![Op::UseXobject {
                    id: image_id,
                    transform: self.placement(artifact.width, artifact.height),
                }],
            ));
        }

        let mut warnings = Vec::new();
        let bytes = doc
            .with_pages(pages)
            .save(&PdfSaveOptions::default(), &mut warnings);
        drop(doc);
        for warning in &warnings {
            log::debug!("PDF warning: {:?}", warning);
        }

        write_atomically(output_path, &bytes)?;
        log::info!(
            "Wrote {} pages to {}",
            self.artifacts.len(),
            output_path.display()
        );

        Ok(())
    }

    /// Stretch a sheet over the content area, origin at the bottom-left margin
    fn placement(&self, px_width: u32, px_height: u32) -> XObjectTransform {
        let (content_width, content_height) = self.page.content_size_pt();
        let natural_width = px_width as f32 * POINTS_PER_INCH / self.page.dpi;
        let natural_height = px_height as f32 * POINTS_PER_INCH / self.page.dpi;

        XObjectTransform {
            translate_x: Some(Pt(self.page.margin_pt)),
            translate_y: Some(Pt(self.page.margin_pt)),
            scale_x: Some(content_width / natural_width),
            scale_y: Some(content_height / natural_height),
            dpi: Some(self.page.dpi),
            ..Default::default()
        }
    }
}

impl PageSink for PdfAssembler {
    fn accept(&mut self, page_index: usize, canvas: PageCanvas) -> Result<()> {
        let (width, height) = canvas.dimensions();

        let mut stream = Stream::new(Dictionary::new(), canvas.into_raw());
        stream.compress().map_err(|e| {
            SheetError::Pdf(format!("Failed to compress page {}: {}", page_index + 1, e))
        })?;
        let deflated = stream.dict.has(b"Filter");

        let path = self
            .scratch
            .path()
            .join(format!("page_{}.stream", page_index + 1));
        std::fs::write(&path, &stream.content).map_err(|source| SheetError::Artifact {
            page: page_index,
            path: path.clone(),
            source,
        })?;

        log::debug!(
            "Saved page {} ({} bytes) to {}",
            page_index + 1,
            stream.content.len(),
            path.display()
        );
        self.artifacts.push(PageArtifact {
            path,
            width,
            height,
            deflated,
        });
        Ok(())
    }
}

/// Directory holding `path`, or the working directory for bare file names
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Replace `path` only once every byte has been written
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(PARTIAL_OUTPUT_PREFIX)
        .suffix(".pdf")
        .tempfile_in(parent_dir(path))?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
