//! Label font resolution and text rendering
//!
//! A [`FontLoader`] knows where to find font files by face name. The label
//! font is resolved once per run from an ordered candidate list with
//! [`resolve_font`]; the resulting [`Typeface`] is shared read-only by every
//! page.

use crate::types::{PageCanvas, Result, SheetError};
use ab_glyph::{FontVec, PxScale};
use image::Rgb;
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};

/// Directory levels searched below each font directory
const MAX_SEARCH_DEPTH: usize = 4;

// =============================================================================
// Typeface
// =============================================================================

/// A sized face that can measure and draw label text.
pub trait Typeface: Send + Sync {
    /// Width and height in pixels of `text` as drawn by [`Typeface::draw`]
    fn measure(&self, text: &str) -> (u32, u32);

    /// Draw `text` with its top-left corner at (x, y)
    fn draw(&self, canvas: &mut PageCanvas, color: Rgb<u8>, x: i32, y: i32, text: &str);
}

/// A TrueType/OpenType face at a fixed pixel size
pub struct TrueTypeFace {
    name: String,
    font: FontVec,
    scale: PxScale,
}

impl TrueTypeFace {
    /// Parse a font file. Returns `None` when the bytes are not a usable font.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>, size_px: f32) -> Option<Self> {
        let font = FontVec::try_from_vec(bytes).ok()?;
        Some(Self {
            name: name.into(),
            font,
            scale: PxScale::from(size_px),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_px(&self) -> f32 {
        self.scale.y
    }
}

impl Typeface for TrueTypeFace {
    fn measure(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    fn draw(&self, canvas: &mut PageCanvas, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("name", &self.name)
            .field("size_px", &self.scale.y)
            .finish()
    }
}

// =============================================================================
// Loaders
// =============================================================================

/// Source of font files, looked up by face name (e.g. `"DejaVuSans.ttf"`).
pub trait FontLoader {
    /// Raw font file contents, or `None` if this loader has no such face.
    fn load_face(&self, face: &str) -> Option<Vec<u8>>;
}

/// Finds faces by file name in a list of font directories.
///
/// A face given as an existing path is read directly.
#[derive(Debug, Clone, Default)]
pub struct FontDirectoryLoader {
    dirs: Vec<PathBuf>,
}

impl FontDirectoryLoader {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The platform's standard font directories
    pub fn system() -> Self {
        Self::new(system_font_dirs())
    }

    /// Search `dirs` before the directories already configured
    pub fn with_dirs(mut self, dirs: &[PathBuf]) -> Self {
        let mut combined = dirs.to_vec();
        combined.append(&mut self.dirs);
        self.dirs = combined;
        self
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl FontLoader for FontDirectoryLoader {
    fn load_face(&self, face: &str) -> Option<Vec<u8>> {
        let direct = Path::new(face);
        if direct.is_file() {
            return std::fs::read(direct).ok();
        }

        self.dirs
            .iter()
            .find_map(|dir| find_file(dir, face, MAX_SEARCH_DEPTH))
            .and_then(|path| {
                log::debug!("Found font {} at {}", face, path.display());
                std::fs::read(path).ok()
            })
    }
}

fn find_file(dir: &Path, file_name: &str, depth: usize) -> Option<PathBuf> {
    let candidate = dir.join(file_name);
    if candidate.is_file() {
        return Some(candidate);
    }
    if depth == 0 {
        return None;
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    subdirs
        .iter()
        .find_map(|sub| find_file(sub, file_name, depth - 1))
}

#[cfg(target_os = "windows")]
fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    } else {
        dirs.push(PathBuf::from(r"C:\Windows\Fonts"));
    }
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        dirs.push(PathBuf::from(local).join(r"Microsoft\Windows\Fonts"));
    }
    dirs
}

#[cfg(target_os = "macos")]
fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts/Supplemental"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join("Library/Fonts"));
    }
    dirs
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    dirs.push(PathBuf::from("/usr/local/share/fonts"));
    dirs.push(PathBuf::from("/usr/share/fonts"));
    dirs
}

// =============================================================================
// Resolution
// =============================================================================

/// Load the first candidate face that the loader can provide and parse.
///
/// There is no fallback face: if every candidate fails the run cannot
/// produce readable labels and `FontNotFound` is returned.
pub fn resolve_font(
    loader: &dyn FontLoader,
    candidates: &[String],
    size_px: f32,
) -> Result<TrueTypeFace> {
    for face in candidates {
        let Some(bytes) = loader.load_face(face) else {
            log::debug!("Font candidate {} not available", face);
            continue;
        };

        match TrueTypeFace::from_bytes(face.clone(), bytes, size_px) {
            Some(font) => {
                log::debug!("Using label font {} at {}px", face, size_px);
                return Ok(font);
            }
            None => log::warn!("Font candidate {} could not be parsed", face),
        }
    }

    Err(SheetError::FontNotFound(candidates.join(", ")))
}

// =============================================================================
// Tests
// =============================================================================
