//! Input images and directory discovery

use crate::types::{Result, SheetError};
use image::DynamicImage;
use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// One input image, either on disk or already decoded.
#[derive(Clone)]
pub enum SourceImage {
    /// Decoded on demand when its page is composed
    File(PathBuf),
    /// Pixels held in memory under a display name
    Memory { name: String, image: DynamicImage },
}

impl SourceImage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        SourceImage::File(path.into())
    }

    pub fn in_memory(name: impl Into<String>, image: DynamicImage) -> Self {
        SourceImage::Memory {
            name: name.into(),
            image,
        }
    }

    /// Path used in error messages
    pub fn path(&self) -> PathBuf {
        match self {
            SourceImage::File(path) => path.clone(),
            SourceImage::Memory { name, .. } => PathBuf::from(name),
        }
    }

    /// Decode the pixels. File images are read on each call.
    pub fn decode(&self) -> Result<Cow<'_, DynamicImage>> {
        match self {
            SourceImage::File(path) => image::open(path)
                .map(Cow::Owned)
                .map_err(|source| SheetError::Decode {
                    path: path.clone(),
                    source,
                }),
            SourceImage::Memory { image, .. } => Ok(Cow::Borrowed(image)),
        }
    }
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceImage::File(path) => f.debug_tuple("File").field(path).finish(),
            SourceImage::Memory { name, image } => f
                .debug_struct("Memory")
                .field("name", name)
                .field("width", &image.width())
                .field("height", &image.height())
                .finish(),
        }
    }
}

/// Find the images in `dir` and return them in sheet order.
///
/// Only regular files (or symlinks to them) whose extension exactly matches
/// one of `extensions` are kept. Files are ordered by stem using a stable, case-sensitive
/// comparison. Subdirectories are not searched.
pub async fn scan_directory(
    dir: impl AsRef<Path>,
    extensions: &[String],
) -> Result<Vec<SourceImage>> {
    let dir = dir.as_ref();
    if !tokio::fs::metadata(dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        return Err(SheetError::InputDirectory(dir.to_path_buf()));
    }

    let mut found: Vec<(OsString, PathBuf)> = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext));
        if !matches {
            continue;
        }

        // Follows symlinks
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                log::warn!("Skipping unreadable entry {}: {}", path.display(), e);
                continue;
            }
        }

        let stem = path.file_stem().map(OsString::from).unwrap_or_default();
        found.push((stem, path));
    }

    // Stable: equal stems (a.png, a.jpg) keep directory order
    found.sort_by(|a, b| a.0.cmp(&b.0));

    if found.is_empty() {
        return Err(SheetError::NoImages);
    }

    log::info!("Found {} images in {}", found.len(), dir.display());

    Ok(found
        .into_iter()
        .map(|(_, path)| SourceImage::File(path))
        .collect())
}
