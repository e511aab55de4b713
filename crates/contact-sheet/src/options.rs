use crate::constants::*;
use crate::font::FontDirectoryLoader;
use crate::label::LabelMetrics;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Label sizes in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelStyle {
    pub font_size_pt: f32,
    /// Offset of the text from the image's top-left corner
    pub padding_pt: f32,
    /// Space between the text and the edge of its background box
    pub background_padding_pt: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            padding_pt: DEFAULT_LABEL_PADDING_PT,
            background_padding_pt: DEFAULT_BACKGROUND_PADDING_PT,
        }
    }
}

/// Complete contact sheet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContactSheetOptions {
    // Grid
    pub rows: usize,
    pub columns: usize,

    // Page format
    pub page: PageSpec,

    // Labels
    pub label: LabelStyle,
    pub font_candidates: Vec<String>,
    pub font_dirs: Vec<PathBuf>,

    // Input discovery
    pub extensions: Vec<String>,
}

impl Default for ContactSheetOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            page: PageSpec::default(),
            label: LabelStyle::default(),
            font_candidates: DEFAULT_FONT_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            font_dirs: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ContactSheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.grid()?;
        self.page.validate()?;

        let label = &self.label;
        let sizes = [
            label.font_size_pt,
            label.padding_pt,
            label.background_padding_pt,
        ];
        if sizes.iter().any(|v| !v.is_finite() || *v < 0.0) || label.font_size_pt == 0.0 {
            return Err(SheetError::Config(
                "Label font size must be positive and paddings non-negative".to_string(),
            ));
        }

        if self.font_size_px() < 1.0 {
            return Err(SheetError::Config(format!(
                "Label font size {}pt is under one pixel at {} dpi",
                label.font_size_pt, self.page.dpi
            )));
        }

        if self.font_candidates.is_empty() {
            return Err(SheetError::Config("No font candidates specified".to_string()));
        }

        if self.extensions.is_empty() {
            return Err(SheetError::Config("No image extensions specified".to_string()));
        }

        Ok(())
    }

    pub fn grid(&self) -> Result<GridSpec> {
        GridSpec::new(self.rows, self.columns)
    }

    /// Label spacing at the page density
    pub fn label_metrics(&self) -> LabelMetrics {
        LabelMetrics::from_points(
            &self.page,
            self.label.padding_pt,
            self.label.background_padding_pt,
        )
    }

    /// Label font size at the page density
    pub fn font_size_px(&self) -> f32 {
        self.page.pt_to_px(self.label.font_size_pt) as f32
    }

    /// System font directories, searched after `font_dirs`
    pub fn font_loader(&self) -> FontDirectoryLoader {
        FontDirectoryLoader::system().with_dirs(&self.font_dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = ContactSheetOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.grid().unwrap().capacity(), 12);
        assert_eq!(options.page, PageSpec::a4());
    }

    #[test]
    fn test_default_font_size_px() {
        // 10pt at 300dpi = 41.67px
        assert_eq!(ContactSheetOptions::default().font_size_px(), 41.0);
    }

    #[test]
    fn test_label_metrics_follow_density() {
        let mut options = ContactSheetOptions::default();
        options.page.dpi = 72.0;

        let metrics = options.label_metrics();
        assert_eq!(metrics.text_padding, 5);
        assert_eq!(metrics.background_padding, 2);
    }
}
