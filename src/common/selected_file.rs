use std::path::Path;
use anyhow::Context;
use image::ImageFormat;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A user-chosen image file, held in memory until it is uploaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    /// Reads `path` and guesses the MIME type from its extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read image file {}", path.display()))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type = ImageFormat::from_path(path)
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_MIME);

        Ok(Self::new(&name, content_type, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
