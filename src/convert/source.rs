//! Source image handle and conversion error types.
//!
//! A [`SourceImage`] is an immutable handle to the raw input bytes plus the
//! declared format. The pipeline never mutates it; natural pixel dimensions
//! become known once the raster stage decodes it.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Input formats with compiled-in decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl SourceFormat {
    /// Map a file extension (case-insensitive) to a source format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

}

/// Immutable handle to a raw input image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Original filename (used for output naming and error messages).
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
    /// Declared format, derived from the file extension.
    pub format: SourceFormat,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, format: SourceFormat) -> Self {
        Self {
            name: name.into(),
            bytes,
            format,
        }
    }

    /// Load a source image from disk, deriving the format from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format = SourceFormat::from_extension(ext)
            .ok_or_else(|| ConvertError::UnsupportedFormat(path.display().to_string()))?;
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes, format))
    }

    /// Byte length of the raw input.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
