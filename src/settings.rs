//! Conversion settings: quality, resize request, and EXIF handling.
//!
//! Settings load from an optional TOML file and are overridden field-by-field
//! by CLI flags. All fields have defaults, so an empty file (or none) is a
//! valid configuration.

use serde::{Deserialize, Serialize};

/// Lossy encoding quality as a percentage (10–100). Clamped on construction.
///
/// The encoder consumes quality as a 0.0–1.0 fraction; [`Quality::fraction`]
/// is the only place the division by 100 happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(10, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Normalized encoder quality in 0.0–1.0.
    pub fn fraction(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

impl From<u8> for Quality {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.0
    }
}

/// Per-batch conversion settings consumed by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionSettings {
    pub quality: Quality,
    /// Requested output width in pixels. Must be positive when present.
    pub width: Option<u32>,
    /// Requested output height in pixels. Must be positive when present.
    pub height: Option<u32>,
    /// Preserve the source aspect ratio when resizing.
    pub maintain_aspect_ratio: bool,
    /// Strip EXIF metadata and bake the orientation correction into pixels.
    pub remove_exif: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            width: None,
            height: None,
            maintain_aspect_ratio: true,
            remove_exif: true,
        }
    }
}

impl ConversionSettings {
    /// Parse settings from TOML. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
