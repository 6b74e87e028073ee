//! EXIF orientation detection and the eight canonical transforms.
//!
//! Cameras record the rotation they were held at as an EXIF tag (1–8) instead
//! of rotating pixels. This module reads that tag from raw file bytes and
//! applies the inverse transform so the raster is upright before encoding.
//!
//! Detection is best-effort: a missing tag, an out-of-range value, or a file
//! with no EXIF container all degrade silently to [`Orientation::Normal`].

use image::DynamicImage;
use std::io::Cursor;

/// One of the eight canonical EXIF orientation transforms.
///
/// The discriminant is the EXIF tag value. Codes 5–8 involve a quarter-turn
/// rotation and therefore swap the effective width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// 1 — identity
    #[default]
    Normal = 1,
    /// 2 — mirror horizontal
    FlipH = 2,
    /// 3 — rotate 180°
    Rotate180 = 3,
    /// 4 — mirror vertical
    FlipV = 4,
    /// 5 — rotate 90° CW, then mirror horizontal
    Rotate90FlipH = 5,
    /// 6 — rotate 90° CW
    Rotate90 = 6,
    /// 7 — rotate 90° CCW, then mirror horizontal
    Rotate270FlipH = 7,
    /// 8 — rotate 90° CCW
    Rotate270 = 8,
}

impl Orientation {
    /// Map a raw EXIF tag value to an orientation. Out-of-range values map
    /// to `None`; callers treat that as `Normal`.
    pub fn from_exif_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipH),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipV),
            5 => Some(Self::Rotate90FlipH),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Rotate270FlipH),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// The EXIF tag value (1–8).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this transform swaps width and height (codes 5–8).
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Rotate90FlipH | Self::Rotate90 | Self::Rotate270FlipH | Self::Rotate270
        )
    }

    /// Effective (upright) dimensions for a source of `width` × `height`.
    pub fn corrected_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Apply the transform to a decoded surface so its content is upright.
    ///
    /// The output dimensions equal `corrected_dimensions` of the input.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => img,
            Self::FlipH => img.fliph(),
            Self::Rotate180 => img.rotate180(),
            Self::FlipV => img.flipv(),
            Self::Rotate90FlipH => img.rotate90().fliph(),
            Self::Rotate90 => img.rotate90(),
            Self::Rotate270FlipH => img.rotate270().fliph(),
            Self::Rotate270 => img.rotate270(),
        }
    }
}

/// Read the EXIF orientation tag from raw file bytes.
///
/// Returns [`Orientation::Normal`] when the file has no EXIF container, the
/// tag is absent, or the value is out of range. Detection failure is never an
/// error: the image is simply encoded without correction.
pub fn detect(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(Orientation::from_exif_code)
        .unwrap_or_default()
}
