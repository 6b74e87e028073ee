//! Per-image conversion orchestrator.
//!
//! Sequences the pipeline stages for one image: orientation detection →
//! decode → dimension planning → rasterization → encode-with-retry. Progress
//! checkpoints are reported as monotonically non-decreasing integer
//! percentages; the exact values are presentation, not contract.

use super::encoder;
use super::orientation::{self, Orientation};
use super::planner;
use super::raster;
use super::source::{ConvertError, SourceImage};
use crate::settings::ConversionSettings;

/// Final product of one successful conversion. Created once, never mutated.
#[derive(Debug, Clone)]
pub struct EncodedResult {
    /// WebP payload.
    pub payload: Vec<u8>,
    /// Payload byte length. The minimum of at most two encode attempts —
    /// not guaranteed smaller than the source.
    pub size: usize,
    /// Quality fraction that produced the winning attempt.
    pub quality_used: f32,
    /// Orientation applied during rasterization.
    pub orientation: Orientation,
    /// Whether EXIF metadata was stripped (always true when correction ran;
    /// re-encoding never copies metadata forward).
    pub exif_removed: bool,
}

/// Convert one source image to WebP.
///
/// Orientation detection only runs when `settings.remove_exif` is set;
/// otherwise the orientation is fixed at identity. Detection failure is
/// silent (identity), decode and encode failures are fatal for this image.
pub fn convert(
    source: &SourceImage,
    settings: &ConversionSettings,
    mut progress: impl FnMut(u8),
) -> Result<EncodedResult, ConvertError> {
    progress(0);

    let orientation = if settings.remove_exif {
        orientation::detect(&source.bytes)
    } else {
        Orientation::Normal
    };
    progress(25);

    let decoded = raster::decode(source)?;
    let plan = planner::plan(
        decoded.width(),
        decoded.height(),
        orientation,
        settings.width,
        settings.height,
        settings.maintain_aspect_ratio,
    );

    let surface = raster::rasterize(decoded, orientation, &plan);
    progress(60);

    let attempt = encoder::encode(&surface, source.size(), settings.quality.fraction())?;
    progress(100);

    Ok(EncodedResult {
        size: attempt.size(),
        quality_used: attempt.quality,
        payload: attempt.payload,
        orientation,
        exif_removed: settings.remove_exif,
    })
}
