//! Decode and rasterize: bytes → upright pixel surface at plan dimensions.
//!
//! Two steps: the orientation transform runs at natural size first, then a
//! single Lanczos3 scale draws the upright surface into the final dimensions.
//! `resize_exact` is deliberate — the planner has already settled any aspect
//! question, so the raster stage does no ratio fitting of its own.

use super::orientation::Orientation;
use super::planner::RasterPlan;
use super::source::{ConvertError, SourceImage};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Decode a source image's bytes into a pixel surface.
///
/// The format is sniffed from content rather than trusted from the declared
/// type; a corrupt or mislabeled file surfaces as [`ConvertError::Decode`].
pub fn decode(source: &SourceImage) -> Result<DynamicImage, ConvertError> {
    ImageReader::new(Cursor::new(&source.bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::Decode(format!("{}: {}", source.name, e)))?
        .decode()
        .map_err(|e| ConvertError::Decode(format!("{}: {}", source.name, e)))
}

/// Apply the orientation transform, then scale to exactly `plan` dimensions.
pub fn rasterize(img: DynamicImage, orientation: Orientation, plan: &RasterPlan) -> DynamicImage {
    let upright = orientation.apply(img);
    if upright.width() == plan.width && upright.height() == plan.height {
        return upright;
    }
    upright.resize_exact(plan.width, plan.height, FilterType::Lanczos3)
}
