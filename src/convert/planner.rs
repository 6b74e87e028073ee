//! Pure dimension planning for the output raster.
//!
//! All functions here are pure and testable without any I/O or images.
//! The planner decides the final pixel dimensions from the source size, the
//! EXIF orientation, and the caller's resize request. Orientation codes 5–8
//! swap the effective source dimensions before any other rule applies.

use super::orientation::Orientation;

/// Ceiling applied when no explicit resize is requested: if either effective
/// dimension exceeds this, the image is scaled down so the larger edge lands
/// exactly here. Policy constant, not a physical limit.
pub const MAX_AUTO_DIMENSION: u32 = 1920;

/// Computed target dimensions for the output raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterPlan {
    pub width: u32,
    pub height: u32,
}

/// Compute the output dimensions for a source image.
///
/// Rules, in order:
/// 1. Orientations 5–8 swap the effective source width/height.
/// 2. No resize requested: keep effective dimensions, unless either exceeds
///    [`MAX_AUTO_DIMENSION`] — then scale so the larger edge equals the
///    ceiling, preserving aspect ratio (regardless of the aspect-lock flag).
/// 3. Resize with aspect lock: both bounds given → min-scale fit inside both;
///    one bound given → derive the other from the effective aspect ratio.
/// 4. Resize without aspect lock: dimensions set independently; a missing
///    dimension keeps its effective source value.
///
/// Every scaled dimension floors at one pixel, so extreme aspect ratios
/// never produce a zero-edge plan.
///
/// Requested dimensions of zero are a caller contract violation; validation
/// upstream keeps them out, and the planner does not clamp.
pub fn plan(
    source_width: u32,
    source_height: u32,
    orientation: Orientation,
    width: Option<u32>,
    height: Option<u32>,
    maintain_aspect_ratio: bool,
) -> RasterPlan {
    let (ew, eh) = orientation.corrected_dimensions(source_width, source_height);

    let (width, height) = match (width, height) {
        (None, None) => fit_to_ceiling(ew, eh),
        (w, h) if maintain_aspect_ratio => fit_with_aspect(ew, eh, w, h),
        (w, h) => (w.unwrap_or(ew), h.unwrap_or(eh)),
    };

    RasterPlan { width, height }
}

/// Round a scaled dimension, flooring at 1: a plan must never collapse an
/// edge to zero pixels, which extreme aspect ratios (e.g. 4000×1) would
/// otherwise do.
fn scaled(dim: u32, scale: f64) -> u32 {
    ((dim as f64 * scale).round() as u32).max(1)
}

/// No-resize path: downsample only if the source exceeds the fixed ceiling.
fn fit_to_ceiling(ew: u32, eh: u32) -> (u32, u32) {
    if ew <= MAX_AUTO_DIMENSION && eh <= MAX_AUTO_DIMENSION {
        return (ew, eh);
    }
    if ew >= eh {
        (MAX_AUTO_DIMENSION, scaled(eh, MAX_AUTO_DIMENSION as f64 / ew as f64))
    } else {
        (scaled(ew, MAX_AUTO_DIMENSION as f64 / eh as f64), MAX_AUTO_DIMENSION)
    }
}

/// Aspect-locked resize against one or both requested bounds.
fn fit_with_aspect(ew: u32, eh: u32, width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    match (width, height) {
        (Some(w), Some(h)) => {
            let scale = (w as f64 / ew as f64).min(h as f64 / eh as f64);
            (scaled(ew, scale), scaled(eh, scale))
        }
        (Some(w), None) => (w, scaled(eh, w as f64 / ew as f64)),
        (None, Some(h)) => (scaled(ew, h as f64 / eh as f64), h),
        // Unreachable: the (None, None) case is handled before dispatch.
        (None, None) => (ew, eh),
    }
}
