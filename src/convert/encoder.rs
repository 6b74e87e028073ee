//! WebP encoding with a bounded size-regression retry.
//!
//! Re-encoding an already well-compressed source at high quality can produce
//! a WebP *larger* than the input. When that happens and there is quality
//! headroom, one retry runs at a reduced quality and the smaller of the two
//! results wins. At most two attempts ever run; an output larger than the
//! input is a best-effort miss, never an error.
//!
//! Quality is carried as a normalized 0.0–1.0 fraction throughout and mapped
//! to libwebp's 0–100 scale only at the encoder boundary.

use super::source::ConvertError;
use image::DynamicImage;

/// Retry only when the requested quality exceeds this fraction.
pub const RETRY_QUALITY_CUTOFF: f32 = 0.6;
/// Quality reduction applied on retry.
pub const RETRY_QUALITY_STEP: f32 = 0.2;
/// Retry quality never drops below this floor.
pub const RETRY_QUALITY_FLOOR: f32 = 0.5;

/// One encode attempt: the payload and the quality that produced it.
#[derive(Debug, Clone)]
pub struct EncodeAttempt {
    pub payload: Vec<u8>,
    pub quality: f32,
}

impl EncodeAttempt {
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

/// Encode a surface once at the given quality fraction.
pub fn encode_once(surface: &DynamicImage, quality: f32) -> Result<EncodeAttempt, ConvertError> {
    let rgba = surface.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), surface.width(), surface.height());
    let memory = encoder.encode(quality * 100.0);
    if memory.is_empty() {
        return Err(ConvertError::Encode("encoder produced no output".into()));
    }
    Ok(EncodeAttempt {
        payload: memory.to_vec(),
        quality,
    })
}

/// Pick the smaller of two attempts; ties keep the first.
pub fn choose_best(first: EncodeAttempt, second: Option<EncodeAttempt>) -> EncodeAttempt {
    match second {
        Some(s) if s.size() < first.size() => s,
        _ => first,
    }
}

/// Quality used for the retry attempt.
fn retry_quality(quality: f32) -> f32 {
    (quality - RETRY_QUALITY_STEP).max(RETRY_QUALITY_FLOOR)
}

/// Encode with the two-attempt retry policy.
///
/// The retry fires only when the first result exceeds `source_size` *and*
/// the requested quality is above [`RETRY_QUALITY_CUTOFF`]. The returned
/// attempt is the smaller of the (at most two) encodes.
pub fn encode(
    surface: &DynamicImage,
    source_size: usize,
    quality: f32,
) -> Result<EncodeAttempt, ConvertError> {
    let first = encode_once(surface, quality)?;
    let second = if first.size() > source_size && quality > RETRY_QUALITY_CUTOFF {
        Some(encode_once(surface, retry_quality(quality))?)
    } else {
        None
    };
    Ok(choose_best(first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn noise_surface(width: u32, height: u32) -> DynamicImage {
        // Pseudo-random content so quality changes move the output size.
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17));
            image::Rgb([(v % 251) as u8, (v % 241) as u8, (v % 199) as u8])
        }))
    }

    fn attempt(size: usize, quality: f32) -> EncodeAttempt {
        EncodeAttempt {
            payload: vec![0u8; size],
            quality,
        }
    }

    // =========================================================================
    // choose_best (pure policy)
    // =========================================================================

    #[test]
    fn choose_best_keeps_single_attempt() {
        let best = choose_best(attempt(100, 0.8), None);
        assert_eq!(best.size(), 100);
        assert_eq!(best.quality, 0.8);
    }

    #[test]
    fn choose_best_prefers_smaller_second() {
        let best = choose_best(attempt(100, 0.8), Some(attempt(60, 0.6)));
        assert_eq!(best.size(), 60);
        assert_eq!(best.quality, 0.6);
    }

    #[test]
    fn choose_best_keeps_first_on_larger_second() {
        let best = choose_best(attempt(100, 0.8), Some(attempt(150, 0.6)));
        assert_eq!(best.size(), 100);
    }

    #[test]
    fn choose_best_ties_keep_first() {
        let best = choose_best(attempt(100, 0.8), Some(attempt(100, 0.6)));
        assert_eq!(best.quality, 0.8);
    }

    // =========================================================================
    // retry_quality
    // =========================================================================

    #[test]
    fn retry_quality_steps_down() {
        assert!((retry_quality(0.8) - 0.6).abs() < 1e-6);
        assert!((retry_quality(0.95) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn retry_quality_floors_at_half() {
        assert!((retry_quality(0.65) - 0.5).abs() < 1e-6);
        assert!((retry_quality(0.61) - 0.5).abs() < 1e-6);
    }

    // =========================================================================
    // encode
    // =========================================================================

    #[test]
    fn encode_produces_webp_payload() {
        let result = encode(&noise_surface(64, 64), usize::MAX, 0.8).unwrap();
        assert!(!result.payload.is_empty());
        // RIFF....WEBP container magic
        assert_eq!(&result.payload[..4], b"RIFF");
        assert_eq!(&result.payload[8..12], b"WEBP");
    }

    #[test]
    fn encode_is_deterministic() {
        let surface = noise_surface(64, 64);
        let a = encode(&surface, usize::MAX, 0.8).unwrap();
        let b = encode(&surface, usize::MAX, 0.8).unwrap();
        assert_eq!(a.payload, b.payload);
    }

    #[test]
    fn oversized_output_with_headroom_retries_at_lower_quality() {
        // source_size 1 forces the regression condition.
        let surface = noise_surface(64, 64);
        let first = encode_once(&surface, 0.8).unwrap();
        let result = encode(&surface, 1, 0.8).unwrap();
        assert!(result.size() <= first.size());
        // Winner is one of exactly two qualities.
        assert!(result.quality == 0.8 || (result.quality - 0.6).abs() < 1e-6);
    }

    #[test]
    fn no_retry_at_or_below_cutoff() {
        // Even with a guaranteed size regression, quality 0.6 never retries.
        let surface = noise_surface(64, 64);
        let result = encode(&surface, 1, 0.6).unwrap();
        let single = encode_once(&surface, 0.6).unwrap();
        assert_eq!(result.payload, single.payload);
        assert!((result.quality - 0.6).abs() < 1e-6);
    }

    #[test]
    fn no_retry_when_output_is_smaller_than_source() {
        let surface = noise_surface(64, 64);
        let result = encode(&surface, usize::MAX, 0.9).unwrap();
        assert!((result.quality - 0.9).abs() < 1e-6);
    }

    #[test]
    fn oversized_output_is_not_an_error() {
        // Tiny "source" guarantees output > input; still Ok.
        assert!(encode(&noise_surface(32, 32), 1, 0.5).is_ok());
    }
}
