//! # webpify
//!
//! A local batch converter from JPEG/PNG/GIF/BMP to WebP. Everything runs
//! in-process: no network, no external binaries, no data leaving the machine.
//!
//! # Architecture: One Pipeline, Sequenced Per Image
//!
//! Each image flows through the same five stages:
//!
//! ```text
//! source bytes → orientation → plan → raster → encode(+retry) → .webp
//! ```
//!
//! A batch runs those pipelines strictly one at a time, in submission order.
//! That is a deliberate design choice, not a missing feature: decoding
//! several large rasters concurrently risks exhausting memory, so the tool
//! trades wall-clock speed for a bounded peak. Per-image failures are
//! isolated — a corrupt file is reported and the batch keeps going.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`convert`] | The re-encoding pipeline: orientation, planning, raster, WebP encode + retry |
//! | [`settings`] | Conversion settings (quality, resize, EXIF) with TOML loading |
//! | [`validate`] | Pre-pipeline gate: file type, size cap, batch cap |
//! | [`naming`] | `.webp` filename derivation, slugs, bulk-rename patterns |
//! | [`batch`] | Sequential batch runner, per-image state machine, report |
//! | [`archive`] | ZIP bundling of converted results |
//! | [`output`] | CLI rendering of events and the final summary |
//!
//! # Design Decisions
//!
//! ## WebP-Only Output
//!
//! The tool does one conversion well. WebP has had universal browser support
//! for years and consistently beats JPEG/PNG at equivalent quality, which is
//! the whole point of a bulk web-asset converter.
//!
//! ## Size-Regression Retry
//!
//! Re-encoding an already-optimized source at high quality can *grow* the
//! file. The encoder retries once at reduced quality when that happens and
//! keeps the smaller result — see [`convert::encoder`] for the policy
//! constants. Output larger than input is still possible and is not an
//! error; the summary makes it visible instead.
//!
//! ## Orientation Baked Into Pixels
//!
//! Stripping EXIF would leave rotated photos sideways, so when EXIF removal
//! is on (the default) the orientation tag is read first and the matching
//! transform is applied to the pixels. Detection is best-effort: files
//! without readable EXIF convert without correction rather than failing.
//!
//! ## Pure-Rust-Plus-libwebp Stack
//!
//! Decoding and transforms use the `image` crate; encoding uses the `webp`
//! crate (the `image` crate's WebP encoder is lossless-only, and lossy
//! quality control is the core of this tool). No ImageMagick, no FFmpeg,
//! no system dependencies beyond the statically linked encoder.

pub mod archive;
pub mod batch;
pub mod convert;
pub mod naming;
pub mod output;
pub mod settings;
pub mod validate;
