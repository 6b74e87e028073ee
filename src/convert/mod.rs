//! The image re-encoding pipeline — pure Rust, in-memory.
//!
//! | Stage | Module | Crate / function |
//! |---|---|---|
//! | **Orientation** | [`orientation`] | `kamadak-exif` tag read, `image` flip/rotate |
//! | **Planning** | [`planner`] | pure dimension math (unit testable) |
//! | **Raster** | [`raster`] | `image` decode + Lanczos3 scale |
//! | **Encode** | [`encoder`] | `webp` (libwebp) lossy encode + retry policy |
//! | **Orchestration** | [`pipeline`] | sequences the stages per image |
//!
//! Data flows one way: source bytes → orientation code → raster plan →
//! pixel surface → WebP payload. Every entity is created fresh per
//! conversion call; nothing is pooled or shared across calls.

pub mod encoder;
pub mod orientation;
pub mod planner;
pub mod raster;
mod source;

pub mod pipeline;

pub use orientation::Orientation;
pub use pipeline::{EncodedResult, convert};
pub use planner::{MAX_AUTO_DIMENSION, RasterPlan, plan};
pub use source::{ConvertError, SourceFormat, SourceImage};
