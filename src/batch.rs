//! Sequential batch conversion with per-image status tracking.
//!
//! Images are processed one at a time in submission order. That is a
//! deliberate memory bound: decoding several large rasters at once can
//! exhaust memory, and this tool trades wall-clock speed for a bounded peak.
//! Each image owns its surfaces for exactly one iteration; everything is
//! dropped before the next image starts.
//!
//! Per-image lifecycle is `pending → processing → {completed | error}`.
//! Terminal states never transition again and nothing is auto-retried; one
//! image's failure never blocks the rest of the batch.
//!
//! Progress flows out through an optional [`mpsc::Sender`] of
//! [`BatchEvent`]s; rendering lives in [`crate::output`].

use crate::convert::{self, ConvertError, SourceImage};
use crate::naming::{self, RenameSettings};
use crate::settings::ConversionSettings;
use serde::Serialize;
use std::sync::mpsc::Sender;

/// Where finished WebP payloads go (directory, ZIP archive, test buffer).
pub trait ResultSink {
    fn write(&mut self, name: &str, payload: &[u8]) -> std::io::Result<()>;
}

/// Per-image status. Terminal states are `Completed` and `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// An image left `pending` and started processing.
    Started { index: usize, name: String },
    /// Pipeline checkpoint for the image at `index` (0–100, non-decreasing).
    Progress { index: usize, percent: u8 },
    /// Terminal success, with the output name and both byte sizes.
    Completed {
        index: usize,
        name: String,
        output_name: String,
        original_size: usize,
        converted_size: usize,
    },
    /// Terminal failure with a human-readable message.
    Failed {
        index: usize,
        name: String,
        message: String,
    },
}

/// Outcome record for one image, serialized into the batch report.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutcome {
    pub name: String,
    /// Output filename (renamed or extension-swapped). Present even on
    /// failure so a re-run targets the same name.
    pub output_name: String,
    pub status: ImageStatus,
    pub original_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// EXIF orientation code applied (1 when no correction ran).
    pub orientation: u8,
    pub exif_removed: bool,
}

/// Aggregate savings across a finished batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    pub files_completed: usize,
    pub files_failed: usize,
    pub total_original_size: usize,
    pub total_converted_size: usize,
    pub savings_percent: f64,
}

impl ConversionStats {
    fn from_outcomes(outcomes: &[ImageOutcome]) -> Self {
        let mut stats = Self::default();
        for outcome in outcomes {
            match outcome.status {
                ImageStatus::Completed => {
                    stats.files_completed += 1;
                    stats.total_original_size += outcome.original_size;
                    stats.total_converted_size += outcome.converted_size.unwrap_or(0);
                }
                ImageStatus::Error => stats.files_failed += 1,
                _ => {}
            }
        }
        if stats.total_original_size > 0 {
            stats.savings_percent = (1.0
                - stats.total_converted_size as f64 / stats.total_original_size as f64)
                * 100.0;
        }
        stats
    }
}

/// Final report: per-image outcomes in submission order plus aggregates.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
    pub stats: ConversionStats,
}

fn emit(events: &Option<Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = events {
        // A hung-up receiver only means nobody is listening anymore.
        let _ = tx.send(event);
    }
}

/// Output filename for the image at `index` (0-based submission position).
fn output_name(
    source_name: &str,
    index: usize,
    total: usize,
    rename: Option<&RenameSettings>,
) -> String {
    match rename {
        Some(settings) if settings.is_enabled() => {
            naming::generate_file_name(settings, settings.start_index + index, total)
        }
        _ => naming::webp_file_name(source_name),
    }
}

/// Run a batch: convert every source sequentially, writing successes to
/// `sink` and emitting progress to `events`.
///
/// Always returns a complete report — a failed image is recorded with status
/// `error` and processing continues with the next one.
pub fn run_batch(
    sources: &[SourceImage],
    settings: &ConversionSettings,
    rename: Option<&RenameSettings>,
    sink: &mut dyn ResultSink,
    events: Option<Sender<BatchEvent>>,
) -> BatchReport {
    let total = sources.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, source) in sources.iter().enumerate() {
        let out_name = output_name(&source.name, index, total, rename);
        emit(
            &events,
            BatchEvent::Started {
                index,
                name: source.name.clone(),
            },
        );

        let result = convert::convert(source, settings, |percent| {
            emit(&events, BatchEvent::Progress { index, percent });
        })
        .and_then(|encoded| {
            sink.write(&out_name, &encoded.payload)
                .map_err(ConvertError::Io)?;
            Ok(encoded)
        });

        let outcome = match result {
            Ok(encoded) => {
                emit(
                    &events,
                    BatchEvent::Completed {
                        index,
                        name: source.name.clone(),
                        output_name: out_name.clone(),
                        original_size: source.size(),
                        converted_size: encoded.size,
                    },
                );
                ImageOutcome {
                    name: source.name.clone(),
                    output_name: out_name,
                    status: ImageStatus::Completed,
                    original_size: source.size(),
                    converted_size: Some(encoded.size),
                    error: None,
                    orientation: encoded.orientation.code(),
                    exif_removed: encoded.exif_removed,
                }
            }
            Err(e) => {
                let message = e.to_string();
                emit(
                    &events,
                    BatchEvent::Failed {
                        index,
                        name: source.name.clone(),
                        message: message.clone(),
                    },
                );
                ImageOutcome {
                    name: source.name.clone(),
                    output_name: out_name,
                    status: ImageStatus::Error,
                    original_size: source.size(),
                    converted_size: None,
                    error: Some(message),
                    orientation: 1,
                    exif_removed: false,
                }
            }
        };
        outcomes.push(outcome);
    }

    let stats = ConversionStats::from_outcomes(&outcomes);
    BatchReport { outcomes, stats }
}

/// Sink that writes each payload as a file in a directory.
pub struct DirSink {
    dir: std::path::PathBuf,
}

impl DirSink {
    /// Create the directory (and parents) if needed.
    pub fn new(dir: impl Into<std::path::PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl ResultSink for DirSink {
    fn write(&mut self, name: &str, payload: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.dir.join(name), payload)
    }
}
