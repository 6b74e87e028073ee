//! Pre-pipeline input validation.
//!
//! The pipeline assumes pre-validated input; this module is the gate. Three
//! checks: supported file type, per-file size cap, and batch count cap.
//! Validation never aborts a batch for one bad file — invalid files are
//! reported and the rest proceed. An oversized batch, however, rejects the
//! whole submission.

use crate::convert::SourceFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-file size cap.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// Maximum number of files per batch.
pub const MAX_BATCH_SIZE: usize = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{name}: unsupported file type (allowed: jpg, jpeg, png, gif, bmp)")]
    FileType { name: String },
    #[error("{name}: file too large ({size} bytes, max {MAX_FILE_SIZE})")]
    FileSize { name: String, size: u64 },
    #[error("too many files: {count} (max {MAX_BATCH_SIZE})")]
    BatchSize { count: usize },
}

/// Outcome of validating a submission: files that may enter the pipeline
/// plus itemized errors for the rest.
#[derive(Debug, Default)]
pub struct Validated {
    pub valid: Vec<PathBuf>,
    pub errors: Vec<ValidationError>,
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
        .is_some()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Validate a batch of candidate files.
///
/// An over-limit batch returns only the batch-size error with no valid
/// files. Otherwise each file is checked independently for type and size.
pub fn validate_batch(paths: &[PathBuf]) -> Validated {
    if paths.len() > MAX_BATCH_SIZE {
        return Validated {
            valid: Vec::new(),
            errors: vec![ValidationError::BatchSize { count: paths.len() }],
        };
    }

    let mut result = Validated::default();
    for path in paths {
        let name = display_name(path);

        if !has_supported_extension(path) {
            result.errors.push(ValidationError::FileType { name });
            continue;
        }

        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(_) => {
                // Unreadable files surface as a type error downstream would
                // mask; report the path and skip it.
                result.errors.push(ValidationError::FileType { name });
                continue;
            }
        };

        if size > MAX_FILE_SIZE {
            result.errors.push(ValidationError::FileSize { name, size });
            continue;
        }

        result.valid.push(path.clone());
    }
    result
}
