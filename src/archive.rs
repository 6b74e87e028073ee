//! ZIP bundling of converted images.
//!
//! A [`ZipSink`] is a [`ResultSink`](crate::batch::ResultSink) that streams
//! each finished WebP into a single deflate-compressed archive instead of
//! loose files. WebP payloads are already compressed, but deflate still
//! shaves container overhead and keeps the archive conventional.

use crate::batch::ResultSink;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub struct ZipSink {
    writer: ZipWriter<File>,
}

impl ZipSink {
    /// Create the archive file, truncating any existing one.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: ZipWriter::new(file),
        })
    }

    /// Finish the archive. Must be called; dropping without finishing
    /// leaves a truncated ZIP.
    pub fn finish(mut self) -> std::io::Result<()> {
        self.writer
            .finish()
            .map_err(std::io::Error::other)?
            .sync_all()
    }
}

impl ResultSink for ZipSink {
    fn write(&mut self, name: &str, payload: &[u8]) -> std::io::Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(name, options)
            .map_err(std::io::Error::other)?;
        self.writer.write_all(payload)
    }
}
