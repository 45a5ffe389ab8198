//! Frame report recorder
//!
//! Records one JSON document per frame (JSON Lines).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::FrameReport;

/// JSON Lines recorder for frame reports
pub struct FrameRecorder {
    writer: BufWriter<File>,
    frames_written: u64,
    activations: u64,
}

impl FrameRecorder {
    /// Create a new recorder, truncating `path`
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create frame log: {:?}", path))?;

        Ok(Self {
            writer: BufWriter::new(file),
            frames_written: 0,
            activations: 0,
        })
    }

    /// Get the number of frames written
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Total activation events seen
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Write a single frame
    pub fn write_frame(&mut self, report: &FrameReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report).context("failed to serialize frame")?;
        self.writer
            .write_all(b"\n")
            .context("failed to write frame")?;
        self.frames_written += 1;
        self.activations += report
            .events
            .iter()
            .filter(|e| e.kind == super::CueEventKind::Activated)
            .count() as u64;
        Ok(())
    }

    /// Flush buffered frames to disk
    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush().context("failed to flush frame log")
    }
}
