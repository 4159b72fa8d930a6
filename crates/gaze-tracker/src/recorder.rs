//! Append-only trace recorder for crash-safe frame logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use gazetrace_common::error::{GazetraceError, GazeResult};
use gazetrace_model::trace::{GazeFrame, TraceHeader};

/// Writes gaze frames to a JSONL trace file in append-only mode.
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    frames_written: u64,
}

impl TraceWriter {
    /// Create a new trace writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: TraceHeader) -> GazeResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // Write header as a comment line (prefixed with #)
        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| GazetraceError::export(format!("Failed to write trace header: {e}")))?;

        Ok(Self {
            writer,
            path,
            frames_written: 0,
        })
    }

    /// Write a single frame as a JSONL line.
    pub fn write_frame(&mut self, frame: &GazeFrame) -> GazeResult<()> {
        let json = serde_json::to_string(frame)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| GazetraceError::export(format!("Failed to write frame: {e}")))?;
        self.frames_written += 1;

        // Flush every 200 frames for crash safety
        if self.frames_written % 200 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> GazeResult<()> {
        self.writer
            .flush()
            .map_err(|e| GazetraceError::export(format!("Failed to flush trace: {e}")))?;
        Ok(())
    }

    /// Number of frames written.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazetrace_model::trace::parse_frames;

    fn test_header() -> TraceHeader {
        TraceHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
            sample_rate_hz: 30,
        }
    }

    #[test]
    fn test_trace_writer_roundtrip() {
        let dir = std::env::temp_dir().join("gazetrace_test_recorder");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("gaze.trace");

        {
            let mut writer = TraceWriter::new(path.clone(), test_header()).unwrap();
            writer
                .write_frame(&GazeFrame::detection(0.0, 100.0, 200.0))
                .unwrap();
            writer.write_frame(&GazeFrame::absent(8.0)).unwrap();
            writer
                .write_frame(&GazeFrame::detection(16.0, 150.0, 210.0))
                .unwrap();
            assert_eq!(writer.frames_written(), 3);
        }

        // Read back and verify
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4); // 1 header + 3 frames
        assert!(lines[0].starts_with("# "));

        let frames = parse_frames(&content).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1].position(), None);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_trace_writer_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("gazetrace_test_recorder_nested");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("deep").join("gaze.trace");
        let writer = TraceWriter::new(path.clone(), test_header()).unwrap();
        drop(writer);

        assert!(path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
