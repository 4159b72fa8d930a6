//! Gaze source backend implementations.
//!
//! Each backend provides a different way to obtain gaze frames. Real
//! webcam gaze estimation lives outside this crate; the backends here
//! replay recorded traces or synthesize deterministic scanpaths.

use std::path::Path;

use gazetrace_common::error::{GazetraceError, GazeResult};
use gazetrace_model::trace::{parse_frames, GazeFrame};

use crate::{GazeBackend, SourcePoll};

/// Replays a recorded trace file in delivery order, absence markers
/// included.
pub struct ReplayBackend {
    frames: Vec<GazeFrame>,
    index: usize,
    source_name: String,
}

impl ReplayBackend {
    /// Load a trace file. Fails if the file is missing or malformed, so
    /// a broken source is reported instead of producing an inert session.
    pub fn from_file(path: &Path) -> GazeResult<Self> {
        if !path.exists() {
            return Err(GazetraceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let frames = parse_frames(&content)
            .map_err(|e| GazetraceError::source(format!("Malformed trace file: {e}")))?;

        tracing::info!(path = %path.display(), frames = frames.len(), "Loaded gaze trace");

        Ok(Self {
            frames,
            index: 0,
            source_name: format!("replay:{}", path.display()),
        })
    }

    /// Build a replay source from frames already in memory.
    pub fn from_frames(frames: Vec<GazeFrame>) -> Self {
        Self {
            frames,
            index: 0,
            source_name: "replay:memory".to_string(),
        }
    }
}

impl GazeBackend for ReplayBackend {
    fn poll(&mut self) -> GazeResult<SourcePoll> {
        if self.index < self.frames.len() {
            let frame = self.frames[self.index].clone();
            self.index += 1;
            Ok(SourcePoll::Frame(frame))
        } else {
            Ok(SourcePoll::Ended)
        }
    }

    fn name(&self) -> &str {
        &self.source_name
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Scripted backend for testing — delivers pre-loaded frames, then ends.
pub struct ScriptedBackend {
    frames: Vec<GazeFrame>,
    index: usize,
}

impl ScriptedBackend {
    /// Create a scripted backend with pre-loaded frames.
    pub fn new(frames: Vec<GazeFrame>) -> Self {
        Self { frames, index: 0 }
    }

    /// Create an empty scripted backend that ends immediately.
    pub fn empty() -> Self {
        Self {
            frames: vec![],
            index: 0,
        }
    }
}

impl GazeBackend for ScriptedBackend {
    fn poll(&mut self) -> GazeResult<SourcePoll> {
        if self.index < self.frames.len() {
            let frame = self.frames[self.index].clone();
            self.index += 1;
            Ok(SourcePoll::Frame(frame))
        } else {
            Ok(SourcePoll::Ended)
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Synthesizes a deterministic reading-pattern scanpath: the gaze sweeps
/// each row left to right, drops to the next row, and blinks (an absent
/// frame) at a fixed cadence. Useful for demos and end-to-end checks
/// without a webcam.
pub struct ScanpathBackend {
    viewport_width: f64,
    viewport_height: f64,
    interval_ms: f64,
    total_frames: usize,
    index: usize,
}

/// Horizontal steps per row sweep.
const STEPS_PER_ROW: usize = 24;

/// Number of rows in the reading pattern.
const ROWS: usize = 8;

/// Every Nth frame is a blink (absent detection).
const BLINK_CADENCE: usize = 13;

impl ScanpathBackend {
    /// Create a scanpath source covering the given viewport.
    ///
    /// `sample_rate_hz` controls frame timestamps; `duration_secs`
    /// bounds the total number of frames.
    pub fn new(
        viewport_width: u32,
        viewport_height: u32,
        sample_rate_hz: u32,
        duration_secs: f64,
    ) -> Self {
        let interval_ms = 1_000.0 / sample_rate_hz.max(1) as f64;
        let total_frames = (duration_secs * sample_rate_hz.max(1) as f64).ceil() as usize;
        Self {
            viewport_width: viewport_width as f64,
            viewport_height: viewport_height as f64,
            interval_ms,
            total_frames,
            index: 0,
        }
    }

    fn frame_at(&self, index: usize) -> GazeFrame {
        let timestamp = index as f64 * self.interval_ms;

        if index % BLINK_CADENCE == BLINK_CADENCE - 1 {
            return GazeFrame::absent(timestamp);
        }

        let step = index % STEPS_PER_ROW;
        let row = (index / STEPS_PER_ROW) % ROWS;

        // Margins keep the path inside the viewport
        let x = self.viewport_width * (0.1 + 0.8 * step as f64 / (STEPS_PER_ROW - 1) as f64);
        let y = self.viewport_height * (0.1 + 0.8 * row as f64 / (ROWS - 1) as f64);

        GazeFrame::detection(timestamp, x, y)
    }
}

impl GazeBackend for ScanpathBackend {
    fn poll(&mut self) -> GazeResult<SourcePoll> {
        if self.index >= self.total_frames {
            return Ok(SourcePoll::Ended);
        }
        let frame = self.frame_at(self.index);
        self.index += 1;
        Ok(SourcePoll::Frame(frame))
    }

    fn name(&self) -> &str {
        "scanpath"
    }

    fn is_available(&self) -> bool {
        true
    }
}
