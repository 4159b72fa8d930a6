//! Gaze trace frame stream for recording and replay.
//!
//! Traces are recorded in append-only JSONL format: a `#`-prefixed header
//! comment line followed by one frame per line. A frame is either a
//! detection (the tracker found eyes and produced a coordinate) or an
//! absence marker (no face/eyes this frame). Absence markers are kept in
//! the trace so replay reproduces detection gaps exactly.

use serde::{Deserialize, Serialize};

use crate::sample::{GazeSample, TimestampMs};

/// A single delivery from a gaze source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeFrame {
    /// Milliseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    /// The frame payload.
    #[serde(flatten)]
    pub kind: FrameKind,
}

/// Discriminated union of frame types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameKind {
    /// A gaze coordinate was estimated for this frame.
    Detection {
        /// Screen X coordinate in pixels.
        x: f64,
        /// Screen Y coordinate in pixels.
        y: f64,
    },

    /// No face/eyes were detected this frame.
    Absent,
}

/// Trace stream metadata, written as the first line of a trace file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (ISO 8601).
    pub epoch_wall: String,

    /// Viewport dimensions in pixels at capture time.
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Nominal gaze sampling rate (Hz).
    pub sample_rate_hz: u32,
}

impl GazeFrame {
    /// Create a detection frame.
    pub fn detection(timestamp_ms: TimestampMs, x: f64, y: f64) -> Self {
        Self {
            timestamp_ms,
            kind: FrameKind::Detection { x, y },
        }
    }

    /// Create an absence frame.
    pub fn absent(timestamp_ms: TimestampMs) -> Self {
        Self {
            timestamp_ms,
            kind: FrameKind::Absent,
        }
    }

    /// Extract the gaze position if this frame carries a detection.
    pub fn position(&self) -> Option<(f64, f64)> {
        match &self.kind {
            FrameKind::Detection { x, y } => Some((*x, *y)),
            FrameKind::Absent => None,
        }
    }

    /// Convert a detection frame into a recorded sample.
    pub fn to_sample(&self) -> Option<GazeSample> {
        self.position()
            .map(|(x, y)| GazeSample::new(x, y, self.timestamp_ms))
    }
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<GazeFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[GazeFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_frame_roundtrip() {
        let frame = GazeFrame::detection(16.0, 100.0, 200.0);
        let json = serde_json::to_string(&frame).unwrap();
        let parsed: GazeFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, parsed);
    }

    #[test]
    fn test_absent_frame_roundtrip() {
        let frame = GazeFrame::absent(33.0);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"type\":\"absent\""));
        let parsed: GazeFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, parsed);
        assert_eq!(parsed.position(), None);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let frames = vec![
            GazeFrame::detection(0.0, 100.0, 200.0),
            GazeFrame::absent(8.0),
            GazeFrame::detection(16.0, 150.0, 210.0),
        ];
        let jsonl = serialize_frames(&frames).unwrap();
        let parsed = parse_frames(&jsonl).unwrap();
        assert_eq!(frames, parsed);
    }

    #[test]
    fn test_parse_frames_skips_header_comment() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n{\"t\":0.0,\"type\":\"detection\",\"x\":100.0,\"y\":200.0}\n";
        let parsed = parse_frames(jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].position(), Some((100.0, 200.0)));
    }

    #[test]
    fn test_to_sample() {
        let frame = GazeFrame::detection(16.0, 150.0, 210.0);
        let sample = frame.to_sample().unwrap();
        assert_eq!(sample.x, 150.0);
        assert_eq!(sample.y, 210.0);
        assert_eq!(sample.timestamp, 16.0);

        assert_eq!(GazeFrame::absent(0.0).to_sample(), None);
    }
}
