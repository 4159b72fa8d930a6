//! Gaze sample types and the JSON export encoding.
//!
//! A sample is a single recorded gaze coordinate. The export format is a
//! plain JSON array of `{x, y, timestamp}` objects so the file can be read
//! back by any downstream tooling without a schema.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since session start.
pub type TimestampMs = f64;

/// A single recorded gaze sample. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Screen X coordinate in pixels.
    pub x: f64,

    /// Screen Y coordinate in pixels.
    pub y: f64,

    /// Milliseconds since session start.
    pub timestamp: TimestampMs,
}

impl GazeSample {
    /// Create a sample at the given position and time.
    pub fn new(x: f64, y: f64, timestamp: TimestampMs) -> Self {
        Self { x, y, timestamp }
    }

    /// Timestamp as fractional seconds since session start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp / 1_000.0
    }

    /// Euclidean distance to another sample's position, in pixels.
    pub fn distance_to(&self, other: &GazeSample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Serialize samples to the JSON array export encoding.
pub fn serialize_samples(samples: &[GazeSample]) -> Result<String, serde_json::Error> {
    serde_json::to_string(samples)
}

/// Parse samples from the JSON array export encoding.
pub fn parse_samples(json: &str) -> Result<Vec<GazeSample>, serde_json::Error> {
    serde_json::from_str(json)
}
