//! Session clock for gaze sample timestamps.
//!
//! Gaze samples carry a timestamp in milliseconds since the session
//! started, anchored to a monotonic epoch recorded when capture began.
//! This module provides:
//! - The session epoch and elapsed-time queries
//! - Conversions between milliseconds and seconds

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment capture started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant capture started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a clock from a known epoch (for replaying saved traces).
    pub fn from_epoch(epoch: Instant, wall: String) -> Self {
        Self {
            epoch,
            epoch_wall: wall,
        }
    }

    /// Get milliseconds elapsed since session start.
    pub fn elapsed_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1_000.0
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Convert an elapsed millisecond value to seconds.
    pub fn ms_to_secs(ms: f64) -> f64 {
        ms / 1_000.0
    }

    /// Convert seconds to milliseconds.
    pub fn secs_to_ms(secs: f64) -> f64 {
        secs * 1_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed_ms() < 1_000.0); // less than 1 second
    }

    #[test]
    fn test_ms_secs_conversion() {
        assert!((SessionClock::ms_to_secs(1_500.0) - 1.5).abs() < 1e-9);
        assert!((SessionClock::secs_to_ms(2.0) - 2_000.0).abs() < 1e-9);
    }

}
