//! Saccade derivation and aggregate gaze metrics.
//!
//! A saccade is the movement between two consecutive fixations: its
//! distance is the Euclidean gap between fixation centroids, its duration
//! the time between the first fixation's end and the next one's start.

use serde::{Deserialize, Serialize};

use crate::fixation::Fixation;

/// A movement between two consecutive fixations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Saccade {
    pub from_x: f64,
    pub from_y: f64,
    pub to_x: f64,
    pub to_y: f64,

    /// Euclidean distance between fixation centroids, in pixels.
    pub distance: f64,

    /// Time between fixations in seconds.
    pub duration_sec: f64,
}

/// Aggregate saccade metrics for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaccadeSummary {
    /// Mean saccadic distance in pixels.
    pub avg_distance_px: f64,

    /// Mean saccadic velocity in pixels per second.
    pub avg_velocity_px_per_sec: f64,

    /// Saccades per second of recording.
    pub saccades_per_sec: f64,
}

/// Derive saccades from an ordered fixation sequence.
pub fn derive_saccades(fixations: &[Fixation]) -> Vec<Saccade> {
    fixations
        .windows(2)
        .map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            let dx = to.x - from.x;
            let dy = to.y - from.y;
            Saccade {
                from_x: from.x,
                from_y: from.y,
                to_x: to.x,
                to_y: to.y,
                distance: (dx * dx + dy * dy).sqrt(),
                duration_sec: (to.start - from.end) / 1_000.0,
            }
        })
        .collect()
}

/// Summarize saccade metrics. `recording_span_secs` is the duration of
/// the whole recording; returns `None` when there are no saccades.
pub fn summarize_saccades(
    saccades: &[Saccade],
    recording_span_secs: f64,
) -> Option<SaccadeSummary> {
    if saccades.is_empty() {
        return None;
    }

    let n = saccades.len() as f64;
    let avg_distance_px = saccades.iter().map(|s| s.distance).sum::<f64>() / n;

    // Velocity is averaged over saccades with a measurable duration
    let velocities: Vec<f64> = saccades
        .iter()
        .filter(|s| s.duration_sec > 0.0)
        .map(|s| s.distance / s.duration_sec)
        .collect();
    let avg_velocity_px_per_sec = if velocities.is_empty() {
        0.0
    } else {
        velocities.iter().sum::<f64>() / velocities.len() as f64
    };

    let saccades_per_sec = if recording_span_secs > 0.0 {
        n / recording_span_secs
    } else {
        0.0
    };

    Some(SaccadeSummary {
        avg_distance_px,
        avg_velocity_px_per_sec,
        saccades_per_sec,
    })
}
