//! Fixation detection using the dispersion-threshold (I-DT) method.
//!
//! # Algorithm
//!
//! 1. **Normalize** timestamps so the earliest sample is t = 0.
//! 2. **Grow** a window from the current sample while both the x and y
//!    dispersion (max - min) stay within the dispersion radius.
//! 3. **Emit** a fixation (centroid position, start/end time) when the
//!    grown window holds more than one sample and spans at least the
//!    minimum duration; otherwise advance by one sample.

use serde::{Deserialize, Serialize};

use gazetrace_model::sample::GazeSample;

/// Configuration for the fixation detector.
#[derive(Debug, Clone, Copy)]
pub struct FixationConfig {
    /// Maximum per-axis dispersion within a fixation, in pixels.
    pub dispersion_radius_px: f64,

    /// Minimum fixation duration in milliseconds.
    pub min_duration_ms: f64,
}

impl Default for FixationConfig {
    fn default() -> Self {
        Self {
            dispersion_radius_px: 50.0,
            min_duration_ms: 100.0,
        }
    }
}

/// A detected fixation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    /// Centroid X position in pixels.
    pub x: f64,

    /// Centroid Y position in pixels.
    pub y: f64,

    /// Start time in milliseconds (normalized, first sample = 0).
    pub start: f64,

    /// End time in milliseconds (normalized).
    pub end: f64,
}

impl Fixation {
    /// Fixation duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.end - self.start
    }
}

/// Detect fixations in a recorded sample sequence.
pub fn detect_fixations(samples: &[GazeSample], config: FixationConfig) -> Vec<Fixation> {
    if samples.len() < 2 {
        return vec![];
    }

    // Normalize so the earliest timestamp is zero
    let t0 = samples
        .iter()
        .map(|s| s.timestamp)
        .fold(f64::INFINITY, f64::min);

    let mut fixations = vec![];
    let mut i = 0;

    while i < samples.len() {
        let mut j = i + 1;
        while j < samples.len() && within_dispersion(&samples[i..=j], config.dispersion_radius_px)
        {
            j += 1;
        }

        // Window is samples[i..j]
        let duration = samples[j - 1].timestamp - samples[i].timestamp;
        if j - i > 1 && duration >= config.min_duration_ms {
            let window = &samples[i..j];
            let n = window.len() as f64;
            let cx = window.iter().map(|s| s.x).sum::<f64>() / n;
            let cy = window.iter().map(|s| s.y).sum::<f64>() / n;

            fixations.push(Fixation {
                x: cx,
                y: cy,
                start: samples[i].timestamp - t0,
                end: samples[j - 1].timestamp - t0,
            });
            i = j;
        } else {
            i += 1;
        }
    }

    fixations
}

fn within_dispersion(window: &[GazeSample], radius: f64) -> bool {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for s in window {
        min_x = min_x.min(s.x);
        max_x = max_x.max(s.x);
        min_y = min_y.min(s.y);
        max_y = max_y.max(s.y);
    }

    (max_x - min_x) <= radius && (max_y - min_y) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A cluster of samples around (x, y) starting at `start_ms`, one
    /// sample every 20 ms.
    fn cluster(x: f64, y: f64, start_ms: f64, count: usize) -> Vec<GazeSample> {
        (0..count)
            .map(|i| {
                let jitter = (i % 3) as f64; // stays well inside the radius
                GazeSample::new(x + jitter, y - jitter, start_ms + i as f64 * 20.0)
            })
            .collect()
    }

    #[test]
    fn test_two_clusters_yield_two_fixations() {
        let mut samples = cluster(100.0, 100.0, 0.0, 10); // 0..180ms
        samples.extend(cluster(400.0, 400.0, 200.0, 10)); // 200..380ms

        let fixations = detect_fixations(&samples, FixationConfig::default());
        assert_eq!(fixations.len(), 2);

        assert!((fixations[0].x - 100.0).abs() < 5.0);
        assert!((fixations[0].y - 100.0).abs() < 5.0);
        assert!((fixations[1].x - 400.0).abs() < 5.0);
        assert!(fixations[0].duration_ms() >= 100.0);
        assert!(fixations[0].end <= fixations[1].start);
    }

    #[test]
    fn test_scattered_samples_yield_no_fixations() {
        // Each sample jumps 200px, never within dispersion
        let samples: Vec<GazeSample> = (0..20)
            .map(|i| GazeSample::new(i as f64 * 200.0, i as f64 * 200.0, i as f64 * 20.0))
            .collect();

        let fixations = detect_fixations(&samples, FixationConfig::default());
        assert!(fixations.is_empty());
    }

    #[test]
    fn test_short_dwell_below_min_duration_is_not_a_fixation() {
        // Only 3 samples, 40ms span — under the 100ms minimum
        let samples = cluster(100.0, 100.0, 0.0, 3);
        let fixations = detect_fixations(&samples, FixationConfig::default());
        assert!(fixations.is_empty());
    }

    #[test]
    fn test_timestamps_are_normalized() {
        // Recording starts late; fixation times still start from zero
        let samples = cluster(100.0, 100.0, 5_000.0, 10);
        let fixations = detect_fixations(&samples, FixationConfig::default());
        assert_eq!(fixations.len(), 1);
        assert_eq!(fixations[0].start, 0.0);
        assert!((fixations[0].end - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_single_sample_inputs() {
        assert!(detect_fixations(&[], FixationConfig::default()).is_empty());
        assert!(detect_fixations(
            &[GazeSample::new(1.0, 2.0, 0.0)],
            FixationConfig::default()
        )
        .is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_samples() -> impl Strategy<Value = Vec<GazeSample>> {
            proptest::collection::vec((0.0f64..2000.0, 0.0f64..2000.0), 0..64).prop_map(|points| {
                points
                    .into_iter()
                    .enumerate()
                    .map(|(i, (x, y))| GazeSample::new(x, y, i as f64 * 20.0))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn fixations_are_ordered_and_within_recording(samples in arb_samples()) {
                let fixations = detect_fixations(&samples, FixationConfig::default());
                let span = samples.last().map(|s| s.timestamp).unwrap_or(0.0);

                let mut prev_end = 0.0;
                for f in &fixations {
                    prop_assert!(f.start >= prev_end);
                    prop_assert!(f.end >= f.start);
                    prop_assert!(f.end <= span);
                    prop_assert!(f.duration_ms() >= 100.0);
                    prev_end = f.end;
                }
            }
        }
    }
}
