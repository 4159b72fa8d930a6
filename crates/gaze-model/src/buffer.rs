//! Append-only gaze sample buffer.
//!
//! Insertion order is capture order. Samples are never reordered or
//! mutated in place. The buffer is owned by the session that fills it,
//! not by process-wide state; export works off cloned snapshots.

use crate::sample::GazeSample;

/// In-memory ordered sequence of recorded samples.
#[derive(Debug, Default, Clone)]
pub struct GazeBuffer {
    samples: Vec<GazeSample>,
}

impl GazeBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample. Capture order is preserved.
    pub fn push(&mut self, sample: GazeSample) {
        self.samples.push(sample);
    }

    /// Number of samples recorded so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// View of the recorded samples in capture order.
    pub fn samples(&self) -> &[GazeSample] {
        &self.samples
    }

    /// Clone the current contents for export. Later appends do not
    /// affect a snapshot already taken.
    pub fn snapshot(&self) -> Vec<GazeSample> {
        self.samples.clone()
    }

    /// Time span covered by the buffer in milliseconds, or zero when
    /// fewer than two samples exist.
    pub fn span_ms(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).max(0.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut buffer = GazeBuffer::new();
        buffer.push(GazeSample::new(100.0, 200.0, 0.0));
        buffer.push(GazeSample::new(150.0, 210.0, 16.0));
        buffer.push(GazeSample::new(160.0, 215.0, 33.0));

        let timestamps: Vec<f64> = buffer.samples().iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![0.0, 16.0, 33.0]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut buffer = GazeBuffer::new();
        buffer.push(GazeSample::new(1.0, 2.0, 0.0));
        let snapshot = buffer.snapshot();
        buffer.push(GazeSample::new(3.0, 4.0, 10.0));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_span() {
        let mut buffer = GazeBuffer::new();
        assert_eq!(buffer.span_ms(), 0.0);
        buffer.push(GazeSample::new(0.0, 0.0, 100.0));
        assert_eq!(buffer.span_ms(), 0.0);
        buffer.push(GazeSample::new(0.0, 0.0, 350.0));
        assert!((buffer.span_ms() - 250.0).abs() < 1e-9);
    }
}
