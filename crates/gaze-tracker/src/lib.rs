//! GazeTrace Tracker
//!
//! Bridges a gaze source to the capture sinks. Uses a pluggable backend
//! architecture to support different sources:
//!
//! - **Replay:** Re-delivers a recorded trace file, detection gaps included
//! - **Scripted:** Pre-loaded frames for tests
//! - **Scanpath:** Deterministic synthetic reading pattern for demos
//!
//! The session fans every detection out to the gaze buffer, the density
//! sink, and the overlay canvas — in that fixed order, one frame at a
//! time, in delivery order. Absent detections change nothing.

pub mod backends;
pub mod export;
pub mod recorder;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gazetrace_common::error::GazeResult;
use gazetrace_model::buffer::GazeBuffer;
use gazetrace_model::sample::GazeSample;
use gazetrace_model::trace::GazeFrame;
use gazetrace_render::heatmap::DensitySink;
use gazetrace_render::overlay::OverlayCanvas;

/// Result of polling a gaze backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePoll {
    /// A frame was delivered.
    Frame(GazeFrame),
    /// No frame available right now; poll again later.
    Pending,
    /// The source has ended (finite sources only).
    Ended,
}

/// Trait for gaze source backends.
///
/// Construction is where source initialization failure surfaces: a
/// backend that cannot start (missing trace file, unavailable device)
/// returns an error instead of producing a silently inert session.
pub trait GazeBackend: Send {
    /// Poll for the next gaze frame.
    fn poll(&mut self) -> GazeResult<SourcePoll>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Check if the backend is available on this system.
    fn is_available(&self) -> bool;
}

/// Viewport dimensions the session renders against.
#[derive(Debug, Clone, Copy)]
pub struct SessionViewport {
    pub width: u32,
    pub height: u32,
}

impl Default for SessionViewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// A capture session that coordinates a gaze backend with the three sinks.
pub struct GazeSession {
    backend: Box<dyn GazeBackend>,
    buffer: GazeBuffer,
    density: Box<dyn DensitySink>,
    overlay: OverlayCanvas,
    viewport: SessionViewport,
    recorder: Option<recorder::TraceWriter>,
    stop_flag: Arc<AtomicBool>,
    frames_seen: u64,
}

impl GazeSession {
    /// Create a new capture session.
    pub fn new(
        backend: Box<dyn GazeBackend>,
        density: Box<dyn DensitySink>,
        overlay: OverlayCanvas,
        viewport: SessionViewport,
    ) -> Self {
        Self {
            backend,
            buffer: GazeBuffer::new(),
            density,
            overlay,
            viewport,
            recorder: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            frames_seen: 0,
        }
    }

    /// Attach a trace recorder. Every delivered frame, absence markers
    /// included, is appended to the trace.
    pub fn record_to(&mut self, recorder: recorder::TraceWriter) {
        self.recorder = Some(recorder);
    }

    /// Deliver a single frame to the session.
    ///
    /// On a detection: append to the buffer, forward a unit-weighted point
    /// to the density sink, then redraw the overlay marker — in that fixed
    /// order, synchronously. On an absent detection: no buffer append, no
    /// sink forward, no redraw.
    pub fn deliver(&mut self, frame: GazeFrame) -> GazeResult<()> {
        self.frames_seen += 1;

        if let Some(recorder) = &mut self.recorder {
            recorder.write_frame(&frame)?;
        }

        let Some(sample) = frame.to_sample() else {
            return Ok(());
        };

        self.buffer.push(sample);
        self.density.add_point(sample.x, sample.y, 1.0);
        self.overlay
            .draw_dot(self.viewport.width, self.viewport.height, sample.x, sample.y);

        Ok(())
    }

    /// Run the capture loop until the source ends or the stop flag is set.
    ///
    /// Frames are processed to completion one at a time, in delivery order.
    pub async fn run(&mut self) -> GazeResult<u64> {
        tracing::info!(backend = %self.backend.name(), "Gaze session started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.backend.poll() {
                Ok(SourcePoll::Frame(frame)) => {
                    self.deliver(frame)?;
                }
                Ok(SourcePoll::Pending) => {
                    // No frame available, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                Ok(SourcePoll::Ended) => {
                    tracing::debug!("Gaze source ended");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Gaze source error");
                }
            }
        }

        if let Some(recorder) = &mut self.recorder {
            recorder.flush()?;
        }

        tracing::info!(
            frames = self.frames_seen,
            samples = self.buffer.len(),
            "Gaze session stopped"
        );
        Ok(self.frames_seen)
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Number of frames delivered so far, absences included.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Number of samples recorded so far.
    pub fn samples_recorded(&self) -> usize {
        self.buffer.len()
    }

    /// The gaze buffer.
    pub fn buffer(&self) -> &GazeBuffer {
        &self.buffer
    }

    /// Snapshot of the buffer for export.
    pub fn snapshot(&self) -> Vec<GazeSample> {
        self.buffer.snapshot()
    }

    /// The overlay canvas.
    pub fn overlay(&self) -> &OverlayCanvas {
        &self.overlay
    }

    /// The density sink.
    pub fn density(&self) -> &dyn DensitySink {
        self.density.as_ref()
    }
}
