//! GazeTrace Render Core
//!
//! In-memory rendering surfaces fed by the capture session:
//! - **Overlay:** A transparent RGBA canvas showing a single marker at the
//!   most recent gaze point.
//! - **Heatmap:** The density sink boundary plus an intensity-field
//!   implementation that accumulates weighted gaze points.
//!
//! This crate is pure computation — no windowing, no GPU, no platform
//! dependencies. All inputs are data; all outputs are data.

pub mod heatmap;
pub mod overlay;

pub use heatmap::{DensityConfig, DensityMap, DensitySink};
pub use overlay::OverlayCanvas;
