//! GazeTrace Analysis Core
//!
//! Offline analysis of recorded gaze data:
//! - **Fixations:** Dispersion-threshold (I-DT) fixation detection
//! - **Saccades:** Inter-fixation movements with distance/velocity metrics
//! - **Reports:** CSV tables and a text summary for a session
//!
//! This crate is pure computation plus report writing — no capture, no
//! rendering.

pub mod fixation;
pub mod report;
pub mod saccade;

pub use fixation::{detect_fixations, Fixation, FixationConfig};
pub use saccade::{derive_saccades, summarize_saccades, Saccade, SaccadeSummary};
