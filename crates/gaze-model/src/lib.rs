//! GazeTrace Data Model
//!
//! Defines the core data contracts for gaze capture sessions:
//! - **Samples:** Timestamped gaze coordinates and the JSON export format
//! - **Buffer:** The append-only in-memory sample sequence
//! - **Traces:** The replayable JSONL frame stream, including detection gaps
//!
//! Coordinates are screen pixels; timestamps are milliseconds since
//! session start.

pub mod buffer;
pub mod sample;
pub mod trace;

pub use buffer::*;
pub use sample::*;
pub use trace::*;
