//! # weft-debug
//!
//! Inspection hooks called around every simulated frame, and snapshots of
//! the full point-mass state serialized with `bincode` for offline
//! inspection.

pub mod hooks;
pub mod snapshot;

pub use hooks::{FrameState, InspectionHook, TelemetryHook};
pub use snapshot::{SnapshotSummary, StateSnapshot};
