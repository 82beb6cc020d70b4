//! Simulation event types.
//!
//! Events are small value types tagged with the index of the step that
//! produced them. They carry plain numbers only, so this crate does not
//! depend on the engine.

use serde::{Deserialize, Serialize};

/// An event emitted while stepping a cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub timestep: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    TimestepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Step completed.
    TimestepEnd {
        /// Wall-clock time spent in the step (seconds).
        wall_time: f64,
    },

    /// Self-collision pass finished.
    SelfCollision {
        /// Neighbour pairs closer than twice the thickness.
        contacts: u32,
    },

    /// Stretch limiting pass finished.
    StretchLimit {
        /// Springs that were shortened.
        corrected: u32,
        /// Largest strain left after the pass.
        max_strain: f32,
    },

    /// Kinetic energy estimate after the step.
    Energy { kinetic: f64 },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(timestep: u64, kind: EventKind) -> Self {
        Self { timestep, kind }
    }

    /// Short snake_case name of the event kind, used as a log field.
    pub fn name(&self) -> &str {
        match &self.kind {
            EventKind::TimestepBegin { .. } => "timestep_begin",
            EventKind::TimestepEnd { .. } => "timestep_end",
            EventKind::SelfCollision { .. } => "self_collision",
            EventKind::StretchLimit { .. } => "stretch_limit",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { label, .. } => label.as_str(),
        }
    }
}
