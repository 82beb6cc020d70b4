//! Per-step reporting.

use serde::{Deserialize, Serialize};

/// Summary of one sub-step (or of several, once merged).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Number of sub-steps covered.
    pub substeps: u32,
    /// Neighbour pairs resolved by self-collision.
    pub self_collision_contacts: u32,
    /// Point masses moved by rigid bodies.
    pub collision_corrections: u32,
    /// Springs shortened by stretch limiting.
    pub stretch_corrections: u32,
    /// Largest spring strain left after the step.
    pub max_strain: f32,
    /// Wall-clock time (seconds).
    pub wall_time: f64,
}

impl StepReport {
    /// Fold `other` into this report. Counters add, strain keeps the latest.
    pub fn merge(&mut self, other: &StepReport) {
        self.substeps += other.substeps;
        self.self_collision_contacts += other.self_collision_contacts;
        self.collision_corrections += other.collision_corrections;
        self.stretch_corrections += other.stretch_corrections;
        self.max_strain = other.max_strain;
        self.wall_time += other.wall_time;
    }
}
