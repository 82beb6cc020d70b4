//! Benchmark metrics: data collected during a run.

use serde::{Deserialize, Serialize};

/// Metrics collected from one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub point_count: usize,
    pub spring_count: usize,
    /// Frames executed.
    pub frames: u32,
    pub substeps_per_frame: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Per-frame wall-clock time (seconds).
    pub avg_frame_time: f64,
    pub min_frame_time: f64,
    pub max_frame_time: f64,
    /// Kinetic energy after the last frame.
    pub final_kinetic_energy: f64,
    /// Largest distance of any point mass from its start position.
    pub max_displacement: f32,
    /// Largest spring strain after the last frame.
    pub max_strain: f32,
    pub self_collision_contacts: u64,
    pub collision_corrections: u64,
    pub stretch_corrections: u64,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,point_count,spring_count,frames,substeps,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,final_ke,max_displacement,max_strain,self_contacts,collision_corrections,stretch_corrections".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6},{},{},{}",
            self.scenario,
            self.point_count,
            self.spring_count,
            self.frames,
            self.substeps_per_frame,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_strain,
            self.self_collision_contacts,
            self.collision_corrections,
            self.stretch_corrections,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
