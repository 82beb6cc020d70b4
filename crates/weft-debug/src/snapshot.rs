//! State snapshots for offline inspection.
//!
//! A snapshot captures every point mass's position, previous position and
//! pinned flag, plus the grid it came from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use weft_cloth::{Cloth, GridSpec};
use weft_math::Vec3;
use weft_types::{WeftError, WeftResult};

/// Full point-mass state of a cloth at one frame.
///
/// Serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Frame index when the snapshot was taken.
    pub timestep: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub grid: GridSpec,
    pub positions: Vec<Vec3>,
    pub last_positions: Vec<Vec3>,
    pub pinned: Vec<bool>,
}

/// Aggregate numbers printed by `weft inspect`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSummary {
    pub point_count: usize,
    pub pinned_count: usize,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    pub centroid: Vec3,
    /// Largest `|position - last_position|`.
    pub max_step_displacement: f32,
    pub all_finite: bool,
}

impl StateSnapshot {
    pub fn capture(cloth: &Cloth, timestep: u64, sim_time: f64) -> Self {
        let pms = cloth.point_masses();
        Self {
            timestep,
            sim_time,
            grid: cloth.spec().clone(),
            positions: pms.iter().map(|pm| pm.position()).collect(),
            last_positions: pms.iter().map(|pm| pm.last_position()).collect(),
            pinned: pms.iter().map(|pm| pm.is_pinned()).collect(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    pub fn to_bytes(&self) -> WeftResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| WeftError::Serialization(format!("snapshot encoding failed: {e}")))
    }

    /// Decode and check the per-point arrays agree with each other and the grid.
    pub fn from_bytes(data: &[u8]) -> WeftResult<Self> {
        let snapshot: Self = bincode::deserialize(data)
            .map_err(|e| WeftError::Serialization(format!("snapshot decoding failed: {e}")))?;
        snapshot.check_lengths()?;
        Ok(snapshot)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> WeftResult<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> WeftResult<Self> {
        Self::from_bytes(&fs::read(path)?)
    }

    pub fn summary(&self) -> SnapshotSummary {
        let n = self.positions.len();
        let (bounds_min, bounds_max) = if n == 0 {
            (Vec3::ZERO, Vec3::ZERO)
        } else {
            self.positions.iter().fold(
                (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
                |(lo, hi), &p| (lo.min(p), hi.max(p)),
            )
        };
        let centroid = if n == 0 {
            Vec3::ZERO
        } else {
            self.positions.iter().copied().sum::<Vec3>() / n as f32
        };
        let max_step_displacement = self
            .positions
            .iter()
            .zip(&self.last_positions)
            .map(|(p, l)| (*p - *l).length())
            .fold(0.0f32, f32::max);

        SnapshotSummary {
            point_count: n,
            pinned_count: self.pinned.iter().filter(|&&p| p).count(),
            bounds_min,
            bounds_max,
            centroid,
            max_step_displacement,
            all_finite: self
                .positions
                .iter()
                .chain(&self.last_positions)
                .all(|p| p.is_finite()),
        }
    }

    fn check_lengths(&self) -> WeftResult<()> {
        let n = self.grid.point_count();
        if self.positions.len() != n || self.last_positions.len() != n || self.pinned.len() != n {
            return Err(WeftError::Serialization(format!(
                "snapshot holds {}/{}/{} entries for a {n}-point grid",
                self.positions.len(),
                self.last_positions.len(),
                self.pinned.len()
            )));
        }
        Ok(())
    }
}
