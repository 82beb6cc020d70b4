//! Self-collision resolution.
//!
//! Every step the spatial hash is rebuilt once, then point masses are
//! visited in store order. Each free point mass averages the repulsions
//! `(2·thickness − d)` pointing away from every neighbour in its bucket
//! closer than `2 · thickness`, scales the average by `1 / substeps` and
//! moves by it at once. Later point masses measure against neighbours
//! that have already moved; bucket membership stays as hashed at the
//! start of the pass. Pinned point masses repel others but are never moved.

use weft_math::{unit_or_zero, Vec3};

use crate::grid::GridSpec;
use crate::point_mass::PointMass;
use crate::spatial_hash::SpatialHash;

/// Result of one self-collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfCollisionResult {
    /// Neighbour pairs (counted from each side) within `2 · thickness`.
    pub contacts: u32,
    /// Point masses that received a correction.
    pub corrected: u32,
}

/// Self-collision system: hash, then resolve point by point.
pub struct SelfCollision {
    hash: SpatialHash,
    thickness: f32,
}

impl SelfCollision {
    pub fn new(spec: &GridSpec) -> Self {
        Self {
            hash: SpatialHash::for_grid(spec),
            thickness: spec.thickness,
        }
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// The hash as left by the last [`solve`](Self::solve).
    pub fn spatial_hash(&self) -> &SpatialHash {
        &self.hash
    }

    /// Run detection and correction over all point masses, in order.
    pub fn solve(&mut self, point_masses: &mut [PointMass], substeps: u32) -> SelfCollisionResult {
        self.hash.rebuild(point_masses);

        let reach = 2.0 * self.thickness;
        let relax = 1.0 / substeps.max(1) as f32;
        let mut result = SelfCollisionResult::default();

        for i in 0..point_masses.len() {
            if point_masses[i].is_pinned() {
                continue;
            }
            let position = point_masses[i].position();
            let mut total = Vec3::ZERO;
            let mut count = 0u32;

            for &candidate in self.hash.bucket(self.hash.hash_position(position)) {
                if candidate.index() == i {
                    continue;
                }
                let offset = position - point_masses[candidate.index()].position();
                let dist = offset.length();
                if dist <= reach {
                    total += unit_or_zero(offset) * (reach - dist);
                    count += 1;
                }
            }

            if count > 0 {
                point_masses[i].translate(total / count as f32 * relax);
                result.contacts += count;
                result.corrected += 1;
            }
        }

        result
    }
}
