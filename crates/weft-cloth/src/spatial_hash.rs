//! Spatial hash broad phase for self-collision.
//!
//! Buckets point masses by a single scalar key derived from their cell:
//!
//! ```text
//! key = 31² · ⌊x / w⌋ + 31 · ⌊y / h⌋ + ⌊z / t⌋
//! w = 3 · width / num_width_points
//! h = 3 · height / num_height_points
//! t = max(w, h)
//! ```
//!
//! Distinct cells can alias to the same key. That is part of the
//! broad-phase behaviour the thickness and damping defaults are tuned
//! against, so there is no secondary key.

use std::collections::HashMap;

use weft_math::{cell_index, Vec3};
use weft_types::PointMassId;

use crate::grid::GridSpec;
use crate::point_mass::PointMass;

const CELL_PRIME: i64 = 31;

/// Scalar-keyed spatial hash over point-mass positions.
pub struct SpatialHash {
    /// Cell extents along x, y and z.
    cell_size: Vec3,
    /// Hash key to the point masses currently inside.
    map: HashMap<i64, Vec<PointMassId>>,
}

impl SpatialHash {
    /// Creates an empty hash with cells three grid spacings wide.
    pub fn new(width: f32, height: f32, num_width_points: usize, num_height_points: usize) -> Self {
        let w = 3.0 * width / num_width_points as f32;
        let h = 3.0 * height / num_height_points as f32;
        Self {
            cell_size: Vec3::new(w, h, w.max(h)),
            map: HashMap::new(),
        }
    }

    pub fn for_grid(spec: &GridSpec) -> Self {
        Self::new(
            spec.width,
            spec.height,
            spec.num_width_points,
            spec.num_height_points,
        )
    }

    #[inline]
    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    /// Hash a position to its bucket key.
    pub fn hash_position(&self, position: Vec3) -> i64 {
        let cx = cell_index(position.x, self.cell_size.x);
        let cy = cell_index(position.y, self.cell_size.y);
        let cz = cell_index(position.z, self.cell_size.z);
        (CELL_PRIME * CELL_PRIME)
            .wrapping_mul(cx)
            .wrapping_add(CELL_PRIME.wrapping_mul(cy))
            .wrapping_add(cz)
    }

    /// Drops every bucket and re-inserts all point masses at their
    /// current positions.
    pub fn rebuild(&mut self, point_masses: &[PointMass]) {
        self.map.clear();
        for (i, pm) in point_masses.iter().enumerate() {
            let key = self.hash_position(pm.position());
            self.map.entry(key).or_default().push(PointMassId(i as u32));
        }
    }

    /// Point masses stored under `key`, in insertion order.
    pub fn bucket(&self, key: i64) -> &[PointMassId] {
        self.map.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
