//! Infinite plane collision.

use serde::{Deserialize, Serialize};
use weft_cloth::{Collidable, PointMass};
use weft_math::{unit_or_zero, Vec3};
use weft_types::constants::SURFACE_OFFSET;
use weft_types::{WeftError, WeftResult};

/// A static, two-sided infinite plane.
///
/// A point mass whose step went from one side of the plane to the other
/// (or onto it) is moved back along its displacement to the crossing
/// point, nudged [`SURFACE_OFFSET`] towards the side it came from, and the
/// result is blended with `last_position` by `(1 - friction)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneCollider {
    /// Any point on the plane.
    pub point: Vec3,
    /// Plane normal. Normalized on construction.
    pub normal: Vec3,
    /// Fraction of the correction withheld, in [0, 1].
    #[serde(default)]
    pub friction: f32,
}

impl PlaneCollider {
    pub fn new(point: Vec3, normal: Vec3, friction: f32) -> Self {
        Self {
            point,
            normal: unit_or_zero(normal),
            friction,
        }
    }

    /// A horizontal floor at height `y`, facing up.
    pub fn floor(y: f32, friction: f32) -> Self {
        Self::new(Vec3::new(0.0, y, 0.0), Vec3::Y, friction)
    }

    /// Signed distance from `p` to the plane along the normal.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }

    pub fn validate(&self) -> WeftResult<()> {
        if unit_or_zero(self.normal) == Vec3::ZERO {
            return Err(WeftError::InvalidConfig(
                "plane normal must be non-zero".into(),
            ));
        }
        crate::validate_friction(self.friction)
    }
}

impl Collidable for PlaneCollider {
    fn collide(&self, point_mass: &mut PointMass) {
        // Deserialized planes may carry an unnormalized normal.
        let normal = unit_or_zero(self.normal);
        let last = point_mass.last_position();
        let current = point_mass.position();
        let d_last = (last - self.point).dot(normal);
        let d_current = (current - self.point).dot(normal);

        let crossed = (d_last > 0.0 && d_current <= 0.0) || (d_last < 0.0 && d_current >= 0.0);
        if !crossed {
            return;
        }

        let t = d_last / (d_last - d_current);
        let crossing = last + (current - last) * t;
        let target = crossing + normal * (SURFACE_OFFSET * d_last.signum());
        point_mass.set_position(last + (target - last) * (1.0 - self.friction));
    }

    fn name(&self) -> &str {
        "plane"
    }
}
