//! Analytical sphere collision.

use serde::{Deserialize, Serialize};
use weft_cloth::{Collidable, PointMass};
use weft_math::{unit_or_zero, Vec3};
use weft_types::constants::SURFACE_OFFSET;
use weft_types::{WeftError, WeftResult};

/// A static sphere.
///
/// A point mass that ends a step inside the sphere is sent back towards
/// the surface point on the ray from the origin through it:
///
/// ```text
/// tangent  = origin + unit(p - origin) · radius
/// p'       = last + (tangent - last) · (1 - friction)
/// ```
///
/// Points within [`SURFACE_OFFSET`] of the surface count as resting on it,
/// so a corrected point is left alone on the next call despite rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Center of the sphere.
    pub origin: Vec3,
    pub radius: f32,
    /// Fraction of the correction withheld, in [0, 1].
    #[serde(default)]
    pub friction: f32,
}

impl SphereCollider {
    pub fn new(origin: Vec3, radius: f32, friction: f32) -> Self {
        Self {
            origin,
            radius,
            friction,
        }
    }

    /// Whether `point` lies strictly inside the sphere.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.origin).length() < self.radius
    }

    pub fn validate(&self) -> WeftResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(WeftError::InvalidConfig(format!(
                "sphere radius must be positive, got {}",
                self.radius
            )));
        }
        crate::validate_friction(self.friction)
    }
}

impl Collidable for SphereCollider {
    fn collide(&self, point_mass: &mut PointMass) {
        let op = point_mass.position() - self.origin;
        if op.length() >= self.radius - SURFACE_OFFSET {
            return;
        }
        let outward = unit_or_zero(op);
        // Sitting on the center there is no outward direction; leave it.
        if outward == Vec3::ZERO {
            return;
        }
        let tangent = self.origin + outward * self.radius;
        let last = point_mass.last_position();
        point_mass.set_position(last + (tangent - last) * (1.0 - self.friction));
    }

    fn name(&self) -> &str {
        "sphere"
    }
}
