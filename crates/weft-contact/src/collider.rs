//! Closed set of rigid bodies.

use serde::{Deserialize, Serialize};
use weft_cloth::{Collidable, PointMass};
use weft_types::WeftResult;

use crate::plane::PlaneCollider;
use crate::sphere::SphereCollider;

/// Any rigid body weft ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Collider {
    Sphere(SphereCollider),
    Plane(PlaneCollider),
}

impl Collider {
    pub fn friction(&self) -> f32 {
        match self {
            Collider::Sphere(s) => s.friction,
            Collider::Plane(p) => p.friction,
        }
    }

    pub fn validate(&self) -> WeftResult<()> {
        match self {
            Collider::Sphere(s) => s.validate(),
            Collider::Plane(p) => p.validate(),
        }
    }
}

impl Collidable for Collider {
    fn collide(&self, point_mass: &mut PointMass) {
        match self {
            Collider::Sphere(s) => s.collide(point_mass),
            Collider::Plane(p) => p.collide(point_mass),
        }
    }

    fn name(&self) -> &str {
        match self {
            Collider::Sphere(s) => s.name(),
            Collider::Plane(p) => p.name(),
        }
    }
}

impl From<SphereCollider> for Collider {
    fn from(sphere: SphereCollider) -> Self {
        Collider::Sphere(sphere)
    }
}

impl From<PlaneCollider> for Collider {
    fn from(plane: PlaneCollider) -> Self {
        Collider::Plane(plane)
    }
}
