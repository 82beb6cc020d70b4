//! Collidable capability.
//!
//! Rigid bodies live outside the core. The engine only asks each of them,
//! once per point mass per step, to correct that point mass's position.

use crate::point_mass::PointMass;

/// A rigid body that can push point masses out of itself.
///
/// # Contract
///
/// `collide` may read `position` and `last_position` and may change
/// `position` through [`PointMass::set_position`]. It cannot touch
/// `last_position`, `pinned` or `start_position`. A point mass that is not
/// penetrating the body must be left exactly as it was.
///
/// # Implementations
/// - `SphereCollider`, `PlaneCollider` and the `Collider` sum type in `weft-contact`
pub trait Collidable {
    /// Correct `point_mass` if it penetrates this body.
    fn collide(&self, point_mass: &mut PointMass);

    /// Returns a short name for logs and reports.
    fn name(&self) -> &str {
        "collidable"
    }
}

impl<T: Collidable + ?Sized> Collidable for &T {
    fn collide(&self, point_mass: &mut PointMass) {
        (**self).collide(point_mass);
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Collidable + ?Sized> Collidable for Box<T> {
    fn collide(&self, point_mass: &mut PointMass) {
        (**self).collide(point_mass);
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An empty body list, for steps without rigid bodies.
pub const NO_COLLIDABLES: &[&dyn Collidable] = &[];
