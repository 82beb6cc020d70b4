//! Point masses — the simulated particles of the cloth.
//!
//! Velocity is never stored: it is implied by the difference between
//! `position` and `last_position` (Verlet history). Per-step forces live
//! in a scratch buffer owned by [`Cloth`](crate::Cloth), not here.

use serde::{Deserialize, Serialize};
use weft_math::Vec3;

/// A simulated particle.
///
/// Only `position` can be changed from outside the crate, through
/// [`PointMass::set_position`]; that is the mutation [`Collidable`](crate::Collidable)
/// implementations are allowed to make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    start_position: Vec3,
    position: Vec3,
    last_position: Vec3,
    pinned: bool,
}

impl PointMass {
    /// Creates a point mass at rest at `position`.
    pub fn new(position: Vec3, pinned: bool) -> Self {
        Self {
            start_position: position,
            position,
            last_position: position,
            pinned,
        }
    }

    /// Creates an unpinned point mass that moved from `last_position` to
    /// `position` during the previous step.
    ///
    /// Mostly useful for exercising collidables in isolation.
    pub fn with_motion(last_position: Vec3, position: Vec3) -> Self {
        Self {
            start_position: last_position,
            position,
            last_position,
            pinned: false,
        }
    }

    /// Rest-state position, restored by [`Cloth::reset`](crate::Cloth::reset).
    #[inline]
    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position one step prior.
    #[inline]
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Displacement over the last step (`position - last_position`).
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        self.position - self.last_position
    }

    /// Overwrites the current position, leaving the Verlet history alone.
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Verlet update: `x' = x + damping_factor * (x - x_last) + accel_dt2`.
    pub(crate) fn integrate(&mut self, damping_factor: f32, accel_dt2: Vec3) {
        let current = self.position;
        self.position += damping_factor * (self.position - self.last_position) + accel_dt2;
        self.last_position = current;
    }

    #[inline]
    pub(crate) fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub(crate) fn reset(&mut self) {
        self.position = self.start_position;
        self.last_position = self.start_position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_without_history_applies_acceleration_only() {
        let mut pm = PointMass::new(Vec3::ZERO, false);
        pm.integrate(1.0, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(pm.position(), Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(pm.last_position(), Vec3::ZERO);
    }

    #[test]
    fn integrate_carries_damped_velocity() {
        let mut pm = PointMass::with_motion(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        pm.integrate(0.5, Vec3::ZERO);
        assert_eq!(pm.position(), Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(pm.last_position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn reset_restores_history() {
        let mut pm = PointMass::new(Vec3::new(1.0, 2.0, 3.0), false);
        pm.integrate(1.0, Vec3::ONE);
        pm.integrate(1.0, Vec3::ONE);
        pm.reset();
        assert_eq!(pm.position(), pm.start_position());
        assert_eq!(pm.last_position(), pm.start_position());
    }
}
