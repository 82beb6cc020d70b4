//! Scalar type alias for the simulation.

/// The floating-point type used throughout the simulation.
///
/// Positions are `glam::Vec3`, so this stays in lockstep with `f32`.
pub type Scalar = f32;
