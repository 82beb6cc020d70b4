//! # weft-math
//!
//! Vector primitives for the weft cloth simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, etc.)
//! - Guarded normalization that never divides by zero
//! - Cell discretization used by the self-collision spatial hash

pub mod vector;

// Re-export glam types as the canonical math types for weft.
pub use glam::{Vec2, Vec3};
pub use vector::{cell_index, distance, unit_or_zero};
