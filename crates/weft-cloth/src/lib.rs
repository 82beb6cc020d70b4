//! # weft-cloth
//!
//! Mass-spring cloth simulation core.
//!
//! ## Key Types
//!
//! - [`Cloth`] — owns point masses and springs, advances one sub-step at a time
//! - [`GridSpec`] — grid extents, resolution, thickness, orientation, pins
//! - [`ClothParameters`] / [`StepConfig`] — per-step material and time settings
//! - [`Collidable`] — capability implemented by rigid bodies outside the core
//! - [`SpatialHash`] — self-collision broad phase, rebuilt every step

pub mod cloth;
pub mod collidable;
pub mod grid;
pub mod params;
pub mod point_mass;
pub mod report;
pub mod self_collision;
pub mod spatial_hash;
pub mod spring;
pub mod stretch;

pub use cloth::Cloth;
pub use collidable::{Collidable, NO_COLLIDABLES};
pub use grid::{GridSpec, Orientation};
pub use params::{ClothParameters, StepConfig};
pub use point_mass::PointMass;
pub use report::StepReport;
pub use self_collision::{SelfCollision, SelfCollisionResult};
pub use spatial_hash::SpatialHash;
pub use spring::{Spring, SpringType};
