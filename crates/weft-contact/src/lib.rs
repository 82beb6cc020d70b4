//! # weft-contact
//!
//! Rigid bodies the cloth collides with.
//!
//! Each primitive implements [`weft_cloth::Collidable`]: it looks at a
//! point mass's previous and current positions and, if the point ended the
//! step inside the body, moves it back towards the surface. Friction in
//! [0, 1] attenuates that push, which models sliding contact rather than a
//! hard stop.
//!
//! [`Collider`] is the closed sum of the primitives shipped here; it is what
//! scenarios store and serialize.

pub mod collider;
pub mod plane;
pub mod sphere;

pub use collider::Collider;
pub use plane::PlaneCollider;
pub use sphere::SphereCollider;

use weft_types::{WeftError, WeftResult};

pub(crate) fn validate_friction(friction: f32) -> WeftResult<()> {
    if (0.0..=1.0).contains(&friction) {
        Ok(())
    } else {
        Err(WeftError::InvalidConfig(format!(
            "friction must be in [0, 1], got {friction}"
        )))
    }
}
