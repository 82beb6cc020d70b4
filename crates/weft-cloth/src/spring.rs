//! Distance constraints between pairs of point masses.

use serde::{Deserialize, Serialize};
use weft_types::constants::BENDING_KS_SCALE;
use weft_types::PointMassId;

/// Spring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringType {
    /// Immediate left / upper neighbour. Resists stretch.
    Structural,
    /// Diagonal neighbour. Resists shear.
    Shearing,
    /// Neighbour two cells away. Resists out-of-plane folding.
    Bending,
}

impl SpringType {
    /// Returns all spring categories in enumeration order.
    pub fn all() -> &'static [SpringType] {
        &[SpringType::Structural, SpringType::Shearing, SpringType::Bending]
    }

    /// Multiplier applied to `ks` for this category.
    ///
    /// Bending springs are softened so the cloth creases instead of
    /// behaving like a plate.
    #[inline]
    pub fn ks_scale(self) -> f32 {
        match self {
            SpringType::Bending => BENDING_KS_SCALE,
            SpringType::Structural | SpringType::Shearing => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpringType::Structural => "structural",
            SpringType::Shearing => "shearing",
            SpringType::Bending => "bending",
        }
    }
}

/// A spring between two point masses, identified by index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Earlier point mass in grid order.
    pub pm_a: PointMassId,
    /// Point mass whose grid cell generated the spring.
    pub pm_b: PointMassId,
    /// Length in the undeformed configuration. Always positive.
    pub rest_length: f32,
    pub spring_type: SpringType,
}

impl Spring {
    pub fn new(pm_a: PointMassId, pm_b: PointMassId, rest_length: f32, spring_type: SpringType) -> Self {
        Self {
            pm_a,
            pm_b,
            rest_length,
            spring_type,
        }
    }

    /// Fractional elongation for a given current length (`0.0` at rest).
    #[inline]
    pub fn strain(&self, length: f32) -> f32 {
        length / self.rest_length - 1.0
    }
}
