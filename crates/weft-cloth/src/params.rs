//! Simulation parameters.
//!
//! [`ClothParameters`] are the material and constraint switches read every
//! step; [`StepConfig`] fixes the time discretization.

use serde::{Deserialize, Serialize};
use weft_types::constants::{
    DEFAULT_DAMPING_PERCENT, DEFAULT_DENSITY, DEFAULT_FRAMES_PER_SECOND, DEFAULT_KS,
    DEFAULT_SUBSTEPS_PER_FRAME,
};
use weft_types::{WeftError, WeftResult};

use crate::spring::SpringType;

/// Material parameters and spring category switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothParameters {
    /// Spring stiffness (N/m).
    pub ks: f32,

    /// Fabric density. Total cloth mass is `width * height * density`.
    pub density: f32,

    /// Damping percentage in [0, 100] applied to the Verlet velocity.
    pub damping: f32,

    pub enable_structural: bool,
    pub enable_shearing: bool,
    pub enable_bending: bool,
}

impl Default for ClothParameters {
    fn default() -> Self {
        Self {
            ks: DEFAULT_KS,
            density: DEFAULT_DENSITY,
            damping: DEFAULT_DAMPING_PERCENT,
            enable_structural: true,
            enable_shearing: true,
            enable_bending: true,
        }
    }
}

impl ClothParameters {
    /// Parameters with every spring category disabled.
    ///
    /// Point masses then only respond to external accelerations and
    /// collisions, which isolates those phases.
    pub fn springless() -> Self {
        Self {
            enable_structural: false,
            enable_shearing: false,
            enable_bending: false,
            ..Default::default()
        }
    }

    /// Parameters with damping removed.
    pub fn undamped() -> Self {
        Self {
            damping: 0.0,
            ..Default::default()
        }
    }

    /// Whether springs of the given category contribute forces.
    #[inline]
    pub fn is_enabled(&self, spring_type: SpringType) -> bool {
        match spring_type {
            SpringType::Structural => self.enable_structural,
            SpringType::Shearing => self.enable_shearing,
            SpringType::Bending => self.enable_bending,
        }
    }

    /// Fraction of the Verlet velocity kept per step.
    #[inline]
    pub fn damping_factor(&self) -> f32 {
        1.0 - self.damping / 100.0
    }

    /// Rejects values that would produce degenerate or exploding dynamics.
    pub fn validate(&self) -> WeftResult<()> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(WeftError::InvalidParameters(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        if !(self.ks.is_finite() && self.ks >= 0.0) {
            return Err(WeftError::InvalidParameters(format!(
                "ks must be non-negative, got {}",
                self.ks
            )));
        }
        if !(0.0..=100.0).contains(&self.damping) {
            return Err(WeftError::InvalidParameters(format!(
                "damping must be a percentage in [0, 100], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

/// Time discretization: render frames and physics sub-steps per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub frames_per_second: f32,
    pub substeps_per_frame: u32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            substeps_per_frame: DEFAULT_SUBSTEPS_PER_FRAME,
        }
    }
}

impl StepConfig {
    pub fn new(frames_per_second: f32, substeps_per_frame: u32) -> Self {
        Self {
            frames_per_second,
            substeps_per_frame,
        }
    }

    /// Sub-step duration: `1 / (fps * substeps)`.
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.frames_per_second / self.substeps_per_frame as f32
    }

    pub fn validate(&self) -> WeftResult<()> {
        if !(self.frames_per_second.is_finite() && self.frames_per_second > 0.0) {
            return Err(WeftError::InvalidParameters(format!(
                "frames_per_second must be positive, got {}",
                self.frames_per_second
            )));
        }
        if self.substeps_per_frame == 0 {
            return Err(WeftError::InvalidParameters(
                "substeps_per_frame must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
