//! Scenarios: grid + material + timing + rigid bodies for one run.
//!
//! Five canonical scenes:
//! 1. **pinned2**: vertical sheet hanging from its two top corners
//! 2. **pinned4**: horizontal sheet held at all four corners
//! 3. **sphere**: horizontal sheet dropped onto a sphere
//! 4. **plane**: horizontal sheet dropped onto a floor
//! 5. **self_collision**: vertical sheet falling onto a floor and folding on itself

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use weft_cloth::{ClothParameters, GridSpec, Orientation, StepConfig};
use weft_contact::{Collider, PlaneCollider, SphereCollider};
use weft_math::Vec3;
use weft_types::constants::GRAVITY;
use weft_types::{WeftError, WeftResult};

/// Points along each side of the canonical scenes.
pub const DEFAULT_RESOLUTION: usize = 32;

/// Frames run by the canonical scenes (2 s at the default rate).
pub const DEFAULT_FRAMES: u32 = 180;

/// Which canonical scene to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Pinned2,
    Pinned4,
    Sphere,
    Plane,
    SelfCollision,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Pinned2,
            ScenarioKind::Pinned4,
            ScenarioKind::Sphere,
            ScenarioKind::Plane,
            ScenarioKind::SelfCollision,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Pinned2 => "pinned2",
            ScenarioKind::Pinned4 => "pinned4",
            ScenarioKind::Sphere => "sphere",
            ScenarioKind::Plane => "plane",
            ScenarioKind::SelfCollision => "self_collision",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = WeftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                WeftError::InvalidConfig(format!(
                    "unknown scenario '{s}', expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// A fully specified run.
///
/// Everything but `name` and `grid` has a default, so a scene file can be
/// as short as:
///
/// ```toml
/// name = "flag"
///
/// [grid]
/// width = 1.0
/// height = 1.0
/// num_width_points = 16
/// num_height_points = 16
/// orientation = "vertical"
/// pinned = [[0, 15], [0, 0]]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub grid: GridSpec,
    #[serde(default)]
    pub params: ClothParameters,
    #[serde(default)]
    pub step: StepConfig,
    /// Rigid bodies, applied in order.
    #[serde(default)]
    pub colliders: Vec<Collider>,
    /// External accelerations summed every sub-step.
    #[serde(default = "default_accelerations")]
    pub accelerations: Vec<Vec3>,
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Seed for the vertical-grid jitter.
    #[serde(default)]
    pub seed: u64,
}

fn default_accelerations() -> Vec<Vec3> {
    vec![Vec3::new(0.0, -GRAVITY, 0.0)]
}

fn default_frames() -> u32 {
    DEFAULT_FRAMES
}

impl Scenario {
    /// A scene with default material, timing and gravity, and no bodies.
    pub fn new(name: impl Into<String>, grid: GridSpec) -> Self {
        Self {
            name: name.into(),
            grid,
            params: ClothParameters::default(),
            step: StepConfig::default(),
            colliders: Vec::new(),
            accelerations: default_accelerations(),
            frames: DEFAULT_FRAMES,
            seed: 0,
        }
    }

    /// Vertical sheet pinned at the two corners of its top row.
    pub fn pinned2() -> Self {
        let n = DEFAULT_RESOLUTION;
        let grid = GridSpec::new(1.0, 1.0, n, n)
            .with_orientation(Orientation::Vertical)
            .with_pins([[0, n - 1], [n - 1, n - 1]]);
        Self::new(ScenarioKind::Pinned2.name(), grid)
    }

    /// Horizontal sheet pinned at its four corners.
    pub fn pinned4() -> Self {
        let n = DEFAULT_RESOLUTION;
        let grid =
            GridSpec::new(1.0, 1.0, n, n).with_pins([[0, 0], [n - 1, 0], [0, n - 1], [n - 1, n - 1]]);
        Self::new(ScenarioKind::Pinned4.name(), grid)
    }

    /// Horizontal sheet falling onto a sphere under its middle.
    pub fn sphere() -> Self {
        let n = DEFAULT_RESOLUTION;
        Self::new(ScenarioKind::Sphere.name(), GridSpec::new(1.0, 1.0, n, n))
            .with_collider(SphereCollider::new(Vec3::new(0.5, 0.0, 0.5), 0.5, 0.3))
    }

    /// Horizontal sheet falling onto a floor at `y = 0`.
    pub fn plane() -> Self {
        let n = DEFAULT_RESOLUTION;
        Self::new(ScenarioKind::Plane.name(), GridSpec::new(1.0, 1.0, n, n))
            .with_collider(PlaneCollider::new(Vec3::new(0.5, 0.0, 0.5), Vec3::Y, 0.5))
    }

    /// Vertical sheet falling onto a floor below it and crumpling.
    pub fn self_collision() -> Self {
        let n = DEFAULT_RESOLUTION;
        let grid = GridSpec::new(1.0, 1.0, n, n)
            .with_orientation(Orientation::Vertical)
            .with_thickness(0.01);
        Self::new(ScenarioKind::SelfCollision.name(), grid)
            .with_collider(PlaneCollider::floor(-0.5, 0.5))
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Pinned2 => Self::pinned2(),
            ScenarioKind::Pinned4 => Self::pinned4(),
            ScenarioKind::Sphere => Self::sphere(),
            ScenarioKind::Plane => Self::plane(),
            ScenarioKind::SelfCollision => Self::self_collision(),
        }
    }

    pub fn with_collider(mut self, collider: impl Into<Collider>) -> Self {
        self.colliders.push(collider.into());
        self
    }

    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_params(mut self, params: ClothParameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.step = step;
        self
    }

    /// Simulation time covered by `frames` frames.
    pub fn duration(&self) -> f64 {
        self.frames as f64 / self.step.frames_per_second as f64
    }

    pub fn validate(&self) -> WeftResult<()> {
        self.grid.validate()?;
        self.params.validate()?;
        self.step.validate()?;
        for collider in &self.colliders {
            collider.validate()?;
        }
        if let Some(a) = self.accelerations.iter().find(|a| !a.is_finite()) {
            return Err(WeftError::InvalidConfig(format!(
                "acceleration must be finite, got {a}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a scene from TOML text.
    pub fn from_toml_str(text: &str) -> WeftResult<Self> {
        let scenario: Self =
            toml::from_str(text).map_err(|e| WeftError::InvalidConfig(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: impl AsRef<Path>) -> WeftResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}
