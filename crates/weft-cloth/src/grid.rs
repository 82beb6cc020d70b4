//! Grid topology and spring construction.
//!
//! Point masses are laid out row-major on a `num_width_points ×
//! num_height_points` lattice. Springs are generated once per cell
//! against earlier (left / upper) neighbours only, so every unordered
//! neighbour pair gets exactly one spring and the enumeration order is
//! deterministic:
//!
//! ```text
//! for r in rows, for c in columns:
//!     structural  (c-1, r)      structural  (c, r-1)
//!     shearing    (c-1, r-1)    shearing    (c+1, r-1)
//!     bending     (c-2, r)      bending     (c, r-2)
//! ```

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use weft_math::{distance, Vec3};
use weft_types::constants::{DEFAULT_THICKNESS, VERTICAL_JITTER};
use weft_types::{PointMassId, WeftError, WeftResult};

use crate::point_mass::PointMass;
use crate::spring::{Spring, SpringType};

/// Plane the cloth is laid out in at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Flat in the XZ plane at `y = 1.0`.
    #[default]
    Horizontal,
    /// Upright in the XY plane, with a small random `z` jitter.
    Vertical,
}

/// Physical extents, resolution and pinning of a cloth grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: f32,
    pub height: f32,
    pub num_width_points: usize,
    pub num_height_points: usize,
    /// Half the minimum separation kept between point masses by self-collision.
    #[serde(default = "default_thickness")]
    pub thickness: f32,
    #[serde(default)]
    pub orientation: Orientation,
    /// Pinned `[column, row]` grid coordinates.
    #[serde(default)]
    pub pinned: Vec<[usize; 2]>,
}

fn default_thickness() -> f32 {
    DEFAULT_THICKNESS
}

impl GridSpec {
    /// A horizontal, unpinned grid with the default thickness.
    pub fn new(width: f32, height: f32, num_width_points: usize, num_height_points: usize) -> Self {
        Self {
            width,
            height,
            num_width_points,
            num_height_points,
            thickness: DEFAULT_THICKNESS,
            orientation: Orientation::Horizontal,
            pinned: Vec::new(),
        }
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Pins the point mass at grid coordinate `(column, row)`.
    pub fn with_pin(mut self, column: usize, row: usize) -> Self {
        self.pinned.push([column, row]);
        self
    }

    pub fn with_pins(mut self, pins: impl IntoIterator<Item = [usize; 2]>) -> Self {
        self.pinned.extend(pins);
        self
    }

    /// Total number of point masses, saturating on overflow.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.num_width_points.saturating_mul(self.num_height_points)
    }

    /// Row-major index of grid coordinate `(column, row)`.
    #[inline]
    pub fn index(&self, column: usize, row: usize) -> usize {
        row * self.num_width_points + column
    }

    /// Distance between neighbouring point masses along width and height.
    pub fn spacing(&self) -> (f32, f32) {
        (
            self.width / self.num_width_points as f32,
            self.height / self.num_height_points as f32,
        )
    }

    /// Checks the grid can produce non-degenerate geometry.
    pub fn validate(&self) -> WeftResult<()> {
        if self.num_width_points == 0 || self.num_height_points == 0 {
            return Err(WeftError::InvalidGrid(format!(
                "grid needs at least one point per axis, got {}x{}",
                self.num_width_points, self.num_height_points
            )));
        }
        // Point-mass ids are u32.
        match self.num_width_points.checked_mul(self.num_height_points) {
            Some(n) if u32::try_from(n).is_ok() => {}
            _ => {
                return Err(WeftError::InvalidGrid(format!(
                    "{}x{} grid exceeds the point-mass id range",
                    self.num_width_points, self.num_height_points
                )))
            }
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(WeftError::InvalidGrid(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(WeftError::InvalidGrid(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if !(self.thickness.is_finite() && self.thickness >= 0.0) {
            return Err(WeftError::InvalidGrid(format!(
                "thickness must be non-negative, got {}",
                self.thickness
            )));
        }
        if let Some([c, r]) = self
            .pinned
            .iter()
            .find(|[c, r]| *c >= self.num_width_points || *r >= self.num_height_points)
        {
            return Err(WeftError::InvalidGrid(format!(
                "pin ({c}, {r}) lies outside the {}x{} grid",
                self.num_width_points, self.num_height_points
            )));
        }
        Ok(())
    }
}

/// Places the point masses of `spec` in row-major order.
///
/// Vertical grids draw their `z` jitter from `rng`, so a seeded generator
/// gives reproducible builds. The caller is expected to have validated `spec`.
pub fn build_point_masses<R: Rng>(spec: &GridSpec, rng: &mut R) -> Vec<PointMass> {
    let (width_step, height_step) = spec.spacing();
    let pins: HashSet<(usize, usize)> = spec.pinned.iter().map(|&[c, r]| (c, r)).collect();

    let mut point_masses = Vec::with_capacity(spec.point_count());
    for r in 0..spec.num_height_points {
        for c in 0..spec.num_width_points {
            let x = c as f32 * width_step;
            let yz = r as f32 * height_step;
            let position = match spec.orientation {
                Orientation::Horizontal => Vec3::new(x, 1.0, yz),
                Orientation::Vertical => {
                    let jitter = rng.random_range(-VERTICAL_JITTER..=VERTICAL_JITTER);
                    Vec3::new(x, yz, jitter)
                }
            };
            point_masses.push(PointMass::new(position, pins.contains(&(c, r))));
        }
    }
    point_masses
}

/// Generates the springs of `spec` in deterministic order.
///
/// Rest lengths are measured on `point_masses` as built.
pub fn build_springs(spec: &GridSpec, point_masses: &[PointMass]) -> Vec<Spring> {
    let w = spec.num_width_points;
    let h = spec.num_height_points;
    let mut springs = Vec::with_capacity(6 * spec.point_count());

    let mut connect = |a: usize, b: usize, spring_type: SpringType| {
        let rest_length = distance(point_masses[a].position(), point_masses[b].position());
        springs.push(Spring::new(
            PointMassId(a as u32),
            PointMassId(b as u32),
            rest_length,
            spring_type,
        ));
    };

    for r in 0..h {
        for c in 0..w {
            let cur = spec.index(c, r);
            if c >= 1 {
                connect(spec.index(c - 1, r), cur, SpringType::Structural);
            }
            if r >= 1 {
                connect(spec.index(c, r - 1), cur, SpringType::Structural);
            }
            if c >= 1 && r >= 1 {
                connect(spec.index(c - 1, r - 1), cur, SpringType::Shearing);
            }
            if c + 1 < w && r >= 1 {
                connect(spec.index(c + 1, r - 1), cur, SpringType::Shearing);
            }
            if c >= 2 {
                connect(spec.index(c - 2, r), cur, SpringType::Bending);
            }
            if r >= 2 {
                connect(spec.index(c, r - 2), cur, SpringType::Bending);
            }
        }
    }
    springs
}
