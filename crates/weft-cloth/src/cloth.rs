//! The cloth simulation engine.
//!
//! [`Cloth`] owns the point-mass and spring stores and advances them one
//! sub-step at a time. Each phase finishes over every entity before the
//! next one starts:
//!
//! ```text
//! simulate():
//!   1. forces  = Σ mass · acceleration          (scratch buffer, reset)
//!   2. forces += Hookean spring forces          (enabled categories only)
//!   3. Verlet integration of unpinned masses
//!   4. self-collision                           (spatial hash)
//!   5. rigid-body collision                     (caller's order)
//!   6. stretch limiting                         (one pass, spring order)
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weft_math::{unit_or_zero, Vec3};
use weft_types::{PointMassId, SpringId, WeftResult};

use crate::collidable::Collidable;
use crate::grid::{build_point_masses, build_springs, GridSpec};
use crate::params::{ClothParameters, StepConfig};
use crate::point_mass::PointMass;
use crate::report::StepReport;
use crate::self_collision::SelfCollision;
use crate::spring::{Spring, SpringType};
use crate::stretch::{limit_stretch, max_strain};

/// A mass-spring cloth.
pub struct Cloth {
    spec: GridSpec,
    point_masses: Vec<PointMass>,
    springs: Vec<Spring>,
    /// Per-step force accumulator, one entry per point mass.
    forces: Vec<Vec3>,
    self_collision: SelfCollision,
    steps_taken: u64,
}

impl Cloth {
    /// Build the grid and springs described by `spec`.
    ///
    /// Vertical grids draw their out-of-plane jitter from `rng`.
    pub fn new<R: Rng>(spec: GridSpec, rng: &mut R) -> WeftResult<Self> {
        spec.validate()?;

        let point_masses = build_point_masses(&spec, rng);
        let springs = build_springs(&spec, &point_masses);
        let forces = vec![Vec3::ZERO; point_masses.len()];
        let self_collision = SelfCollision::new(&spec);

        tracing::info!(
            points = point_masses.len(),
            springs = springs.len(),
            pinned = point_masses.iter().filter(|pm| pm.is_pinned()).count(),
            orientation = ?spec.orientation,
            "cloth built"
        );

        Ok(Self {
            spec,
            point_masses,
            springs,
            forces,
            self_collision,
            steps_taken: 0,
        })
    }

    /// Build with a jitter source seeded from `seed`.
    pub fn with_seed(spec: GridSpec, seed: u64) -> WeftResult<Self> {
        Self::new(spec, &mut StdRng::seed_from_u64(seed))
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Point masses in row-major grid order.
    ///
    /// Only meaningful between steps.
    pub fn point_masses(&self) -> &[PointMass] {
        &self.point_masses
    }

    pub fn point_mass(&self, id: PointMassId) -> Option<&PointMass> {
        self.point_masses.get(id.index())
    }

    /// Current positions in row-major grid order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.point_masses.iter().map(PointMass::position).collect()
    }

    /// Id of the point mass at grid coordinate `(column, row)`.
    pub fn id_at(&self, column: usize, row: usize) -> Option<PointMassId> {
        (column < self.spec.num_width_points && row < self.spec.num_height_points)
            .then(|| PointMassId(self.spec.index(column, row) as u32))
    }

    /// Springs in enumeration order.
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id.index())
    }

    pub fn spring_count(&self, spring_type: SpringType) -> usize {
        self.springs
            .iter()
            .filter(|s| s.spring_type == spring_type)
            .count()
    }

    /// Sub-steps simulated since construction or the last reset.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Uniform per-point mass: total fabric mass over the point count.
    pub fn mass_per_point(&self, params: &ClothParameters) -> f32 {
        self.spec.width * self.spec.height * params.density / self.spec.point_count() as f32
    }

    /// Kinetic energy estimated from the Verlet history of free point masses.
    pub fn kinetic_energy(&self, params: &ClothParameters, step: &StepConfig) -> f64 {
        let mass = self.mass_per_point(params) as f64;
        let dt = step.dt() as f64;
        self.point_masses
            .iter()
            .filter(|pm| !pm.is_pinned())
            .map(|pm| {
                let v = pm.displacement().as_dvec3() / dt;
                0.5 * mass * v.length_squared()
            })
            .sum()
    }

    /// Largest current spring strain.
    pub fn max_strain(&self) -> f32 {
        max_strain(&self.springs, &self.point_masses)
    }

    /// Advance every free point mass by one sub-step.
    ///
    /// Inputs are validated before any state changes; a rejected step
    /// leaves the cloth exactly as it was.
    pub fn simulate<C: Collidable>(
        &mut self,
        step: &StepConfig,
        params: &ClothParameters,
        accelerations: &[Vec3],
        collidables: &[C],
    ) -> WeftResult<StepReport> {
        step.validate()?;
        params.validate()?;

        let start = Instant::now();
        let mass = self.mass_per_point(params);
        let dt = step.dt();

        // 1-2. Forces
        self.accumulate_external_forces(mass, accelerations);
        self.accumulate_spring_forces(params);

        // 3. Verlet integration
        self.integrate(mass, dt, params.damping_factor());

        // 4. Self-collision
        let self_collision = self
            .self_collision
            .solve(&mut self.point_masses, step.substeps_per_frame);

        // 5. Rigid bodies
        let collision_corrections = self.collide(collidables);

        // 6. Stretch limiting
        let stretch = limit_stretch(&self.springs, &mut self.point_masses);

        self.steps_taken += 1;

        let report = StepReport {
            substeps: 1,
            self_collision_contacts: self_collision.contacts,
            collision_corrections,
            stretch_corrections: stretch.corrected,
            max_strain: self.max_strain(),
            wall_time: start.elapsed().as_secs_f64(),
        };

        if !self.point_masses.iter().all(|pm| pm.position().is_finite()) {
            tracing::warn!(step = self.steps_taken, "non-finite point mass positions");
        }
        tracing::debug!(
            step = self.steps_taken,
            contacts = report.self_collision_contacts,
            collisions = report.collision_corrections,
            stretched = report.stretch_corrections,
            max_strain = report.max_strain,
            "cloth step"
        );

        Ok(report)
    }

    /// Run `substeps_per_frame` sub-steps and return the merged report.
    pub fn simulate_frame<C: Collidable>(
        &mut self,
        step: &StepConfig,
        params: &ClothParameters,
        accelerations: &[Vec3],
        collidables: &[C],
    ) -> WeftResult<StepReport> {
        let mut frame = StepReport::default();
        for _ in 0..step.substeps_per_frame {
            let report = self.simulate(step, params, accelerations, collidables)?;
            frame.merge(&report);
        }
        Ok(frame)
    }

    /// Put every point mass back at its start position, at rest.
    pub fn reset(&mut self) {
        for pm in &mut self.point_masses {
            pm.reset();
        }
        self.forces.fill(Vec3::ZERO);
        self.steps_taken = 0;
    }

    fn accumulate_external_forces(&mut self, mass: f32, accelerations: &[Vec3]) {
        let external: Vec3 = accelerations.iter().map(|&a| mass * a).sum();
        self.forces.fill(external);
    }

    fn accumulate_spring_forces(&mut self, params: &ClothParameters) {
        for spring in &self.springs {
            if !params.is_enabled(spring.spring_type) {
                continue;
            }
            let a = spring.pm_a.index();
            let b = spring.pm_b.index();
            let ab = self.point_masses[b].position() - self.point_masses[a].position();
            let magnitude =
                params.ks * spring.spring_type.ks_scale() * (ab.length() - spring.rest_length);
            let force_on_a = magnitude * unit_or_zero(ab);

            self.forces[a] += force_on_a;
            self.forces[b] -= force_on_a;
        }
    }

    fn integrate(&mut self, mass: f32, dt: f32, damping_factor: f32) {
        let dt2 = dt * dt;
        for (pm, &force) in self.point_masses.iter_mut().zip(&self.forces) {
            if pm.is_pinned() {
                continue;
            }
            pm.integrate(damping_factor, force / mass * dt2);
        }
    }

    /// Offer every free point mass to every body, in the caller's order.
    fn collide<C: Collidable>(&mut self, collidables: &[C]) -> u32 {
        if collidables.is_empty() {
            return 0;
        }
        let mut corrected = 0;
        for pm in self.point_masses.iter_mut().filter(|pm| !pm.is_pinned()) {
            let before = pm.position();
            for body in collidables {
                body.collide(pm);
            }
            if pm.position() != before {
                corrected += 1;
            }
        }
        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collidable::NO_COLLIDABLES;
    use crate::grid::Orientation;
    use weft_types::constants::MAX_STRAIN;

    fn one_step() -> StepConfig {
        StepConfig::new(90.0, 1)
    }

    #[test]
    fn stretch_cap_holds_after_one_step() {
        let spec = GridSpec::new(1.0, 1.0, 2, 1).with_thickness(0.001);
        let mut cloth = Cloth::with_seed(spec, 0).unwrap();
        let far = Vec3::new(2.0, 1.0, 0.0);
        cloth.point_masses[1] = PointMass::new(far, false);

        let params = ClothParameters {
            ks: 0.0,
            ..ClothParameters::springless()
        };
        let report = cloth.simulate(&one_step(), &params, &[], NO_COLLIDABLES).unwrap();

        let spring = cloth.springs()[0];
        let length = (cloth.point_masses[1].position() - cloth.point_masses[0].position()).length();
        assert_eq!(report.stretch_corrections, 1);
        assert!(length <= spring.rest_length * (1.0 + MAX_STRAIN) + 1e-5);
    }

    #[test]
    fn perturbed_cloth_stays_near_rest_without_damping() {
        let spec = GridSpec::new(1.0, 1.0, 4, 4).with_thickness(0.001);
        let mut cloth = Cloth::with_seed(spec, 0).unwrap();
        let kicked = cloth.point_masses[5].position() + Vec3::new(0.01, 0.005, -0.01);
        cloth.point_masses[5] = PointMass::new(kicked, false);

        let params = ClothParameters::undamped();
        let step = StepConfig::default();
        for _ in 0..100 {
            cloth.simulate(&step, &params, &[], NO_COLLIDABLES).unwrap();
        }

        for spring in cloth.springs() {
            let length = (cloth.point_masses[spring.pm_a.index()].position()
                - cloth.point_masses[spring.pm_b.index()].position())
            .length();
            assert!(length.is_finite());
            assert!(length > 0.5 * spring.rest_length, "spring collapsed: {length}");
            assert!(
                length <= spring.rest_length * (1.0 + MAX_STRAIN) + 1e-3,
                "spring overstretched: {length} vs rest {}",
                spring.rest_length
            );
        }
    }

    #[test]
    fn disabled_category_contributes_no_force() {
        let spec = GridSpec::new(1.0, 1.0, 3, 1)
            .with_orientation(Orientation::Horizontal)
            .with_thickness(0.0);
        let mut cloth = Cloth::with_seed(spec, 0).unwrap();
        // Stretch only the bending spring (0 -> 2) by moving point 2 along x.
        let moved = cloth.point_masses[2].position() + Vec3::new(0.01, 0.0, 0.0);
        cloth.point_masses[2] = PointMass::new(moved, false);

        let params = ClothParameters {
            enable_structural: false,
            enable_shearing: false,
            enable_bending: false,
            ..Default::default()
        };
        cloth.accumulate_external_forces(1.0, &[]);
        cloth.accumulate_spring_forces(&params);
        assert!(cloth.forces.iter().all(|f| *f == Vec3::ZERO));

        let params = ClothParameters {
            enable_structural: false,
            enable_shearing: false,
            ..Default::default()
        };
        cloth.accumulate_external_forces(1.0, &[]);
        cloth.accumulate_spring_forces(&params);
        // Newton's third law: bending forces cancel in sum.
        let total: Vec3 = cloth.forces.iter().copied().sum();
        assert!(total.length() < 1e-3);
        assert!(cloth.forces[0].x > 0.0);
        assert!(cloth.forces[2].x < 0.0);
        assert_eq!(cloth.forces[1], Vec3::ZERO);
    }
}
