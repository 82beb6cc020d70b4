//! Benchmark runner: steps a scenario frame by frame and collects metrics.

use std::time::Instant;

use weft_cloth::Cloth;
use weft_debug::hooks::{FrameState, InspectionHook};
use weft_types::WeftResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// A finished run: the cloth in its final state plus what was measured.
pub struct RunOutcome {
    pub cloth: Cloth,
    pub metrics: BenchmarkMetrics,
}

pub struct BenchmarkRunner;

impl BenchmarkRunner {
    pub fn run(scenario: &Scenario) -> WeftResult<BenchmarkMetrics> {
        Ok(Self::run_with_hooks(scenario, &mut [])?.metrics)
    }

    /// Run `scenario.frames` frames, calling every hook around each one.
    ///
    /// Stops at the first failing frame and returns its error.
    pub fn run_with_hooks(
        scenario: &Scenario,
        hooks: &mut [&mut dyn InspectionHook],
    ) -> WeftResult<RunOutcome> {
        scenario.validate()?;
        let mut cloth = Cloth::with_seed(scenario.grid.clone(), scenario.seed)?;
        let step = &scenario.step;
        let params = &scenario.params;
        let frame_duration = 1.0 / step.frames_per_second as f64;

        let mut frame_times = Vec::with_capacity(scenario.frames as usize);
        let mut self_collision_contacts = 0u64;
        let mut collision_corrections = 0u64;
        let mut stretch_corrections = 0u64;
        let mut kinetic_energy = 0.0;

        let total_start = Instant::now();
        for frame in 0..scenario.frames as u64 {
            let sim_time = frame as f64 * frame_duration;
            for hook in hooks.iter_mut() {
                hook.on_timestep_begin(frame, sim_time);
            }

            let start = Instant::now();
            let report = cloth.simulate_frame(
                step,
                params,
                &scenario.accelerations,
                &scenario.colliders,
            )?;
            frame_times.push(start.elapsed().as_secs_f64());

            self_collision_contacts += report.self_collision_contacts as u64;
            collision_corrections += report.collision_corrections as u64;
            stretch_corrections += report.stretch_corrections as u64;
            kinetic_energy = cloth.kinetic_energy(params, step);

            let state = FrameState {
                cloth: &cloth,
                report: &report,
                kinetic_energy,
            };
            for hook in hooks.iter_mut() {
                hook.on_timestep_end(frame, &state);
            }
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        for hook in hooks.iter_mut() {
            hook.on_simulation_end();
        }

        let max_displacement = cloth
            .point_masses()
            .iter()
            .map(|pm| (pm.position() - pm.start_position()).length())
            .fold(0.0f32, f32::max);
        let (avg_frame_time, min_frame_time, max_frame_time) = if frame_times.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                frame_times.iter().sum::<f64>() / frame_times.len() as f64,
                frame_times.iter().copied().fold(f64::MAX, f64::min),
                frame_times.iter().copied().fold(0.0, f64::max),
            )
        };

        let metrics = BenchmarkMetrics {
            scenario: scenario.name.clone(),
            point_count: cloth.point_masses().len(),
            spring_count: cloth.springs().len(),
            frames: scenario.frames,
            substeps_per_frame: step.substeps_per_frame,
            total_wall_time,
            avg_frame_time,
            min_frame_time,
            max_frame_time,
            final_kinetic_energy: kinetic_energy,
            max_displacement,
            max_strain: cloth.max_strain(),
            self_collision_contacts,
            collision_corrections,
            stretch_corrections,
        };

        tracing::info!(
            scenario = %scenario.name,
            frames = scenario.frames,
            wall_time = total_wall_time,
            max_displacement,
            "scenario finished"
        );

        Ok(RunOutcome { cloth, metrics })
    }

    /// Run every canonical scene, optionally overriding its frame count.
    pub fn run_all(frames: Option<u32>) -> WeftResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| {
                let mut scenario = Scenario::from_kind(kind);
                if let Some(frames) = frames {
                    scenario.frames = frames;
                }
                Self::run(&scenario)
            })
            .collect()
    }
}
