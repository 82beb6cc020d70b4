//! Inspection hooks for live debugging.
//!
//! Hooks are handed to the frame loop and called at fixed points to capture
//! metrics or state. They only ever see the cloth by shared reference.

use weft_cloth::{Cloth, StepReport};
use weft_telemetry::events::{EventKind, SimulationEvent};
use weft_telemetry::EventBus;

/// What a hook sees at the end of a frame.
pub struct FrameState<'a> {
    pub cloth: &'a Cloth,
    /// Merged report of the frame's sub-steps.
    pub report: &'a StepReport,
    pub kinetic_energy: f64,
}

/// Trait for simulation inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each frame:
///   hook.on_timestep_begin(frame, sim_time)
///   cloth.simulate_frame(..)
///   hook.on_timestep_end(frame, state)
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook {
    fn on_timestep_begin(&mut self, timestep: u64, sim_time: f64) {
        let _ = (timestep, sim_time);
    }

    fn on_timestep_end(&mut self, timestep: u64, state: &FrameState<'_>) {
        let _ = (timestep, state);
    }

    fn on_simulation_end(&mut self) {}

    fn name(&self) -> &str;
}

/// Translates frame lifecycle calls into telemetry events.
///
/// Events are buffered until drained or forwarded to a bus.
#[derive(Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Emit every buffered event on `bus`.
    pub fn forward_to(&mut self, bus: &EventBus) {
        for event in self.events.drain(..) {
            bus.emit(event);
        }
    }

    fn push(&mut self, timestep: u64, kind: EventKind) {
        self.events.push(SimulationEvent::new(timestep, kind));
    }
}

impl InspectionHook for TelemetryHook {
    fn on_timestep_begin(&mut self, timestep: u64, sim_time: f64) {
        self.push(timestep, EventKind::TimestepBegin { sim_time });
    }

    fn on_timestep_end(&mut self, timestep: u64, state: &FrameState<'_>) {
        let report = state.report;
        if report.self_collision_contacts > 0 {
            self.push(
                timestep,
                EventKind::SelfCollision {
                    contacts: report.self_collision_contacts,
                },
            );
        }
        self.push(
            timestep,
            EventKind::StretchLimit {
                corrected: report.stretch_corrections,
                max_strain: report.max_strain,
            },
        );
        self.push(
            timestep,
            EventKind::Energy {
                kinetic: state.kinetic_energy,
            },
        );
        self.push(
            timestep,
            EventKind::TimestepEnd {
                wall_time: report.wall_time,
            },
        );
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
