//! Event consumers.

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SimulationEvent};

/// Something that receives events from an [`EventBus`](crate::EventBus).
pub trait EventSink: Send {
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the run ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events into a buffer shared with whoever created it.
///
/// Clone the sink (or grab [`VecSink::buffer`]) before boxing it into the
/// bus to keep a handle for inspection.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected events.
    pub fn buffer(&self) -> Arc<Mutex<Vec<SimulationEvent>>> {
        Arc::clone(&self.events)
    }

    /// Copy of everything collected so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`.
///
/// Per-step bookkeeping goes out at `trace`, everything else at `debug`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match &event.kind {
            EventKind::TimestepBegin { .. } | EventKind::TimestepEnd { .. } => {
                tracing::trace!(timestep = event.timestep, event = ?event.kind, "{}", event.name());
            }
            _ => {
                tracing::debug!(timestep = event.timestep, event = ?event.kind, "{}", event.name());
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
