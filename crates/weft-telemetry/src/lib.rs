//! # weft-telemetry
//!
//! Structured events emitted while a cloth is being stepped (timing,
//! self-collision contacts, stretch corrections, energy) and an event bus
//! that hands them to pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
