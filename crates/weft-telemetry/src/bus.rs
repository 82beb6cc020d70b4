//! Event bus with pluggable sinks.
//!
//! Producers push into an `mpsc` channel; [`EventBus::flush`] drains it
//! and hands every event to each registered sink in registration order.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// A disabled bus drops events on `emit`.
    enabled: bool,
}

impl EventBus {
    /// A bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A sender producers on other threads can clone and emit through.
    ///
    /// Events sent this way bypass the enabled flag.
    pub fn sender(&self) -> mpsc::Sender<SimulationEvent> {
        self.sender.clone()
    }

    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as `self`, so this cannot fail.
        let _ = self.sender.send(event);
    }

    /// Dispatch all pending events. Returns how many were delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flush, then let every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
