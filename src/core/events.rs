//! Observability side channel.
//!
//! Events are not part of the correctness contract; a run behaves
//! identically with no sink attached. They exist so that tests and callers
//! can observe occupancy, scale exclusivity, FIFO order, and the shutdown
//! handshake without instrumenting the protocol itself.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::task::TaskKind;

/// One observable step of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// A customer passed the capacity gate.
    CustomerEntered {
        /// Customer identifier.
        customer: u64,
    },
    /// A customer was appended to the shared queue.
    CustomerEnqueued {
        /// Customer identifier.
        customer: u64,
        /// Enqueue sequence number, assigned inside the queue critical
        /// section.
        seq: u64,
    },
    /// A worker dequeued a customer and began serving.
    ServiceStarted {
        /// Worker identifier.
        worker: usize,
        /// Customer identifier.
        customer: u64,
        /// The requested service.
        task: TaskKind,
        /// Dequeue sequence number, assigned inside the queue critical
        /// section.
        seq: u64,
    },
    /// A worker took exclusive use of the scale.
    ScaleAcquired {
        /// Worker identifier.
        worker: usize,
    },
    /// A worker gave the scale back.
    ScaleReleased {
        /// Worker identifier.
        worker: usize,
    },
    /// A worker finished a service and signaled the customer.
    ServiceFinished {
        /// Worker identifier.
        worker: usize,
        /// Customer identifier.
        customer: u64,
    },
    /// A served customer released its admission slot.
    CustomerLeft {
        /// Customer identifier.
        customer: u64,
    },
    /// The worker that completed the last service woke its siblings.
    ShutdownBroadcast {
        /// Worker identifier.
        worker: usize,
        /// Number of extra ready-signal releases issued.
        signals: usize,
    },
    /// A worker reached its terminal state.
    WorkerTerminated {
        /// Worker identifier.
        worker: usize,
    },
}

/// Event sink abstraction.
pub trait EventSink: Send {
    /// Record one event.
    fn record(&mut self, event: SimEvent);
}

/// In-memory event sink for testing and dev.
///
/// Clones share the underlying buffer, so a caller can keep one clone to
/// read from after handing the other to the simulation.
#[derive(Clone)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<SimEvent>>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a sink with a bounded buffer; the oldest events are dropped
    /// once the bound is reached.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            max_events,
        }
    }

    /// Snapshot of recorded events, in recording order.
    #[must_use]
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&mut self, event: SimEvent) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.remove(0);
        }
        events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_records_in_order() {
        let mut sink = InMemoryEventSink::new(16);
        sink.record(SimEvent::CustomerEntered { customer: 1 });
        sink.record(SimEvent::CustomerLeft { customer: 1 });

        let events = sink.events();
        assert_eq!(
            events,
            vec![
                SimEvent::CustomerEntered { customer: 1 },
                SimEvent::CustomerLeft { customer: 1 },
            ]
        );
    }

    #[test]
    fn test_sink_is_bounded() {
        let mut sink = InMemoryEventSink::new(2);
        for customer in 0..4 {
            sink.record(SimEvent::CustomerEntered { customer });
        }
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SimEvent::CustomerEntered { customer: 2 });
    }

    #[test]
    fn test_clones_share_the_buffer() {
        let sink = InMemoryEventSink::new(8);
        let mut writer = sink.clone();
        writer.record(SimEvent::WorkerTerminated { worker: 0 });
        assert_eq!(sink.events().len(), 1);
    }
}
