//! Shared state of one simulation run.

use parking_lot::Mutex;
use tracing::debug;

use crate::config::{ServiceDurations, SimConfig};
use crate::core::customer::Customer;
use crate::core::error::SimError;
use crate::core::events::{EventSink, SimEvent};
use crate::core::queue::CustomerQueue;
use crate::semaphore::Semaphore;

/// Owner of every primitive and every piece of shared mutable state.
///
/// One `Facility` exists per run, shared by `Arc` with every actor thread.
/// The queue, the served counter, and the scale are each guarded by their
/// own dedicated primitive and none is ever taken while holding another, so
/// lock-ordering cycles are ruled out by construction. The event sink has
/// its own mutex as well, but it is observability only and is never held
/// across a protocol step.
pub struct Facility {
    /// Admission gate, initialized to the occupancy limit.
    capacity: Semaphore,
    /// Work-available signal, one release per enqueue. Shutdown-broadcast
    /// releases are the sole exception and carry no queue item.
    ready: Semaphore,
    /// Exclusive shared equipment, initialized to one permit.
    scale: Semaphore,
    /// Pending customers, FIFO, mutated only under this mutex.
    queue: Mutex<CustomerQueue>,
    /// Services rendered so far, in `[0, customer_total]`.
    served: Mutex<usize>,
    customer_total: usize,
    worker_total: usize,
    durations: ServiceDurations,
    events: Option<Mutex<Box<dyn EventSink>>>,
}

impl Facility {
    /// Build the shared state for a run from a validated configuration.
    pub(crate) fn new(config: &SimConfig, events: Option<Box<dyn EventSink>>) -> Self {
        Self {
            capacity: Semaphore::new(config.capacity),
            ready: Semaphore::new(0),
            scale: Semaphore::new(1),
            queue: Mutex::new(CustomerQueue::new()),
            served: Mutex::new(0),
            customer_total: config.customer_count,
            worker_total: config.worker_count,
            durations: config.durations.clone(),
            events: events.map(Mutex::new),
        }
    }

    /// Total customers this run will serve.
    pub(crate) const fn customer_total(&self) -> usize {
        self.customer_total
    }

    /// Size of the worker pool.
    #[allow(dead_code)]
    pub(crate) const fn worker_total(&self) -> usize {
        self.worker_total
    }

    /// Per-kind service durations for this run.
    pub(crate) const fn durations(&self) -> &ServiceDurations {
        &self.durations
    }

    /// The scale semaphore, for workers serving package tasks.
    pub(crate) const fn scale(&self) -> &Semaphore {
        &self.scale
    }

    /// The ready signal, for worker wait loops.
    pub(crate) const fn ready(&self) -> &Semaphore {
        &self.ready
    }

    /// Block until an admission slot is free, then take it.
    pub(crate) fn admit(&self, customer_id: u64) {
        self.capacity.acquire();
        self.record(SimEvent::CustomerEntered {
            customer: customer_id,
        });
    }

    /// Free one admission slot.
    pub(crate) fn depart(&self, customer_id: u64) {
        self.record(SimEvent::CustomerLeft {
            customer: customer_id,
        });
        self.capacity.release();
    }

    /// Append a customer to the queue and signal that work is available.
    ///
    /// The queue mutex is dropped before the ready release; the release
    /// itself carries the hand-off, so a worker woken here always finds the
    /// record.
    pub(crate) fn enqueue_customer(&self, customer: Customer) {
        let id = customer.id;
        let seq = {
            let mut queue = self.queue.lock();
            queue.enqueue(customer)
        };
        self.record(SimEvent::CustomerEnqueued { customer: id, seq });
        debug!(customer_id = id, seq, "customer enqueued");
        self.ready.release();
    }

    /// Remove the head customer.
    ///
    /// Only called after a non-terminal ready-signal wake, so an empty queue
    /// here is a fatal protocol violation.
    ///
    /// # Errors
    ///
    /// [`SimError::QueueInvariant`] if the queue is empty.
    pub(crate) fn dequeue_customer(&self) -> Result<(Customer, u64), SimError> {
        let mut queue = self.queue.lock();
        queue.dequeue()
    }

    /// Whether every customer has already been served.
    ///
    /// Read under the counter's own mutex; workers call this immediately
    /// after a ready-signal wake and before touching the queue, which is how
    /// a shutdown-broadcast wake is told apart from a real one.
    pub(crate) fn all_served(&self) -> bool {
        *self.served.lock() == self.customer_total
    }

    /// Count one completed service and return the new total.
    pub(crate) fn record_completion(&self) -> usize {
        let mut served = self.served.lock();
        *served += 1;
        *served
    }

    /// Services rendered so far.
    pub(crate) fn served(&self) -> usize {
        *self.served.lock()
    }

    /// Wake every sibling still blocked on the ready signal so it can
    /// observe the terminal counter and exit.
    ///
    /// Called exactly once per run, by the worker that completed the last
    /// service; issues `worker_total - 1` extra releases.
    pub(crate) fn broadcast_shutdown(&self, worker_id: usize) {
        let signals = self.worker_total - 1;
        for _ in 0..signals {
            self.ready.release();
        }
        self.record(SimEvent::ShutdownBroadcast {
            worker: worker_id,
            signals,
        });
        debug!(worker_id, signals, "shutdown broadcast to idle siblings");
    }

    /// Record an event if a sink is attached.
    pub(crate) fn record(&self, event: SimEvent) {
        if let Some(sink) = &self.events {
            sink.lock().record(event);
        }
    }

    /// Outstanding queue accounting: (enqueued, dequeued) totals.
    pub(crate) fn queue_totals(&self) -> (u64, u64) {
        let queue = self.queue.lock();
        (queue.total_enqueued(), queue.total_dequeued())
    }
}
