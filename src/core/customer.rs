//! Customer record and actor loop.

use std::sync::Arc;

use tracing::debug;

use crate::core::facility::Facility;
use crate::core::task::TaskKind;
use crate::semaphore::Semaphore;

/// One customer's record.
///
/// Created before the customer thread is spawned; ownership of the record
/// moves into the shared queue on enqueue and then to exactly one worker on
/// dequeue. The customer thread keeps only a clone of the completion
/// semaphore so it can block while the record is in flight.
#[derive(Debug)]
pub struct Customer {
    /// Customer identifier, unique within a run.
    pub id: u64,
    /// The service this customer requests.
    pub task: TaskKind,
    /// One-shot completion signal: released exactly once, by exactly one
    /// worker, after the service is performed.
    pub done: Arc<Semaphore>,
}

impl Customer {
    /// Create a record with a fresh, unsignaled completion semaphore.
    #[must_use]
    pub fn new(id: u64, task: TaskKind) -> Self {
        Self {
            id,
            task,
            done: Arc::new(Semaphore::new(0)),
        }
    }
}

/// Customer actor loop, one thread per customer.
///
/// Wait for an admission slot, enqueue, signal ready once, block until
/// served, then free the slot. Every step is infallible: the blocking
/// primitives cannot fail, and the record hand-off is a move.
pub(crate) fn run(facility: &Arc<Facility>, customer: Customer) {
    let id = customer.id;
    let done = Arc::clone(&customer.done);

    facility.admit(id);
    debug!(customer_id = id, "customer entered the facility");

    facility.enqueue_customer(customer);

    done.acquire();
    debug!(customer_id = id, "customer served, leaving");

    facility.depart(id);
}
