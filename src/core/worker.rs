//! Worker actor loop.
//!
//! Each worker runs the state machine
//! `WaitingForWork -> Serving -> RecordingCompletion -> CheckingTermination`
//! until it either observes the terminal counter on wake or completes the
//! last service itself. In the latter case it wakes every idle sibling with
//! extra ready-signal releases before exiting, so termination needs no
//! supervisor.

use std::sync::Arc;
use std::thread;

use tracing::{debug, error, info};

use crate::core::customer::Customer;
use crate::core::error::SimError;
use crate::core::events::SimEvent;
use crate::core::facility::Facility;

/// Worker actor loop, one thread per worker.
///
/// # Errors
///
/// [`SimError::QueueInvariant`] if a non-terminal wake finds the queue
/// empty. That means the ready-signal accounting is broken; the error is
/// fatal for the whole run and is never retried.
pub(crate) fn run(facility: &Arc<Facility>, worker_id: usize) -> Result<(), SimError> {
    loop {
        // WaitingForWork. A wake is either one enqueued customer or a
        // shutdown broadcast; the counter, read before touching the queue,
        // tells them apart.
        facility.ready().acquire();

        if facility.all_served() {
            facility.record(SimEvent::WorkerTerminated { worker: worker_id });
            debug!(worker_id, "woken for shutdown, exiting");
            return Ok(());
        }

        // Serving.
        let (customer, seq) = match facility.dequeue_customer() {
            Ok(pair) => pair,
            Err(err) => {
                error!(worker_id, %err, "protocol violation, aborting run");
                return Err(err);
            }
        };
        facility.record(SimEvent::ServiceStarted {
            worker: worker_id,
            customer: customer.id,
            task: customer.task,
            seq,
        });
        info!(
            worker_id,
            customer_id = customer.id,
            task = %customer.task,
            "serving customer"
        );
        serve(facility, worker_id, &customer);

        // RecordingCompletion: exactly one release of the customer's
        // one-shot signal.
        customer.done.release();
        facility.record(SimEvent::ServiceFinished {
            worker: worker_id,
            customer: customer.id,
        });
        debug!(worker_id, customer_id = customer.id, "finished serving");

        // CheckingTermination.
        let served = facility.record_completion();
        if served == facility.customer_total() {
            facility.broadcast_shutdown(worker_id);
            facility.record(SimEvent::WorkerTerminated { worker: worker_id });
            debug!(worker_id, "served the last customer, exiting");
            return Ok(());
        }
    }
}

/// Perform one service, sleeping for the configured duration.
///
/// Package tasks bracket the sleep with exclusive use of the scale; the
/// other kinds touch no shared resource.
fn serve(facility: &Arc<Facility>, worker_id: usize, customer: &Customer) {
    let duration = facility.durations().for_task(customer.task);

    if customer.task.needs_scale() {
        facility.scale().acquire();
        facility.record(SimEvent::ScaleAcquired { worker: worker_id });
        debug!(worker_id, "scale in use");

        thread::sleep(duration);

        facility.record(SimEvent::ScaleReleased { worker: worker_id });
        facility.scale().release();
        debug!(worker_id, "scale released");
    } else {
        thread::sleep(duration);
    }
}
