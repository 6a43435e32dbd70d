//! FIFO queue of customers waiting to be served.

use std::collections::VecDeque;

use crate::core::customer::Customer;
use crate::core::error::SimError;

/// Ordered sequence of pending customers.
///
/// Insertion order is service order. The queue owns its records outright: a
/// customer is moved in on enqueue and moved out to exactly one worker on
/// dequeue, so no links are ever shared across threads.
///
/// The queue itself carries no lock; every mutation must happen while
/// holding the facility's queue mutex. It also tracks monotonic
/// enqueue/dequeue counters, assigned inside that critical section, which
/// give observers a race-free view of FIFO order.
#[derive(Debug, Default)]
pub struct CustomerQueue {
    items: VecDeque<Customer>,
    enqueued: u64,
    dequeued: u64,
}

impl CustomerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the queue holds no customers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of customers currently waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Append a customer at the tail. O(1).
    ///
    /// Returns the enqueue sequence number (0-based, monotonic).
    pub fn enqueue(&mut self, customer: Customer) -> u64 {
        let seq = self.enqueued;
        self.enqueued += 1;
        self.items.push_back(customer);
        seq
    }

    /// Remove and return the head customer. O(1).
    ///
    /// Must only be called when the queue is known non-empty by protocol:
    /// every consumed ready signal corresponds to exactly one enqueued,
    /// not-yet-dequeued record. An empty dequeue is therefore a fatal
    /// protocol violation, not a normal error path.
    ///
    /// Returns the customer together with the dequeue sequence number.
    ///
    /// # Errors
    ///
    /// [`SimError::QueueInvariant`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<(Customer, u64), SimError> {
        let customer = self.items.pop_front().ok_or(SimError::QueueInvariant)?;
        let seq = self.dequeued;
        self.dequeued += 1;
        Ok((customer, seq))
    }

    /// Total enqueue operations completed so far.
    #[must_use]
    pub const fn total_enqueued(&self) -> u64 {
        self.enqueued
    }

    /// Total dequeue operations completed so far.
    #[must_use]
    pub const fn total_dequeued(&self) -> u64 {
        self.dequeued
    }
}
