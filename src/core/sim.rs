//! Simulation orchestration: spawn every actor, then wait for all of them.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::core::customer::{self, Customer};
use crate::core::error::SimError;
use crate::core::events::EventSink;
use crate::core::facility::Facility;
use crate::core::task::TaskSource;
use crate::core::worker;

/// A running simulation.
///
/// Created by [`Simulation::start`], which spawns one thread per worker and
/// one per customer; consumed by [`Simulation::await_completion`], which
/// blocks until every actor reaches its terminal state.
pub struct Simulation {
    facility: Arc<Facility>,
    customers: Vec<JoinHandle<()>>,
    workers: Vec<JoinHandle<Result<(), SimError>>>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("customers", &self.customers.len())
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Validate the configuration, build the shared facility, and spawn all
    /// actors: the worker pool first, then the customer population. Task
    /// kinds are drawn from `source` on the calling thread, one per
    /// customer, before that customer is spawned.
    ///
    /// With zero customers no enqueue will ever release the ready signal,
    /// so `start` wakes each worker once directly; every worker then
    /// observes the already-terminal counter and exits.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidConfig`] if the configuration is rejected.
    /// - [`SimError::Spawn`] if an actor thread cannot be created. This is
    ///   fatal; already-spawned actors are abandoned (best effort only, per
    ///   the no-recovery policy).
    pub fn start<S>(
        config: &SimConfig,
        source: &mut S,
        events: Option<Box<dyn EventSink>>,
    ) -> Result<Self, SimError>
    where
        S: TaskSource + ?Sized,
    {
        config.validate().map_err(SimError::InvalidConfig)?;

        let facility = Arc::new(Facility::new(config, events));

        let mut workers = Vec::with_capacity(config.worker_count);
        for worker_id in 0..config.worker_count {
            let facility = Arc::clone(&facility);
            let handle = thread::Builder::new()
                .name(format!("facility-worker-{worker_id}"))
                .spawn(move || worker::run(&facility, worker_id))
                .map_err(|source| {
                    warn!(worker_id, "worker thread could not be spawned");
                    SimError::Spawn {
                        actor: format!("worker {worker_id}"),
                        source,
                    }
                })?;
            workers.push(handle);
        }

        let mut customers = Vec::with_capacity(config.customer_count);
        for id in 0..config.customer_count {
            let id = id as u64;
            let record = Customer::new(id, source.next_task(id));
            let facility = Arc::clone(&facility);
            let handle = thread::Builder::new()
                .name(format!("customer-{id}"))
                .spawn(move || customer::run(&facility, record))
                .map_err(|source| {
                    warn!(customer_id = id, "customer thread could not be spawned");
                    SimError::Spawn {
                        actor: format!("customer {id}"),
                        source,
                    }
                })?;
            customers.push(handle);
        }

        if config.customer_count == 0 {
            // Immediate-shutdown path: one wake per worker, no queue item.
            for _ in 0..config.worker_count {
                facility.ready().release();
            }
        }

        info!(
            customer_count = config.customer_count,
            worker_count = config.worker_count,
            capacity = config.capacity,
            "simulation started"
        );

        Ok(Self {
            facility,
            customers,
            workers,
        })
    }

    /// Block until every customer and every worker has exited, then return
    /// the number of services rendered (equal to the customer count on any
    /// clean run).
    ///
    /// Customers are joined first, then workers, mirroring the order in
    /// which the actors naturally finish.
    ///
    /// # Errors
    ///
    /// The first fatal error observed: a worker's
    /// [`SimError::QueueInvariant`], or [`SimError::ActorPanic`] for any
    /// actor that panicked instead of reaching its terminal state.
    pub fn await_completion(self) -> Result<usize, SimError> {
        let Self {
            facility,
            customers,
            workers,
        } = self;

        let mut first_error: Option<SimError> = None;

        for (id, handle) in customers.into_iter().enumerate() {
            if handle.join().is_err() {
                warn!(customer_id = id, "customer panicked");
                first_error.get_or_insert(SimError::ActorPanic {
                    actor: format!("customer {id}"),
                });
            }
        }

        for (id, handle) in workers.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_error.get_or_insert(err);
                }
                Err(_) => {
                    warn!(worker_id = id, "worker panicked");
                    first_error.get_or_insert(SimError::ActorPanic {
                        actor: format!("worker {id}"),
                    });
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        let served = facility.served();
        let (enqueued, dequeued) = facility.queue_totals();
        debug!(enqueued, dequeued, "queue accounting at completion");
        info!(served, "simulation complete");
        Ok(served)
    }
}
