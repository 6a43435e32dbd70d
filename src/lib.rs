//! # Facility Sim
//!
//! A capacity-bounded service facility simulation built on counting-semaphore
//! primitives.
//!
//! A population of customer threads each request one of three services from a
//! small pool of worker threads, under a hard limit on how many customers may
//! occupy the facility at once and a separate hard limit on concurrent use of
//! one shared piece of equipment (the scale). The interesting part is the
//! synchronization protocol, built entirely from one counting [`Semaphore`]
//! primitive:
//!
//! - **Capacity gate**: a semaphore initialized to the admission limit bounds
//!   concurrent occupancy.
//! - **Ready signal**: a semaphore initialized to zero; every enqueue releases
//!   it once, and every worker wake consumes exactly one release.
//! - **Scale resource**: a semaphore initialized to one serializes equipment
//!   use across workers.
//! - **Completion signal**: a per-customer one-shot semaphore released by
//!   exactly one worker.
//! - **Shutdown broadcast**: termination is decentralized — the worker that
//!   completes the last service releases the ready signal once per idle
//!   sibling instead of relying on a supervisor.
//!
//! No thread ever polls; every wait blocks on a semaphore.
//!
//! ## Example
//!
//! ```
//! use facility_sim::config::{ServiceDurations, SimConfig};
//! use facility_sim::core::{CycleTaskSource, Simulation};
//!
//! let config = SimConfig {
//!     customer_count: 8,
//!     worker_count: 2,
//!     capacity: 4,
//!     durations: ServiceDurations {
//!         buy_stamps_ms: 1,
//!         mail_letter_ms: 1,
//!         mail_package_ms: 1,
//!     },
//! };
//!
//! let mut source = CycleTaskSource::new();
//! let sim = Simulation::start(&config, &mut source, None).unwrap();
//! let served = sim.await_completion().unwrap();
//! assert_eq!(served, 8);
//! ```
//!
//! For full scenarios, see `tests/simulation_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core protocol: shared state, queue, actors, orchestration.
pub mod core;
/// Configuration models for simulation runs.
pub mod config;
/// Builders to assemble a simulation from configuration.
pub mod builders;
/// Counting semaphore primitive.
pub mod semaphore;
/// Shared utilities.
pub mod util;

pub use semaphore::Semaphore;
