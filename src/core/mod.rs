//! Core protocol: shared state, queue, actors, and orchestration.

pub mod customer;
pub mod error;
pub mod events;
pub mod queue;
pub mod sim;
pub mod task;

mod facility;
mod worker;

pub use customer::Customer;
pub use error::{AppResult, SimError};
pub use events::{EventSink, InMemoryEventSink, SimEvent};
pub use queue::CustomerQueue;
pub use sim::Simulation;
pub use task::{CycleTaskSource, FixedTaskSource, RandomTaskSource, TaskKind, TaskSource};
