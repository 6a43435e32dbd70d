//! Configuration models for simulation runs.

pub mod sim;

pub use sim::{ServiceDurations, SimConfig};
