//! Builders to assemble simulation runs from configuration.

pub mod sim_builder;

pub use sim_builder::SimulationBuilder;
