//! Fluent construction of a simulation run.

use crate::config::{ServiceDurations, SimConfig};
use crate::core::error::SimError;
use crate::core::events::EventSink;
use crate::core::sim::Simulation;
use crate::core::task::{RandomTaskSource, TaskSource};

/// Builder collecting configuration, task source, and event sink for one
/// simulation run.
///
/// Defaults to [`SimConfig::default`] and a randomly seeded task source.
///
/// # Examples
///
/// ```
/// use facility_sim::builders::SimulationBuilder;
///
/// let served = SimulationBuilder::new()
///     .with_customer_count(4)
///     .with_worker_count(2)
///     .with_capacity(2)
///     .with_durations(facility_sim::config::ServiceDurations {
///         buy_stamps_ms: 1,
///         mail_letter_ms: 1,
///         mail_package_ms: 1,
///     })
///     .start()
///     .unwrap()
///     .await_completion()
///     .unwrap();
/// assert_eq!(served, 4);
/// ```
pub struct SimulationBuilder {
    config: SimConfig,
    source: Box<dyn TaskSource>,
    events: Option<Box<dyn EventSink>>,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Start from the default configuration and a random task source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            source: Box::new(RandomTaskSource::new()),
            events: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of customers.
    #[must_use]
    pub fn with_customer_count(mut self, count: usize) -> Self {
        self.config.customer_count = count;
        self
    }

    /// Set the worker pool size.
    #[must_use]
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.config.worker_count = count;
        self
    }

    /// Set the admission limit.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the per-kind service durations.
    #[must_use]
    pub fn with_durations(mut self, durations: ServiceDurations) -> Self {
        self.config.durations = durations;
        self
    }

    /// Replace the task-kind source.
    #[must_use]
    pub fn with_task_source(mut self, source: impl TaskSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Some(Box::new(sink));
        self
    }

    /// Validate and start the run.
    ///
    /// # Errors
    ///
    /// See [`Simulation::start`].
    pub fn start(self) -> Result<Simulation, SimError> {
        let Self {
            config,
            mut source,
            events,
        } = self;
        Simulation::start(&config, source.as_mut(), events)
    }
}
