//! Error types for simulation runs.
//!
//! Every variant here is fatal: each one signals a broken invariant or a
//! failed resource acquisition at startup, never a transient condition, so
//! nothing is retried. The blocking primitives themselves (`parking_lot`
//! mutexes and condvars) cannot fail to initialize or to wait, so the only
//! failures that can actually occur are spawn errors, protocol violations,
//! and actor panics observed at join time.

use thiserror::Error;

/// Errors produced by a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration validation failed before any actor was spawned.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An actor thread could not be created.
    #[error("failed to spawn {actor}")]
    Spawn {
        /// Name of the actor thread that failed to spawn.
        actor: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// Dequeue was attempted on an empty queue.
    ///
    /// The protocol guarantees one enqueued, not-yet-dequeued record per
    /// consumed ready signal, so this can only mean the signal accounting
    /// is broken.
    #[error("dequeue from empty queue: ready-signal accounting is broken")]
    QueueInvariant,
    /// An actor thread panicked before reaching its terminal state.
    #[error("{actor} panicked")]
    ActorPanic {
        /// Name of the actor that panicked.
        actor: String,
    },
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
