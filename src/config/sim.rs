//! Simulation configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::task::TaskKind;

/// Fixed service durations, one per task kind, in milliseconds.
///
/// The defaults are the classic parameters: one second to buy stamps, one
/// and a half to mail a letter, two to mail a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDurations {
    /// Time to buy stamps.
    pub buy_stamps_ms: u64,
    /// Time to mail a letter.
    pub mail_letter_ms: u64,
    /// Time to mail a package (spent holding the scale).
    pub mail_package_ms: u64,
}

impl Default for ServiceDurations {
    fn default() -> Self {
        Self {
            buy_stamps_ms: 1000,
            mail_letter_ms: 1500,
            mail_package_ms: 2000,
        }
    }
}

impl ServiceDurations {
    /// Duration of one service of the given kind.
    #[must_use]
    pub const fn for_task(&self, task: TaskKind) -> Duration {
        let ms = match task {
            TaskKind::BuyStamps => self.buy_stamps_ms,
            TaskKind::MailLetter => self.mail_letter_ms,
            TaskKind::MailPackage => self.mail_package_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of customer actors to spawn.
    pub customer_count: usize,
    /// Size of the worker pool.
    pub worker_count: usize,
    /// Maximum customers inside the facility at once.
    pub capacity: usize,
    /// Per-kind service durations.
    pub durations: ServiceDurations,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            customer_count: 50,
            worker_count: 3,
            capacity: 10,
            durations: ServiceDurations::default(),
        }
    }
}

impl SimConfig {
    /// Validate the configuration.
    ///
    /// Shapes that would deadlock are rejected up front: customers with no
    /// worker to serve them, or customers with no admission slot to enter
    /// through. Zero customers is a valid run (it completes immediately),
    /// with or without workers.
    ///
    /// # Errors
    ///
    /// A human-readable description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.customer_count > 0 && self.worker_count == 0 {
            return Err("worker_count must be greater than 0 when customers exist".into());
        }
        if self.customer_count > 0 && self.capacity == 0 {
            return Err("capacity must be greater than 0 when customers exist".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// A parse error or the first validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
