//! Task kinds and the pluggable source that assigns them.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// The service a customer requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Buy stamps. Shortest service, no shared equipment.
    BuyStamps,
    /// Mail a letter. Longer than buying stamps, no shared equipment.
    MailLetter,
    /// Mail a package. Longest service; requires exclusive use of the scale.
    MailPackage,
}

impl TaskKind {
    /// All kinds, in dispatch order.
    pub const ALL: [Self; 3] = [Self::BuyStamps, Self::MailLetter, Self::MailPackage];

    /// Whether this task needs the shared scale.
    #[must_use]
    pub const fn needs_scale(self) -> bool {
        matches!(self, Self::MailPackage)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuyStamps => write!(f, "buy stamps"),
            Self::MailLetter => write!(f, "mail a letter"),
            Self::MailPackage => write!(f, "mail a package"),
        }
    }
}

/// Assigns a task kind to each customer.
///
/// The assignment policy is an external collaborator of the protocol; the
/// core only consumes it, once per customer, before the customer thread is
/// spawned.
pub trait TaskSource {
    /// Produce the task for the given customer.
    fn next_task(&mut self, customer_id: u64) -> TaskKind;
}

/// Uniformly random task assignment.
pub struct RandomTaskSource {
    rng: StdRng,
}

impl RandomTaskSource {
    /// Create a source seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a source with a fixed seed for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTaskSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSource for RandomTaskSource {
    fn next_task(&mut self, _customer_id: u64) -> TaskKind {
        TaskKind::ALL[self.rng.random_range(0..TaskKind::ALL.len())]
    }
}

/// Deterministic round-robin assignment, cycling through all kinds.
///
/// Mostly useful in tests where a known task mix matters.
#[derive(Debug, Default)]
pub struct CycleTaskSource {
    next: usize,
}

impl CycleTaskSource {
    /// Create a source starting at [`TaskKind::BuyStamps`].
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }
}

impl TaskSource for CycleTaskSource {
    fn next_task(&mut self, _customer_id: u64) -> TaskKind {
        let kind = TaskKind::ALL[self.next % TaskKind::ALL.len()];
        self.next += 1;
        kind
    }
}

/// Assigns the same kind to every customer.
#[derive(Debug, Clone, Copy)]
pub struct FixedTaskSource(
    /// The kind every customer receives.
    pub TaskKind,
);

impl TaskSource for FixedTaskSource {
    fn next_task(&mut self, _customer_id: u64) -> TaskKind {
        self.0
    }
}
