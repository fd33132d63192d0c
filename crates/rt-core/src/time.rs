//! Scheduler time model.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick moves every
//! active train by exactly one block; the wall-clock spacing between ticks
//! is only relevant to the periodic driver and lives in [`SchedulerConfig`].

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of scheduler steps executed since start-up.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Runtime configuration of the movement scheduler.
///
/// Typically loaded from a JSON file by the application crate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Wall-clock milliseconds between two ticks of the periodic driver.
    pub tick_interval_ms: u64,
}

impl SchedulerConfig {
    /// Default tick period: one block every two seconds.
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2_000;

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS }
    }
}
