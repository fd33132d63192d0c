//! `rt-sim` — bootstrap and real-time ticking for the movement scheduler.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`builder`]    | `SimBuilder` — loads everything from a `Persistence` store |
//! | [`driver`]     | `IntervalDriver` — the periodic `TickDriver`              |
//! | [`simulation`] | `Simulation` — shared scheduler plus tick worker thread   |
//! | [`observer`]   | `LogObserver` — per-tick summaries through `log`          |
//! | [`error`]      | `SimError`, `SimResult`                                   |
//!
//! # Threading
//!
//! ```text
//!   caller threads ──┐
//!                    ├── Mutex<MovementScheduler> ── one writer at a time
//!   tick worker ─────┘
//!        every tick_interval: if the driver flag is set, lock and step()
//! ```
//!
//! The scheduler turns the driver flag on when a train starts and off when
//! the last train arrives.  The worker only reads the flag, so `stop()`
//! never waits for a step in progress.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rt_core::SchedulerConfig;
//! use rt_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(store).spawn(&SchedulerConfig::default())?;
//! sim.start_all_with_routes();
//! // ... later
//! sim.shutdown();
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod observer;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use driver::IntervalDriver;
pub use error::{SimError, SimResult};
pub use observer::LogObserver;
pub use simulation::Simulation;
