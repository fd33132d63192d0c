//! `rt-movement` — the train movement scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`train`]     | `Train`, `TrainRoster`                                     |
//! | [`state`]     | `MovementState` — per-train route progress                 |
//! | [`scheduler`] | `MovementScheduler<P, D>`, `StepReport`                    |
//! | [`driver`]    | `TickDriver` port, `ManualDriver`                          |
//! | [`store`]     | `Persistence` port, `MemoryStore`                          |
//! | [`observer`]  | `MovementObserver` port, `NoopObserver`                    |
//! | [`error`]     | `MovementError`, `StoreError`, result aliases              |
//!
//! # Movement model (one block per tick)
//!
//! 1. `start_movement` withdraws the train from every station, puts it on
//!    the first block of its route and starts the tick driver if needed.
//! 2. Each `step` moves every active train one block forward.  A train
//!    whose next block is held by another train waits where it is.
//! 3. Past the last block the train is admitted to the end station (or
//!    queued there when full), handed the first unclaimed route leaving
//!    that station, and becomes idle.  It does not start again until
//!    `start_all_with_routes` is called.
//! 4. When no train is active the driver is stopped.
//!
//! Every mutation is persisted through the [`Persistence`] port before it
//! is applied in memory.  A failed persist leaves the train exactly where
//! it was; in `step` it is simply retried on the next tick.

pub mod driver;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod train;

mod commit;


pub use driver::{ManualDriver, TickDriver};
pub use error::{MovementError, MovementResult, StoreError, StoreResult};
pub use observer::{MovementObserver, NoopObserver};
pub use scheduler::{MovementScheduler, StepReport};
pub use state::MovementState;
pub use store::{MemoryStore, Persistence};
pub use train::{Train, TrainRoster};
