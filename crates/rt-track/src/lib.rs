//! `rt-track` — the track graph store.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`graph`]    | `Point`, `Block`, `TrackGraph`, `TrackGraphBuilder`       |
//! | [`describe`] | `describe_point` connectivity summary                     |
//! | [`error`]    | `TrackError`, `TrackResult<T>`                            |
//!
//! # Occupancy
//!
//! Each block carries at most one occupant.  [`TrackGraph::set_occupant`]
//! writes through immediately, so a later read in the same tick always sees
//! the change.  The graph does not itself forbid a train from being recorded
//! on two blocks; keeping that invariant is the movement scheduler's job.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod describe;
pub mod error;
pub mod graph;

#[cfg(test)]
mod tests;

pub use describe::describe_point;
pub use error::{TrackError, TrackResult};
pub use graph::{Block, Point, TrackGraph, TrackGraphBuilder};
