//! `rt-core` — foundational types for the `railsim` workspace.
//!
//! Every other `rt-*` crate depends on this one.  It has no `rt-*`
//! dependencies and no mandatory external ones (`serde` is optional).
//!
//! # What lives here
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`ids`]    | `PointId`, `BlockId`, `StationId`, `RouteId`, `TrainId`     |
//! | [`geo`]    | `GeoPoint`                                                  |
//! | [`time`]   | `Tick`, `SchedulerConfig`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{BlockId, PointId, RouteId, StationId, TrainId};
pub use time::{SchedulerConfig, Tick};
