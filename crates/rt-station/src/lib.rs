//! `rt-station` — stations and their two train-membership sets.
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`station`]  | `Station`, `Admission`                              |
//! | [`registry`] | `StationRegistry`                                   |
//! | [`describe`] | `describe_station` summary                          |
//! | [`error`]    | `StationError`, `StationResult<T>`                  |
//!
//! # Admission control
//!
//! A station never holds more than `capacity` trains in its `in_station`
//! set.  A train arriving at a full station is queued in the unbounded
//! `assigned` pool instead of being rejected; see [`Station::admit`].

pub mod describe;
pub mod error;
pub mod registry;
pub mod station;


pub use describe::describe_station;
pub use error::{StationError, StationResult};
pub use registry::StationRegistry;
pub use station::{Admission, Station};
