//! Strongly typed identifier wrappers.
//!
//! Ids come from the store of record, so they are sparse and carry no
//! positional meaning.  All of them are `Copy + Ord + Hash` and are used as
//! map keys throughout the workspace; entities refer to each other by id,
//! never by reference.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> Self {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// A node of the track graph.
    pub struct PointId(u32);
}

typed_id! {
    /// A track segment between one or two points.
    pub struct BlockId(u32);
}

typed_id! {
    /// A capacity-bounded stopping location.
    pub struct StationId(u32);
}

typed_id! {
    /// A predefined route in the catalog.
    pub struct RouteId(u32);
}

typed_id! {
    /// A train known to the scheduler.
    pub struct TrainId(u32);
}
