//! A predefined route between two stations.

use rt_core::{BlockId, RouteId, StationId};

/// Suffix appended to the name of a generated reverse route.
pub const REVERSE_SUFFIX: &str = " (Reverse)";

/// An ordered block sequence from `start` to `end`.
///
/// Either endpoint may be missing when the store of record has lost the
/// station; the scheduler then skips admission and re-routing on arrival.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id:        RouteId,
    pub name:      String,
    pub start:     Option<StationId>,
    pub end:       Option<StationId>,
    pub block_ids: Vec<BlockId>,
}

impl Route {
    /// The route travelled the other way: blocks reversed, endpoints
    /// swapped, name suffixed with `" (Reverse)"`.
    pub fn reversed(&self, id: RouteId) -> Route {
        Route {
            id,
            name:      format!("{}{REVERSE_SUFFIX}", self.name),
            start:     self.end,
            end:       self.start,
            block_ids: self.block_ids.iter().rev().copied().collect(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.block_ids.is_empty()
    }
}
