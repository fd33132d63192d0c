//! A single station and its membership operations.
//!
//! Membership is held as two ordered `Vec<TrainId>` sets.  Station sizes are
//! small (single-digit capacity in practice), so linear scans beat hashing
//! and keep display order stable.

use rt_core::{GeoPoint, StationId, TrainId};

/// Outcome of [`Station::admit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The train is now in `in_station`.
    Admitted,
    /// The station was full; the train is queued in `assigned`.
    Overflow,
}

impl Admission {
    #[inline]
    pub fn is_admitted(self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// A capacity-bounded stopping location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id:       StationId,
    pub name:     String,
    pub pos:      GeoPoint,
    /// Maximum size of `in_station`.
    pub capacity: usize,
    /// Trains physically present.  Never longer than `capacity`.
    in_station: Vec<TrainId>,
    /// Overflow / holding pool.  Unbounded.
    assigned: Vec<TrainId>,
}

impl Station {
    /// An empty station.
    pub fn new(id: StationId, name: impl Into<String>, pos: GeoPoint, capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            capacity,
            in_station: Vec::new(),
            assigned: Vec::new(),
        }
    }

    /// Rebuild membership loaded from a store.
    ///
    /// `in_station` entries go through [`admit`](Self::admit), so a stored
    /// list longer than `capacity` spills into `assigned` rather than
    /// breaking the capacity bound.
    pub fn with_members(mut self, in_station: &[TrainId], assigned: &[TrainId]) -> Self {
        for &train in in_station {
            self.admit(train);
        }
        for &train in assigned {
            self.assign(train);
        }
        self
    }

    /// Re-run [`with_members`](Self::with_members) over the current sets.
    ///
    /// Used on stations that were deserialized rather than built, which may
    /// list more trains in `in_station` than `capacity` allows, or a train
    /// in both sets.
    pub fn normalized(mut self) -> Self {
        let in_station = std::mem::take(&mut self.in_station);
        let assigned = std::mem::take(&mut self.assigned);
        self.with_members(&in_station, &assigned)
    }

    #[inline]
    pub fn in_station(&self) -> &[TrainId] {
        &self.in_station
    }

    #[inline]
    pub fn assigned(&self) -> &[TrainId] {
        &self.assigned
    }

    /// `true` if another train fits in `in_station`.
    #[inline]
    pub fn has_room(&self) -> bool {
        self.in_station.len() < self.capacity
    }

    /// `true` if `train` is in either set.
    pub fn holds(&self, train: TrainId) -> bool {
        self.in_station.contains(&train) || self.assigned.contains(&train)
    }

    /// Admit `train` if there is room, otherwise queue it in `assigned`.
    ///
    /// A train already in `in_station` stays there and counts as admitted.
    /// On admission the train is also removed from `assigned`, so the two
    /// sets are disjoint once this returns.
    pub fn admit(&mut self, train: TrainId) -> Admission {
        if self.in_station.contains(&train) {
            self.assigned.retain(|&t| t != train);
            return Admission::Admitted;
        }
        if self.has_room() {
            self.in_station.push(train);
            self.assigned.retain(|&t| t != train);
            Admission::Admitted
        } else {
            if !self.assigned.contains(&train) {
                self.assigned.push(train);
            }
            Admission::Overflow
        }
    }

    /// Put `train` in the holding pool without trying `in_station`.
    ///
    /// No-op if the train is already held in either set.
    pub fn assign(&mut self, train: TrainId) {
        if !self.holds(train) {
            self.assigned.push(train);
        }
    }

    /// Move `train` out of `in_station` back into `assigned`.
    ///
    /// Returns `false` if the train was not in `in_station`.
    pub fn release(&mut self, train: TrainId) -> bool {
        let before = self.in_station.len();
        self.in_station.retain(|&t| t != train);
        if self.in_station.len() == before {
            return false;
        }
        if !self.assigned.contains(&train) {
            self.assigned.push(train);
        }
        true
    }

    /// Remove `train` from both sets.  Returns `true` if anything changed.
    pub fn withdraw(&mut self, train: TrainId) -> bool {
        let before = self.in_station.len() + self.assigned.len();
        self.in_station.retain(|&t| t != train);
        self.assigned.retain(|&t| t != train);
        self.in_station.len() + self.assigned.len() != before
    }
}
