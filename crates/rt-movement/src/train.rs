//! Trains as seen by the scheduler.

use std::collections::BTreeMap;

use rt_core::{GeoPoint, RouteId, TrainId};

use crate::{MovementError, MovementResult};

/// The scheduler-owned fields of a train.
///
/// Composition, capacity and ticketing belong to other services; the
/// scheduler only reads and writes position and route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Train {
    pub id:    TrainId,
    /// Mirrors the block or station the train is on.
    pub pos:   GeoPoint,
    /// The route the train will take next (or is taking).
    pub route: Option<RouteId>,
}

impl Train {
    pub fn new(id: TrainId) -> Self {
        Self { id, pos: GeoPoint::default(), route: None }
    }

    pub fn with_route(mut self, route: RouteId) -> Self {
        self.route = Some(route);
        self
    }
}

/// Every train known to the scheduler, in ascending id order.
#[derive(Debug, Default)]
pub struct TrainRoster {
    trains: BTreeMap<TrainId, Train>,
}

impl TrainRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trains(trains: impl IntoIterator<Item = Train>) -> Self {
        Self { trains: trains.into_iter().map(|t| (t.id, t)).collect() }
    }

    /// Add or overwrite a train, returning the previous value.
    pub fn insert(&mut self, train: Train) -> Option<Train> {
        self.trains.insert(train.id, train)
    }

    pub fn get(&self, id: TrainId) -> MovementResult<&Train> {
        self.trains.get(&id).ok_or(MovementError::UnknownTrain(id))
    }

    pub fn contains(&self, id: TrainId) -> bool {
        self.trains.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = TrainId> + '_ {
        self.trains.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}
