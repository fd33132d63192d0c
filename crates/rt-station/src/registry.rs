//! The `StationRegistry` — every station, keyed by id.

use std::collections::BTreeMap;

use rt_core::{StationId, TrainId};

use crate::{Admission, Station, StationError, StationResult};

/// All stations known to the system.
///
/// Iteration is in ascending `StationId` order, which makes
/// [`station_of`](Self::station_of) deterministic when (incorrectly) more
/// than one station lists the same train.
#[derive(Debug, Default)]
pub struct StationRegistry {
    stations: BTreeMap<StationId, Station>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from loaded stations.
    ///
    /// Each station is [normalized](Station::normalized), so an overfull
    /// `in_station` list spills into `assigned`.
    ///
    /// # Errors
    ///
    /// [`StationError::Duplicate`] if two stations share an id.
    pub fn from_stations(stations: impl IntoIterator<Item = Station>) -> StationResult<Self> {
        let mut registry = Self::new();
        for station in stations {
            registry.insert(station.normalized())?;
        }
        Ok(registry)
    }

    /// Add a new station.
    pub fn insert(&mut self, station: Station) -> StationResult<()> {
        if self.stations.contains_key(&station.id) {
            return Err(StationError::Duplicate(station.id));
        }
        self.stations.insert(station.id, station);
        Ok(())
    }

    /// Overwrite an existing station with an updated copy.
    pub fn replace(&mut self, station: Station) -> StationResult<Station> {
        match self.stations.get_mut(&station.id) {
            Some(slot) => Ok(std::mem::replace(slot, station)),
            None => Err(StationError::NotFound(station.id)),
        }
    }

    pub fn get(&self, id: StationId) -> StationResult<&Station> {
        self.stations.get(&id).ok_or(StationError::NotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Admit `train` to `station` (see [`Station::admit`]).
    pub fn admit(&mut self, station: StationId, train: TrainId) -> StationResult<Admission> {
        let entry = self.stations.get_mut(&station).ok_or(StationError::NotFound(station))?;
        Ok(entry.admit(train))
    }

    /// Queue `train` in `station`'s holding pool.
    pub fn assign(&mut self, station: StationId, train: TrainId) -> StationResult<()> {
        let entry = self.stations.get_mut(&station).ok_or(StationError::NotFound(station))?;
        entry.assign(train);
        Ok(())
    }

    /// Move `train` from `station`'s `in_station` set back to `assigned`.
    pub fn release(&mut self, station: StationId, train: TrainId) -> StationResult<bool> {
        let entry = self.stations.get_mut(&station).ok_or(StationError::NotFound(station))?;
        Ok(entry.release(train))
    }

    /// Copies of every station that holds `train`, with the train removed.
    ///
    /// Nothing in the registry changes.  Callers that need to persist the
    /// change before applying it use this, then [`replace`](Self::replace).
    pub fn without_train(&self, train: TrainId) -> Vec<Station> {
        self.stations
            .values()
            .filter(|s| s.holds(train))
            .map(|s| {
                let mut copy = s.clone();
                copy.withdraw(train);
                copy
            })
            .collect()
    }

    /// Remove `train` from every station's sets.
    ///
    /// Returns the ids of the stations that changed.
    pub fn withdraw_from_all(&mut self, train: TrainId) -> Vec<StationId> {
        self.stations
            .values_mut()
            .filter_map(|s| s.withdraw(train).then_some(s.id))
            .collect()
    }

    /// The first station (ascending id) holding `train` in either set.
    pub fn station_of(&self, train: TrainId) -> Option<&Station> {
        self.stations.values().find(|s| s.holds(train))
    }

    /// Trains in `station`'s holding pool.
    pub fn trains_at_station(&self, station: StationId) -> StationResult<&[TrainId]> {
        self.get(station).map(Station::assigned)
    }

    /// Trains physically present at `station`.
    pub fn trains_in_station(&self, station: StationId) -> StationResult<&[TrainId]> {
        self.get(station).map(Station::in_station)
    }
}
