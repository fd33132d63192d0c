//! The persistence port and an in-memory implementation.

use std::collections::{BTreeMap, BTreeSet};

use rt_core::{BlockId, StationId, TrainId};
use rt_route::Route;
use rt_station::Station;
use rt_track::{Block, Point};

use crate::{StoreError, StoreResult, Train};

/// The store of record for the track, stations, routes and trains.
///
/// Loads happen once at start-up.  The scheduler calls the `persist_*`
/// methods synchronously, before applying the same change in memory.
pub trait Persistence {
    fn load_points(&self) -> StoreResult<Vec<Point>>;
    fn load_blocks(&self) -> StoreResult<Vec<Block>>;
    fn load_stations(&self) -> StoreResult<Vec<Station>>;
    fn load_routes(&self) -> StoreResult<Vec<Route>>;
    fn load_trains(&self) -> StoreResult<Vec<Train>>;

    fn persist_block(&mut self, block: &Block) -> StoreResult<()>;
    fn persist_station(&mut self, station: &Station) -> StoreResult<()>;
    fn persist_train(&mut self, train: &Train) -> StoreResult<()>;
}

/// A [`Persistence`] provider backed by plain maps.
///
/// Writes can be made to fail per entity with the `fail_*` methods, which
/// is how the tests exercise persistence-failure handling.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    points:   Vec<Point>,
    blocks:   BTreeMap<BlockId, Block>,
    stations: BTreeMap<StationId, Station>,
    routes:   Vec<Route>,
    trains:   BTreeMap<TrainId, Train>,

    failing_blocks:   BTreeSet<BlockId>,
    failing_stations: BTreeSet<StationId>,
    failing_trains:   BTreeSet<TrainId>,
    writes:           usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks.extend(blocks.into_iter().map(|b| (b.id, b)));
        self
    }

    pub fn with_stations(mut self, stations: impl IntoIterator<Item = Station>) -> Self {
        self.stations.extend(stations.into_iter().map(|s| (s.id, s)));
        self
    }

    pub fn with_routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    pub fn with_trains(mut self, trains: impl IntoIterator<Item = Train>) -> Self {
        self.trains.extend(trains.into_iter().map(|t| (t.id, t)));
        self
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(&id)
    }

    /// Number of successful `persist_*` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    // ── Failure injection ─────────────────────────────────────────────────

    pub fn fail_block(&mut self, id: BlockId) {
        self.failing_blocks.insert(id);
    }

    pub fn fail_station(&mut self, id: StationId) {
        self.failing_stations.insert(id);
    }

    pub fn fail_train(&mut self, id: TrainId) {
        self.failing_trains.insert(id);
    }

    /// Make every write succeed again.
    pub fn heal(&mut self) {
        self.failing_blocks.clear();
        self.failing_stations.clear();
        self.failing_trains.clear();
    }
}

fn injected(entity: impl std::fmt::Display) -> StoreError {
    StoreError::Rejected { entity: entity.to_string(), reason: "injected failure".into() }
}

impl Persistence for MemoryStore {
    fn load_points(&self) -> StoreResult<Vec<Point>> {
        Ok(self.points.clone())
    }

    fn load_blocks(&self) -> StoreResult<Vec<Block>> {
        Ok(self.blocks.values().cloned().collect())
    }

    fn load_stations(&self) -> StoreResult<Vec<Station>> {
        Ok(self.stations.values().cloned().collect())
    }

    fn load_routes(&self) -> StoreResult<Vec<Route>> {
        Ok(self.routes.clone())
    }

    fn load_trains(&self) -> StoreResult<Vec<Train>> {
        Ok(self.trains.values().cloned().collect())
    }

    fn persist_block(&mut self, block: &Block) -> StoreResult<()> {
        if self.failing_blocks.contains(&block.id) {
            return Err(injected(block.id));
        }
        self.blocks.insert(block.id, block.clone());
        self.writes += 1;
        Ok(())
    }

    fn persist_station(&mut self, station: &Station) -> StoreResult<()> {
        if self.failing_stations.contains(&station.id) {
            return Err(injected(station.id));
        }
        self.stations.insert(station.id, station.clone());
        self.writes += 1;
        Ok(())
    }

    fn persist_train(&mut self, train: &Train) -> StoreResult<()> {
        if self.failing_trains.contains(&train.id) {
            return Err(injected(train.id));
        }
        self.trains.insert(train.id, train.clone());
        self.writes += 1;
        Ok(())
    }
}
