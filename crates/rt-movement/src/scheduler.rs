//! The `MovementScheduler` and its tick step.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use rt_core::{BlockId, GeoPoint, RouteId, StationId, Tick, TrainId};
use rt_route::{Route, RouteCatalog};
use rt_station::{Admission, StationRegistry};
use rt_track::TrackGraph;

use crate::commit::Change;
use crate::{
    MovementError, MovementObserver, MovementResult, MovementState, NoopObserver, Persistence,
    TickDriver, TrainRoster,
};

// ── StepReport ────────────────────────────────────────────────────────────────

/// What happened to each active train during one [`MovementScheduler::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The tick this step produced.
    pub tick: Tick,
    /// Trains that moved onto their next block, in ascending id order.
    pub advanced: Vec<TrainId>,
    /// Trains that stayed put because their next block was occupied.
    pub held: Vec<TrainId>,
    /// Trains that completed their route this step.
    pub arrived: Vec<TrainId>,
    /// Trains whose update failed; they are retried next step.
    pub failed: Vec<TrainId>,
}

/// Outcome of advancing a single train.
enum Progress {
    Advanced,
    Held,
    Arrived,
}

// ── MovementScheduler ─────────────────────────────────────────────────────────

/// Owns the track, stations, routes, trains and every active movement.
///
/// All mutators take `&mut self`: whoever owns the scheduler (a test, or
/// `rt-sim`'s mutex) is the single writer.  `step` processes every active
/// train before returning, and an error on one train never stops the
/// others.
///
/// # Type parameters
///
/// - `P: Persistence` — the store of record every change is written to.
/// - `D: TickDriver` — the periodic trigger started and stopped as trains
///   become active and idle.
pub struct MovementScheduler<P: Persistence, D: TickDriver> {
    pub(crate) graph:    TrackGraph,
    pub(crate) stations: StationRegistry,
    pub(crate) routes:   RouteCatalog,
    pub(crate) trains:   TrainRoster,
    pub(crate) store:    P,
    driver:              D,
    observer:            Box<dyn MovementObserver + Send>,

    /// Active movements keyed by train.  Iterated in ascending id order.
    active: BTreeMap<TrainId, MovementState>,

    /// Route ids handed out since the last `start_all_with_routes` call.
    claimed: FxHashSet<RouteId>,

    tick: Tick,
}

impl<P: Persistence, D: TickDriver> MovementScheduler<P, D> {
    pub fn new(
        graph:    TrackGraph,
        stations: StationRegistry,
        routes:   RouteCatalog,
        trains:   TrainRoster,
        store:    P,
        driver:   D,
    ) -> Self {
        Self {
            graph,
            stations,
            routes,
            trains,
            store,
            driver,
            observer: Box::new(NoopObserver),
            active:   BTreeMap::new(),
            claimed:  FxHashSet::default(),
            tick:     Tick::ZERO,
        }
    }

    /// Replace the presentation observer.
    pub fn with_observer(mut self, observer: impl MovementObserver + Send + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &TrackGraph {
        &self.graph
    }

    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    pub fn routes(&self) -> &RouteCatalog {
        &self.routes
    }

    pub fn trains(&self) -> &TrainRoster {
        &self.trains
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Mutable access to the store, e.g. to reconnect a provider.
    pub fn store_mut(&mut self) -> &mut P {
        &mut self.store
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn movement(&self, train: TrainId) -> Option<&MovementState> {
        self.active.get(&train)
    }

    pub fn is_active(&self, train: TrainId) -> bool {
        self.active.contains_key(&train)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    // ── Starting and stopping ─────────────────────────────────────────────

    /// Put `train` on the first block of `route` and make it active.
    ///
    /// The train is withdrawn from every station and freed from any block
    /// it was left on.  The tick driver is started if it is not running.
    ///
    /// # Errors
    ///
    /// Nothing changes when an error is returned:
    /// - `EmptyRoute`, `Track(BlockNotFound)` for a route that does not
    ///   resolve to at least one known block;
    /// - `UnknownTrain`, `AlreadyMoving`;
    /// - `BlockOccupied` if another train holds the first block;
    /// - `Store` if the store refused one of the writes.
    pub fn start_movement(&mut self, train: TrainId, route: &Route) -> MovementResult<()> {
        if route.is_empty() {
            warn!("not starting train {train}: route {} has no blocks", route.id);
            return Err(MovementError::EmptyRoute(route.id));
        }
        let current = self.trains.get(train)?.clone();
        if self.active.contains_key(&train) {
            return Err(MovementError::AlreadyMoving(train));
        }

        let blocks: Vec<BlockId> = self
            .graph
            .resolve(&route.block_ids)
            .map_err(|e| {
                warn!("not starting train {train} on route {}: {e}", route.id);
                e
            })?
            .iter()
            .map(|b| b.id)
            .collect();

        let first = self.graph.block(blocks[0])?;
        if let Some(other) = first.occupant.filter(|&t| t != train) {
            warn!("not starting train {train}: {} is held by {other}", first.id);
            return Err(MovementError::BlockOccupied { block: first.id, by: other });
        }

        // Stations first, then any block the train was left on, then the
        // first block and the train itself.
        let mut changes: Vec<Change> = self
            .stations
            .without_train(train)
            .into_iter()
            .map(Change::Station)
            .collect();
        let left_on = self
            .graph
            .blocks()
            .filter(|b| b.occupant == Some(train) && b.id != first.id)
            .map(|b| {
                let mut freed = b.clone();
                freed.occupant = None;
                Change::Block(freed)
            });
        changes.extend(left_on);

        let mut entered = first.clone();
        entered.occupant = Some(train);
        let pos = entered.pos;
        changes.push(Change::Block(entered));

        let mut moved = current;
        moved.pos = pos;
        changes.push(Change::Train(moved));

        let touched: Vec<StationId> = changes
            .iter()
            .filter_map(|c| match c {
                Change::Station(s) => Some(s.id),
                _ => None,
            })
            .collect();

        self.commit(changes)?;

        self.active.insert(train, MovementState::new(train, route.clone(), blocks));
        info!("train {train} started on route {} ({:?}, {} blocks)", route.id, route.name, route.block_ids.len());

        for station in touched {
            self.observer.on_station_changed(station);
        }
        self.observer.on_train_moved(train, pos);

        if !self.driver.is_running() {
            self.driver.start();
            info!("tick driver started");
        }
        Ok(())
    }

    /// [`start_movement`](Self::start_movement) with a route from the catalog.
    pub fn start_movement_by_id(&mut self, train: TrainId, route: RouteId) -> MovementResult<()> {
        let route = self
            .routes
            .get(route)
            .cloned()
            .ok_or(MovementError::UnknownRoute(route))?;
        self.start_movement(train, &route)
    }

    /// Start every idle train that has, or can be given, an unclaimed route.
    ///
    /// Trains already active or still recorded on a block are skipped.  A
    /// train keeps its assigned route unless that route was already claimed
    /// in this pass, in which case it stays idle.  A train without a route
    /// gets the first unclaimed route leaving its current station.
    ///
    /// Returns the trains that started.  Failures are logged per train.
    pub fn start_all_with_routes(&mut self) -> Vec<TrainId> {
        self.claimed.clear();

        let on_blocks: FxHashSet<TrainId> = self.graph.trains_on_blocks().collect();
        let candidates: Vec<TrainId> = self
            .trains
            .ids()
            .filter(|id| !self.active.contains_key(id) && !on_blocks.contains(id))
            .collect();

        let mut started = Vec::new();
        for train in candidates {
            let route = match self.route_for(train) {
                Ok(Some(route)) => route,
                Ok(None) => {
                    debug!("train {train} has no route available");
                    continue;
                }
                Err(e) => {
                    warn!("train {train} skipped: {e}");
                    continue;
                }
            };

            self.claimed.insert(route.id);
            match self.start_movement(train, &route) {
                Ok(()) => started.push(train),
                Err(e) => warn!("train {train} did not start on route {}: {e}", route.id),
            }
        }

        info!("start-all: {} train(s) started, {} active", started.len(), self.active.len());
        started
    }

    /// Drop every active movement and halt the driver.
    ///
    /// Block occupancy and station membership are left as they are.
    pub fn stop_all(&mut self) {
        if !self.active.is_empty() {
            info!("stopping {} active train(s)", self.active.len());
        }
        self.active.clear();
        self.driver.stop();
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every active train by one block.
    ///
    /// Trains are taken in ascending id order.  A train whose next block is
    /// taken holds, unless the held trains form a cycle (each waiting on the
    /// block of the next, as a route and its reverse do when they meet);
    /// such a cycle moves forward as a whole.
    pub fn step(&mut self) -> StepReport {
        self.tick = self.tick.offset(1);
        let mut report = StepReport { tick: self.tick, ..StepReport::default() };

        let moving: Vec<TrainId> = self
            .active
            .iter()
            .filter(|(_, state)| state.is_moving)
            .map(|(&id, _)| id)
            .collect();

        for train in moving {
            match self.advance(train) {
                Ok(Progress::Advanced) => report.advanced.push(train),
                Ok(Progress::Held) => report.held.push(train),
                Ok(Progress::Arrived) => report.arrived.push(train),
                Err(e) => {
                    warn!("{}: train {train} not moved: {e}", self.tick);
                    report.failed.push(train);
                }
            }
        }

        self.rotate_held_cycles(&mut report);

        for train in &report.arrived {
            self.active.remove(train);
        }

        if self.active.is_empty() && self.driver.is_running() {
            self.driver.stop();
            info!("{}: no active trains, tick driver stopped", self.tick);
        }

        self.observer.on_tick_end(&report);
        report
    }

    fn advance(&mut self, train: TrainId) -> MovementResult<Progress> {
        let state = self.active.get(&train).ok_or(MovementError::UnknownTrain(train))?;
        let current = state.current_block();
        match state.next_block() {
            Some(next) => self.transit(train, current, next),
            None => {
                let end = state.route.end;
                self.arrive(train, current, end)
            }
        }
    }

    /// Move `train` from `current` to `next`, unless `next` is held by
    /// another train.
    fn transit(&mut self, train: TrainId, current: BlockId, next: BlockId) -> MovementResult<Progress> {
        let target = self.graph.block(next)?;
        if let Some(other) = target.occupant.filter(|&t| t != train) {
            debug!("{}: train {train} holds on {current}, {next} is held by {other}", self.tick);
            return Ok(Progress::Held);
        }

        let mut changes = Vec::with_capacity(3);
        changes.extend(self.free_block(train, current)?);

        let mut entered = target.clone();
        entered.occupant = Some(train);
        let pos = entered.pos;
        changes.push(Change::Block(entered));
        changes.push(Change::Train(self.train_at(train, pos)?));

        self.commit(changes)?;

        if let Some(state) = self.active.get_mut(&train) {
            state.current_index += 1;
        }
        debug!("{}: train {train} {current} -> {next}", self.tick);
        self.observer.on_train_moved(train, pos);
        Ok(Progress::Advanced)
    }

    /// Move every cycle of held trains forward by one block.
    ///
    /// Only trains that sit on their current block take part.  Each block in
    /// a cycle is the current block of one member and the next block of
    /// another, so after the move every block still has one occupant.
    fn rotate_held_cycles(&mut self, report: &mut StepReport) {
        let mut sitting_on: BTreeMap<BlockId, TrainId> = BTreeMap::new();
        let mut heading: BTreeMap<TrainId, BlockId> = BTreeMap::new();
        for &train in &report.held {
            let Some(state) = self.active.get(&train) else { continue };
            let (current, Some(next)) = (state.current_block(), state.next_block()) else { continue };
            if self.graph.occupant(current) == Some(train) {
                sitting_on.insert(current, train);
                heading.insert(train, next);
            }
        }
        let waits_on: BTreeMap<TrainId, TrainId> = heading
            .iter()
            .filter_map(|(&train, next)| Some((train, *sitting_on.get(next)?)))
            .filter(|(train, holder)| train != holder)
            .collect();

        let mut moved: FxHashSet<TrainId> = FxHashSet::default();
        for &start in waits_on.keys() {
            if moved.contains(&start) {
                continue;
            }
            let Some(cycle) = held_cycle(&waits_on, start) else { continue };
            moved.extend(cycle.iter().copied());

            let moves: Vec<(TrainId, BlockId)> = cycle
                .iter()
                .filter_map(|&train| Some((train, *heading.get(&train)?)))
                .collect();
            report.held.retain(|t| !cycle.contains(t));
            match self.rotate(&moves) {
                Ok(()) => report.advanced.extend(&cycle),
                Err(e) => {
                    warn!("{}: held trains {cycle:?} not moved: {e}", self.tick);
                    report.failed.extend(&cycle);
                }
            }
        }

        report.advanced.sort_unstable();
        report.failed.sort_unstable();
    }

    /// Put each train on its next block in one commit.
    fn rotate(&mut self, moves: &[(TrainId, BlockId)]) -> MovementResult<()> {
        let mut changes = Vec::with_capacity(moves.len() * 2);
        let mut positions = Vec::with_capacity(moves.len());
        for &(train, next) in moves {
            let mut entered = self.graph.block(next)?.clone();
            entered.occupant = Some(train);
            positions.push((train, entered.pos));
            changes.push(Change::Block(entered));
        }
        for &(train, pos) in &positions {
            changes.push(Change::Train(self.train_at(train, pos)?));
        }

        self.commit(changes)?;

        for &(train, pos) in &positions {
            if let Some(state) = self.active.get_mut(&train) {
                state.current_index += 1;
            }
            self.observer.on_train_moved(train, pos);
        }
        debug!("{}: held trains {:?} moved round together", self.tick, moves);
        Ok(())
    }

    /// Take `train` off `last`, admit it at `end` and hand it its next route.
    fn arrive(&mut self, train: TrainId, last: BlockId, end: Option<StationId>) -> MovementResult<Progress> {
        let mut changes = Vec::with_capacity(3);
        changes.extend(self.free_block(train, last)?);

        let mut updated = self.trains.get(train)?.clone();
        let station = match end {
            Some(id) => match self.stations.get(id) {
                Ok(s) => Some(s.clone()),
                Err(e) => {
                    warn!("{}: train {train} has no end station to enter: {e}", self.tick);
                    None
                }
            },
            None => None,
        };

        let mut admitted_at: Option<(StationId, Admission)> = None;
        match station {
            Some(mut station) => {
                let admission = station.admit(train);
                let claimed = &self.claimed;
                updated.route = self
                    .routes
                    .first_unused_from(station.id, |r| claimed.contains(&r))
                    .map(|r| r.id);
                updated.pos = station.pos;
                admitted_at = Some((station.id, admission));
                changes.push(Change::Station(station));
            }
            None => updated.route = None,
        }
        let next_route = updated.route;
        changes.push(Change::Train(updated));

        self.commit(changes)?;

        if let Some(route) = next_route {
            self.claimed.insert(route);
        }
        if let Some(state) = self.active.get_mut(&train) {
            state.is_moving = false;
        }

        match admitted_at {
            Some((station, admission)) => {
                debug!(
                    "{}: train {train} arrived at {station} ({admission:?}), next route {next_route:?}",
                    self.tick
                );
                self.observer.on_train_removed(train);
                self.observer.on_station_changed(station);
            }
            None => {
                debug!("{}: train {train} reached the end of its route", self.tick);
                self.observer.on_train_removed(train);
            }
        }
        Ok(Progress::Arrived)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// A change freeing `block`, if `train` is what occupies it.
    fn free_block(&self, train: TrainId, block: BlockId) -> MovementResult<Option<Change>> {
        let current = self.graph.block(block)?;
        if current.occupant != Some(train) {
            return Ok(None);
        }
        let mut freed = current.clone();
        freed.occupant = None;
        Ok(Some(Change::Block(freed)))
    }

    fn train_at(&self, train: TrainId, pos: GeoPoint) -> MovementResult<crate::Train> {
        let mut moved = self.trains.get(train)?.clone();
        moved.pos = pos;
        Ok(moved)
    }

    /// The route `train` should start on in the current pass, assigning and
    /// persisting one from its station if it has none.
    fn route_for(&mut self, train: TrainId) -> MovementResult<Option<Route>> {
        let current = self.trains.get(train)?.clone();

        if let Some(id) = current.route {
            if self.claimed.contains(&id) {
                return Ok(None);
            }
            return self
                .routes
                .get(id)
                .cloned()
                .map(Some)
                .ok_or(MovementError::UnknownRoute(id));
        }

        let Some(station) = self.stations.station_of(train).map(|s| s.id) else {
            return Ok(None);
        };
        let claimed = &self.claimed;
        let Some(route) = self
            .routes
            .first_unused_from(station, |r| claimed.contains(&r))
            .cloned()
        else {
            return Ok(None);
        };

        let mut assigned = current;
        assigned.route = Some(route.id);
        self.commit(vec![Change::Train(assigned)])?;
        Ok(Some(route))
    }
}

/// The cycle of waiting trains through `start`, in waiting order, if
/// following `waits_on` from `start` leads back to it.
fn held_cycle(waits_on: &BTreeMap<TrainId, TrainId>, start: TrainId) -> Option<Vec<TrainId>> {
    let mut cycle = vec![start];
    let mut at = start;
    loop {
        let holder = *waits_on.get(&at)?;
        if holder == start {
            return Some(cycle);
        }
        if cycle.contains(&holder) {
            return None;
        }
        cycle.push(holder);
        at = holder;
    }
}
