//! Integration tests for rt-sim.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rt_core::{BlockId, GeoPoint, PointId, RouteId, SchedulerConfig, StationId, TrainId};
use rt_movement::{
    ManualDriver, MemoryStore, MovementObserver, Persistence, StepReport, StoreError, StoreResult,
    TickDriver, Train,
};
use rt_route::{Route, RouteCatalogBuilder, RouteError};
use rt_station::Station;
use rt_track::{Block, Point, TrackError};

use crate::{IntervalDriver, LogObserver, SimBuilder, SimError, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

const T1: TrainId = TrainId(1);
const T2: TrainId = TrainId(2);
const S1: StationId = StationId(1);
const S2: StationId = StationId(2);

fn at(i: u32) -> GeoPoint {
    GeoPoint::new(46.80 + 0.01 * i as f64, -71.22)
}

/// P1 - B1 - P2 - B2 - P3, stations at both ends, one route each way.
fn line_store() -> MemoryStore {
    let mut routes = RouteCatalogBuilder::new();
    routes.add_route_with_reverse("Palais - Sainte-Foy", Some(S1), Some(S2), vec![BlockId(1), BlockId(2)]).unwrap();
    let routes: Vec<Route> = routes.build().unwrap().all().to_vec();

    MemoryStore::new()
        .with_points((1..=3).map(|i| Point { id: PointId(i), pos: at(i) }))
        .with_blocks((1..=2).map(|i| Block::new(BlockId(i), vec![PointId(i), PointId(i + 1)], at(i))))
        .with_stations([
            Station::new(S1, "Gare du Palais", at(1), 2).with_members(&[T1], &[]),
            Station::new(S2, "Sainte-Foy", at(3), 2).with_members(&[T2], &[]),
        ])
        .with_routes(routes)
        .with_trains([Train::new(T1), Train::new(T2)])
}

/// A store whose loads always fail.
struct Offline;

impl Persistence for Offline {
    fn load_points(&self) -> StoreResult<Vec<Point>> {
        Err(StoreError::Unavailable("offline".into()))
    }
    fn load_blocks(&self) -> StoreResult<Vec<Block>> {
        Ok(Vec::new())
    }
    fn load_stations(&self) -> StoreResult<Vec<Station>> {
        Ok(Vec::new())
    }
    fn load_routes(&self) -> StoreResult<Vec<Route>> {
        Ok(Vec::new())
    }
    fn load_trains(&self) -> StoreResult<Vec<Train>> {
        Ok(Vec::new())
    }
    fn persist_block(&mut self, _: &Block) -> StoreResult<()> {
        Ok(())
    }
    fn persist_station(&mut self, _: &Station) -> StoreResult<()> {
        Ok(())
    }
    fn persist_train(&mut self, _: &Train) -> StoreResult<()> {
        Ok(())
    }
}

fn fast() -> SchedulerConfig {
    SchedulerConfig { tick_interval_ms: 5 }
}

/// Poll `cond` until it holds or two seconds pass.
fn eventually(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn loads_everything_from_store() {
        let s = SimBuilder::new(line_store()).build(ManualDriver::new()).unwrap();
        assert_eq!(s.graph().point_count(), 3);
        assert_eq!(s.graph().block_count(), 2);
        assert_eq!(s.stations().len(), 2);
        assert_eq!(s.routes().len(), 2);
        assert_eq!(s.trains().len(), 2);
        assert_eq!(s.stations().station_of(T2).unwrap().id, S2);
        assert!(!s.driver().is_running());
    }

    #[test]
    fn keeps_stored_occupancy() {
        let mut b1 = Block::new(BlockId(1), vec![PointId(1), PointId(2)], at(1));
        b1.occupant = Some(TrainId(9));
        let store = line_store().with_blocks([b1]);
        let s = SimBuilder::new(store).build(ManualDriver::new()).unwrap();
        assert_eq!(s.graph().occupant(BlockId(1)), Some(TrainId(9)));
    }

    #[test]
    fn overfull_stored_station_spills_on_load() {
        let mut crowded = Station::new(S1, "Gare du Palais", at(1), 2).with_members(&[T1, T2], &[]);
        crowded.capacity = 1;
        let store = line_store()
            .with_stations([crowded, Station::new(S2, "Sainte-Foy", at(3), 2)]);
        let s = SimBuilder::new(store).build(ManualDriver::new()).unwrap();
        let s1 = s.stations().get(S1).unwrap();
        assert_eq!(s1.in_station(), &[T1]);
        assert_eq!(s1.assigned(), &[T2]);
    }

    #[test]
    fn store_failure() {
        let err = SimBuilder::new(Offline).build(ManualDriver::new()).err().unwrap();
        assert!(matches!(err, SimError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn invalid_track() {
        let store = line_store().with_blocks([Block::new(BlockId(7), vec![PointId(1), PointId(40)], at(1))]);
        let err = SimBuilder::new(store).build(ManualDriver::new()).err().unwrap();
        assert!(matches!(err, SimError::Track(TrackError::UnknownEndpoint { block: BlockId(7), point: PointId(40) })));
    }

    #[test]
    fn duplicate_route_ids() {
        let dup = Route { id: RouteId(1), name: "again".into(), start: None, end: None, block_ids: vec![BlockId(1)] };
        let store = line_store().with_routes([dup]);
        let err = SimBuilder::new(store).build(ManualDriver::new()).err().unwrap();
        assert!(matches!(err, SimError::Route(RouteError::Duplicate(RouteId(1)))));
    }

    #[test]
    fn observer_is_installed() {
        struct Count(Arc<Mutex<usize>>);
        impl MovementObserver for Count {
            fn on_tick_end(&mut self, _: &StepReport) {
                *self.0.lock().unwrap() += 1;
            }
        }

        let ticks = Arc::new(Mutex::new(0));
        let mut s = SimBuilder::new(line_store())
            .observer(Count(Arc::clone(&ticks)))
            .build(ManualDriver::new())
            .unwrap();
        s.step();
        s.step();
        assert_eq!(*ticks.lock().unwrap(), 2);
    }
}

// ── IntervalDriver ────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let mut a = IntervalDriver::new();
        let b = a.clone();
        assert!(!b.is_running());
        a.start();
        assert!(b.is_running());
        a.stop();
        a.stop();
        assert!(!b.is_running());
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulation_tests {
    use super::*;

    #[test]
    fn trains_travel_on_their_own() {
        let mut sim = SimBuilder::new(line_store())
            .observer(LogObserver::new())
            .spawn(&fast())
            .unwrap();

        sim.start_movement(T1, RouteId(1)).unwrap();

        assert!(eventually(|| sim.is_idle()));
        sim.with_scheduler(|s| {
            assert_eq!(s.stations().get(S2).unwrap().in_station(), &[T2, T1]);
            assert_eq!(s.trains().get(T1).unwrap().route, Some(RouteId(2)));
            assert!(s.graph().occupied_blocks().next().is_none());
            assert!(!s.driver().is_running());
            assert_eq!(s.store().train(T1).unwrap().pos, at(3));
        });
        sim.shutdown();
    }

    #[test]
    fn trains_from_both_ends_pass_and_arrive() {
        let mut sim = SimBuilder::new(line_store()).spawn(&fast()).unwrap();

        assert_eq!(sim.start_all_with_routes(), vec![T1, T2]);

        assert!(eventually(|| sim.is_idle()));
        sim.with_scheduler(|s| {
            assert_eq!(s.stations().get(S2).unwrap().in_station(), &[T1]);
            assert_eq!(s.stations().get(S1).unwrap().in_station(), &[T2]);
            assert!(s.graph().occupied_blocks().next().is_none());
        });
        sim.shutdown();
    }

    #[test]
    fn stop_all_halts_ticking() {
        let sim = SimBuilder::new(line_store()).spawn(&SchedulerConfig { tick_interval_ms: 60_000 }).unwrap();
        sim.start_movement(T1, RouteId(1)).unwrap();
        assert!(!sim.is_idle());

        sim.stop_all();

        assert!(sim.is_idle());
        let tick = sim.with_scheduler(|s| s.current_tick());
        assert_eq!(tick.0, 0);
        sim.with_scheduler(|s| assert_eq!(s.graph().occupant(BlockId(1)), Some(T1)));
    }

    #[test]
    fn step_now_shares_the_lock() {
        let sim = SimBuilder::new(line_store()).spawn(&SchedulerConfig { tick_interval_ms: 60_000 }).unwrap();
        sim.start_movement(T1, RouteId(1)).unwrap();

        assert_eq!(sim.step_now().advanced, vec![T1]);
        assert_eq!(sim.step_now().arrived, vec![T1]);
        assert!(sim.is_idle());
    }

    #[test]
    fn start_errors_reach_the_caller() {
        let sim = SimBuilder::new(line_store()).spawn(&fast()).unwrap();
        assert!(sim.start_movement(T1, RouteId(99)).is_err());
        assert!(sim.is_idle());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let scheduler = SimBuilder::new(line_store()).build(IntervalDriver::new()).unwrap();
        let mut sim = Simulation::spawn(scheduler, &fast()).unwrap();
        assert!(sim.is_running());
        sim.shutdown();
        sim.shutdown();
        assert!(!sim.is_running());
        // The scheduler stays usable after the worker is gone.
        assert_eq!(sim.start_all_with_routes(), vec![T1, T2]);
    }
}
