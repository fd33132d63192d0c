//! Fluent builder that loads a scheduler from a store of record.

use log::{info, warn};

use rt_core::SchedulerConfig;
use rt_movement::{MovementObserver, MovementScheduler, Persistence, TickDriver, TrainRoster};
use rt_route::RouteCatalog;
use rt_station::StationRegistry;
use rt_track::TrackGraphBuilder;

use crate::{IntervalDriver, SimResult, Simulation};

/// Fluent builder for a [`MovementScheduler`] backed by `P`.
///
/// # Required inputs
///
/// - `P: Persistence` — every point, block, station, route and train is
///   loaded from it once, and every later change is written back to it.
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default          |
/// |------------------|------------------|
/// | `.observer(o)`   | `NoopObserver`   |
///
/// # Example
///
/// ```rust,ignore
/// // Deterministic: step() is called by hand.
/// let mut scheduler = SimBuilder::new(store).build(ManualDriver::new())?;
///
/// // Real time: a worker thread steps every tick_interval.
/// let sim = SimBuilder::new(store)
///     .observer(LogObserver::new())
///     .spawn(&SchedulerConfig::default())?;
/// ```
pub struct SimBuilder<P: Persistence> {
    store:    P,
    observer: Option<Box<dyn MovementObserver + Send>>,
}

impl<P: Persistence> SimBuilder<P> {
    pub fn new(store: P) -> Self {
        Self { store, observer: None }
    }

    /// Receive movement notifications, e.g. to redraw a map.
    pub fn observer(mut self, observer: impl MovementObserver + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Load the store's contents and return a scheduler driven by `driver`.
    ///
    /// # Errors
    ///
    /// Whatever the store returns from a `load_*` call, and validation
    /// failures of the track graph, station registry or route catalog.
    pub fn build<D: TickDriver>(self, driver: D) -> SimResult<MovementScheduler<P, D>> {
        // ── Track ─────────────────────────────────────────────────────────
        let mut track = TrackGraphBuilder::new();
        for point in self.store.load_points()? {
            track.add_point(point.id, point.pos);
        }
        for block in self.store.load_blocks()? {
            track.add_block(block);
        }
        let graph = track.build()?;

        // ── Stations, routes, trains ──────────────────────────────────────
        let stations = StationRegistry::from_stations(self.store.load_stations()?)?;
        let routes = RouteCatalog::from_routes(self.store.load_routes()?)?;
        let trains = TrainRoster::from_trains(self.store.load_trains()?);

        for block in graph.occupied_blocks() {
            if let Some(train) = block.occupant.filter(|&t| !trains.contains(t)) {
                warn!("{} is held by unknown {train}", block.id);
            }
        }

        info!(
            "loaded {} points, {} blocks, {} stations, {} routes, {} trains",
            graph.point_count(),
            graph.block_count(),
            stations.len(),
            routes.len(),
            trains.len(),
        );

        let scheduler = MovementScheduler::new(graph, stations, routes, trains, self.store, driver);
        Ok(match self.observer {
            Some(observer) => scheduler.with_observer(observer),
            None => scheduler,
        })
    }

    /// [`build`](Self::build) with an [`IntervalDriver`] and start ticking
    /// every `config.tick_interval()`.
    pub fn spawn(self, config: &SchedulerConfig) -> SimResult<Simulation<P>>
    where
        P: Send + 'static,
    {
        let scheduler = self.build(IntervalDriver::new())?;
        Simulation::spawn(scheduler, config)
    }
}
