//! The shared scheduler and its tick worker.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use rt_core::{RouteId, SchedulerConfig, TrainId};
use rt_movement::{MovementResult, MovementScheduler, Persistence, StepReport, TickDriver};

use crate::{IntervalDriver, SimResult};

type Shared<P> = Arc<Mutex<MovementScheduler<P, IntervalDriver>>>;

/// A [`MovementScheduler`] ticked in real time by a background thread.
///
/// Every public method takes the scheduler lock, so a caller never sees a
/// half-applied step and at most one `step` runs at a time.
///
/// Create via [`SimBuilder::spawn`][crate::SimBuilder::spawn] or
/// [`Simulation::spawn`].
pub struct Simulation<P: Persistence + Send + 'static> {
    scheduler: Shared<P>,
    shutdown:  Option<Sender<()>>,
    worker:    Option<JoinHandle<()>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<P: Persistence + Send + 'static> Simulation<P> {
    /// Move `scheduler` behind a mutex and start the tick worker.
    ///
    /// The worker wakes every `config.tick_interval()`; it only steps while
    /// the scheduler's driver is running.
    pub fn spawn(scheduler: MovementScheduler<P, IntervalDriver>, config: &SchedulerConfig) -> SimResult<Self> {
        let interval = config.tick_interval();
        let running = scheduler.driver().flag();
        let scheduler: Shared<P> = Arc::new(Mutex::new(scheduler));
        let (shutdown, requests) = mpsc::channel::<()>();

        let shared = Arc::clone(&scheduler);
        let worker = thread::Builder::new()
            .name("rt-sim-tick".into())
            .spawn(move || {
                loop {
                    match requests.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if !running.load(Ordering::Acquire) {
                        continue;
                    }
                    let mut guard = lock(&shared);
                    // stop_all may have won the race for the lock.
                    if guard.driver().is_running() {
                        let report = guard.step();
                        debug!("{} done, {} train(s) active", report.tick, guard.active_count());
                    }
                }
            })?;

        info!("tick worker started, interval {interval:?}");
        Ok(Self { scheduler, shutdown: Some(shutdown), worker: Some(worker) })
    }

    /// Run `f` with exclusive access to the scheduler.
    pub fn with_scheduler<R>(&self, f: impl FnOnce(&mut MovementScheduler<P, IntervalDriver>) -> R) -> R {
        f(&mut lock(&self.scheduler))
    }

    pub fn start_movement(&self, train: TrainId, route: RouteId) -> MovementResult<()> {
        self.with_scheduler(|s| s.start_movement_by_id(train, route))
    }

    pub fn start_all_with_routes(&self) -> Vec<TrainId> {
        self.with_scheduler(MovementScheduler::start_all_with_routes)
    }

    pub fn stop_all(&self) {
        self.with_scheduler(MovementScheduler::stop_all);
    }

    /// Step immediately, outside the worker's schedule.
    pub fn step_now(&self) -> StepReport {
        self.with_scheduler(MovementScheduler::step)
    }

    /// `true` when no train is moving.
    pub fn is_idle(&self) -> bool {
        self.with_scheduler(|s| s.active_count() == 0)
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Stop the worker, waiting for a step in progress to finish.
    ///
    /// Movements are left as they are.  Calling this again does nothing.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else { return };
        if let Some(tx) = self.shutdown.take() {
            // A send error means the worker is already gone.
            let _ = tx.send(());
        }
        if worker.join().is_err() {
            warn!("tick worker panicked");
        }
        info!("tick worker stopped");
    }
}

impl<P: Persistence + Send + 'static> Drop for Simulation<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
