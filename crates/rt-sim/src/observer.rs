//! A movement observer that reports through the `log` facade.

use log::{debug, info};
use rt_core::{GeoPoint, StationId, TrainId};
use rt_movement::{MovementObserver, StepReport};

/// Logs one line per tick in which something happened, plus per-train
/// detail at `debug` level.
///
/// Useful for headless runs; a map front end would implement
/// [`MovementObserver`] itself and redraw markers instead.
#[derive(Debug, Default)]
pub struct LogObserver {
    /// Ticks that produced at least one event.
    busy_ticks: u64,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy_ticks(&self) -> u64 {
        self.busy_ticks
    }
}

impl MovementObserver for LogObserver {
    fn on_train_moved(&mut self, train: TrainId, pos: GeoPoint) {
        debug!("{train} at {pos}");
    }

    fn on_train_removed(&mut self, train: TrainId) {
        debug!("{train} left the track");
    }

    fn on_station_changed(&mut self, station: StationId) {
        debug!("{station} membership changed");
    }

    fn on_tick_end(&mut self, report: &StepReport) {
        let quiet = report.advanced.is_empty()
            && report.held.is_empty()
            && report.arrived.is_empty()
            && report.failed.is_empty();
        if quiet {
            return;
        }
        self.busy_ticks += 1;
        info!(
            "{}: {} advanced, {} held, {} arrived, {} failed",
            report.tick,
            report.advanced.len(),
            report.held.len(),
            report.arrived.len(),
            report.failed.len(),
        );
    }
}
