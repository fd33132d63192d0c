//! Presentation-layer notifications.

use rt_core::{GeoPoint, StationId, TrainId};

use crate::StepReport;

/// Callbacks invoked by the scheduler after each committed change.
///
/// Observers only receive ids and coordinates; they read whatever else they
/// need from the scheduler's accessors and never mutate scheduler state.
/// All methods default to no-ops.
///
/// # Example — marker refresher
///
/// ```rust,ignore
/// struct Markers { positions: HashMap<TrainId, GeoPoint> }
///
/// impl MovementObserver for Markers {
///     fn on_train_moved(&mut self, train: TrainId, pos: GeoPoint) {
///         self.positions.insert(train, pos);
///     }
///     fn on_train_removed(&mut self, train: TrainId) {
///         self.positions.remove(&train);
///     }
/// }
/// ```
pub trait MovementObserver {
    /// A train was placed on, or moved to, a block at `pos`.
    fn on_train_moved(&mut self, _train: TrainId, _pos: GeoPoint) {}

    /// A train left the track (it arrived); drop its marker.
    fn on_train_removed(&mut self, _train: TrainId) {}

    /// A station's membership sets changed.
    fn on_station_changed(&mut self, _station: StationId) {}

    /// A step finished.
    fn on_tick_end(&mut self, _report: &StepReport) {}
}

/// A [`MovementObserver`] that does nothing.
pub struct NoopObserver;

impl MovementObserver for NoopObserver {}

impl<O: MovementObserver + ?Sized> MovementObserver for Box<O> {
    fn on_train_moved(&mut self, train: TrainId, pos: GeoPoint) {
        (**self).on_train_moved(train, pos);
    }

    fn on_train_removed(&mut self, train: TrainId) {
        (**self).on_train_removed(train);
    }

    fn on_station_changed(&mut self, station: StationId) {
        (**self).on_station_changed(station);
    }

    fn on_tick_end(&mut self, report: &StepReport) {
        (**self).on_tick_end(report);
    }
}
