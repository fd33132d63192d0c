use rt_movement::StoreError;
use rt_route::RouteError;
use rt_station::StationError;
use rt_track::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("loading from store: {0}")]
    Store(#[from] StoreError),

    #[error("invalid track: {0}")]
    Track(#[from] TrackError),

    #[error("invalid stations: {0}")]
    Station(#[from] StationError),

    #[error("invalid routes: {0}")]
    Route(#[from] RouteError),

    #[error("could not spawn tick worker: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
