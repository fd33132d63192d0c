use rt_core::{BlockId, RouteId, TrainId};
use rt_station::StationError;
use rt_track::TrackError;
use thiserror::Error;

/// Failure reported by a [`Persistence`][crate::Persistence] provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store rejected {entity}: {reason}")]
    Rejected { entity: String, reason: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum MovementError {
    #[error("train {0} not found")]
    UnknownTrain(TrainId),

    #[error("route {0} not found")]
    UnknownRoute(RouteId),

    #[error("route {0} has no blocks")]
    EmptyRoute(RouteId),

    #[error("train {0} is already moving")]
    AlreadyMoving(TrainId),

    #[error("block {block} is occupied by train {by}")]
    BlockOccupied { block: BlockId, by: TrainId },

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Station(#[from] StationError),

    #[error("persistence failure: {0}")]
    Store(#[from] StoreError),
}

pub type MovementResult<T> = Result<T, MovementError>;
