use rt_core::StationId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StationError {
    #[error("station {0} not found")]
    NotFound(StationId),

    #[error("duplicate station {0}")]
    Duplicate(StationId),
}

pub type StationResult<T> = Result<T, StationError>;
