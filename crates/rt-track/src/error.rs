//! Track-graph error type.

use thiserror::Error;

use rt_core::{BlockId, PointId};

/// Errors produced by `rt-track`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("block {0} not found")]
    BlockNotFound(BlockId),

    #[error("point {0} not found")]
    PointNotFound(PointId),

    #[error("duplicate point {0}")]
    DuplicatePoint(PointId),

    #[error("duplicate block {0}")]
    DuplicateBlock(BlockId),

    #[error("block {block} must join one or two distinct points, got {count}")]
    BadEndpoints { block: BlockId, count: usize },

    #[error("block {block} references unknown point {point}")]
    UnknownEndpoint { block: BlockId, point: PointId },
}

pub type TrackResult<T> = Result<T, TrackError>;
