//! Per-train movement state.

use rt_core::{BlockId, TrainId};
use rt_route::Route;

/// Progress of one train along one route.
///
/// Created by `start_movement`, dropped on arrival or `stop_all`.  Only the
/// scheduler holds these; blocks are referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementState {
    pub train: TrainId,

    /// The route being travelled, as it was when the movement started.
    pub route: Route,

    /// `route.block_ids`, checked against the track graph at start.
    pub blocks: Vec<BlockId>,

    /// Index into `blocks` of the block the train is on.
    pub current_index: usize,

    /// `false` once the train has arrived.
    pub is_moving: bool,
}

impl MovementState {
    /// A state for a train placed on the first of `blocks`.
    ///
    /// `blocks` must not be empty.
    pub fn new(train: TrainId, route: Route, blocks: Vec<BlockId>) -> Self {
        debug_assert!(!blocks.is_empty());
        Self { train, route, blocks, current_index: 0, is_moving: true }
    }

    /// The block the train is on.
    #[inline]
    pub fn current_block(&self) -> BlockId {
        self.blocks[self.current_index]
    }

    /// The block the train will enter next tick, or `None` if the next
    /// tick is the arrival.
    #[inline]
    pub fn next_block(&self) -> Option<BlockId> {
        self.blocks.get(self.current_index + 1).copied()
    }

    /// Blocks still ahead of the train.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.blocks.len() - self.current_index - 1
    }
}
