//! Track graph representation and builder.
//!
//! # Data layout
//!
//! Points and blocks are stored in id-keyed `BTreeMap`s so iteration order
//! is deterministic and independent of load order.  The many-to-many
//! relation between points and blocks is held once, on the block side
//! (`Block::points`), plus a point → blocks index built by
//! [`TrackGraphBuilder::build`].  Neither side holds a reference to the
//! other.

use std::collections::BTreeMap;

use rt_core::{BlockId, GeoPoint, PointId, TrainId};

use crate::{TrackError, TrackResult};

// ── Point ─────────────────────────────────────────────────────────────────────

/// A node of the track graph.  Immutable after creation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub id:  PointId,
    pub pos: GeoPoint,
}

// ── Block ─────────────────────────────────────────────────────────────────────

/// An indivisible track segment between one or two points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub id: BlockId,

    /// Endpoints of the segment.  Order carries no meaning.
    pub points: Vec<PointId>,

    /// Display position; copied onto a train while it occupies the block.
    pub pos: GeoPoint,

    /// The train currently on this block, if any.
    pub occupant: Option<TrainId>,
}

impl Block {
    /// A free block joining `points`.
    pub fn new(id: BlockId, points: Vec<PointId>, pos: GeoPoint) -> Self {
        Self { id, points, pos, occupant: None }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// The endpoint opposite `point`, or `None` for a single-point block
    /// (or when `point` is not an endpoint at all).
    pub fn other_end(&self, point: PointId) -> Option<PointId> {
        if !self.points.contains(&point) {
            return None;
        }
        self.points.iter().copied().find(|&p| p != point)
    }
}

// ── TrackGraph ────────────────────────────────────────────────────────────────

/// Points, blocks and per-block occupancy.
///
/// Do not construct directly; use [`TrackGraphBuilder`].
#[derive(Debug, Default)]
pub struct TrackGraph {
    points:       BTreeMap<PointId, Point>,
    blocks:       BTreeMap<BlockId, Block>,
    point_blocks: BTreeMap<PointId, Vec<BlockId>>,
}

impl TrackGraph {
    /// A graph with no points and no blocks.
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.blocks.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn point(&self, id: PointId) -> TrackResult<&Point> {
        self.points.get(&id).ok_or(TrackError::PointNotFound(id))
    }

    pub fn block(&self, id: BlockId) -> TrackResult<&Block> {
        self.blocks.get(&id).ok_or(TrackError::BlockNotFound(id))
    }

    /// All points in ascending id order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    /// All blocks in ascending id order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Every block incident to `point`, in ascending block id order.
    pub fn blocks_at_point(&self, point: PointId) -> TrackResult<Vec<&Block>> {
        let ids = self
            .point_blocks
            .get(&point)
            .ok_or(TrackError::PointNotFound(point))?;
        Ok(ids.iter().filter_map(|id| self.blocks.get(id)).collect())
    }

    /// Resolve an ordered list of block ids.
    ///
    /// Fails on the first id that is not in the graph; the result keeps the
    /// order of `ids`, duplicates included.
    pub fn resolve(&self, ids: &[BlockId]) -> TrackResult<Vec<&Block>> {
        ids.iter().map(|&id| self.block(id)).collect()
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// The train on `block`, or `None` if the block is free or unknown.
    #[inline]
    pub fn occupant(&self, block: BlockId) -> Option<TrainId> {
        self.blocks.get(&block).and_then(|b| b.occupant)
    }

    /// Set or clear the occupant of `block`, returning the previous one.
    pub fn set_occupant(&mut self, block: BlockId, train: Option<TrainId>) -> TrackResult<Option<TrainId>> {
        let entry = self.blocks.get_mut(&block).ok_or(TrackError::BlockNotFound(block))?;
        Ok(std::mem::replace(&mut entry.occupant, train))
    }

    /// Every block with an occupant, in ascending id order.
    pub fn occupied_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values().filter(|b| !b.is_free())
    }

    /// Every train currently recorded on some block.
    pub fn trains_on_blocks(&self) -> impl Iterator<Item = TrainId> + '_ {
        self.blocks.values().filter_map(|b| b.occupant)
    }

    /// The first block (ascending id) that `train` occupies.
    pub fn block_of(&self, train: TrainId) -> Option<BlockId> {
        self.blocks
            .values()
            .find(|b| b.occupant == Some(train))
            .map(|b| b.id)
    }
}

// ── TrackGraphBuilder ─────────────────────────────────────────────────────────

/// Construct a [`TrackGraph`] incrementally, then call [`build`](Self::build).
///
/// Points and blocks may be added in any order; all validation happens in
/// `build()`.
///
/// # Example
///
/// ```
/// use rt_core::{BlockId, GeoPoint, PointId};
/// use rt_track::{Block, TrackGraphBuilder};
///
/// let mut b = TrackGraphBuilder::new();
/// b.add_point(PointId(1), GeoPoint::new(46.80, -71.22));
/// b.add_point(PointId(2), GeoPoint::new(46.81, -71.21));
/// b.add_block(Block::new(BlockId(1), vec![PointId(1), PointId(2)], GeoPoint::new(46.805, -71.215)));
/// let graph = b.build().unwrap();
/// assert_eq!(graph.block_count(), 1);
/// assert_eq!(graph.blocks_at_point(PointId(2)).unwrap().len(), 1);
/// ```
#[derive(Default)]
pub struct TrackGraphBuilder {
    points: Vec<Point>,
    blocks: Vec<Block>,
}

impl TrackGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, id: PointId, pos: GeoPoint) -> &mut Self {
        self.points.push(Point { id, pos });
        self
    }

    /// Add a block.  An occupant already set on `block` is kept, so a graph
    /// reloaded mid-journey still reports the trains that were on it.
    pub fn add_block(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// Validate and index everything added so far.
    ///
    /// # Errors
    ///
    /// Duplicate ids, blocks with zero or more than two endpoints (or the
    /// same point twice), and endpoints naming unknown points.
    pub fn build(self) -> TrackResult<TrackGraph> {
        let mut points = BTreeMap::new();
        for p in self.points {
            if points.insert(p.id, p).is_some() {
                return Err(TrackError::DuplicatePoint(p.id));
            }
        }

        let mut point_blocks: BTreeMap<PointId, Vec<BlockId>> =
            points.keys().map(|&id| (id, Vec::new())).collect();
        let mut blocks = BTreeMap::new();

        for block in self.blocks {
            let count = block.points.len();
            let distinct = count == 1 || (count == 2 && block.points[0] != block.points[1]);
            if !distinct {
                return Err(TrackError::BadEndpoints { block: block.id, count });
            }
            for &point in &block.points {
                match point_blocks.get_mut(&point) {
                    Some(incident) => incident.push(block.id),
                    None => return Err(TrackError::UnknownEndpoint { block: block.id, point }),
                }
            }
            let id = block.id;
            if blocks.insert(id, block).is_some() {
                return Err(TrackError::DuplicateBlock(id));
            }
        }

        for incident in point_blocks.values_mut() {
            incident.sort_unstable();
        }

        Ok(TrackGraph { points, blocks, point_blocks })
    }
}
