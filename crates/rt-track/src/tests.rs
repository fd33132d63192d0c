//! Unit tests for rt-track.

use rt_core::{BlockId, GeoPoint, PointId, TrainId};

use crate::{Block, TrackError, TrackGraph, TrackGraphBuilder, describe_point};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn block(id: u32, points: &[u32]) -> Block {
    Block::new(
        BlockId(id),
        points.iter().map(|&p| PointId(p)).collect(),
        GeoPoint::new(46.8 + id as f64 * 0.001, -71.2),
    )
}

/// Y-shaped junction: 1 — 2 — 3 with a spur 2 — 4 and a stub at 5.
///
/// Blocks: 10 = {1,2}, 11 = {2,3}, 12 = {2,4}, 13 = {5}.
fn junction() -> TrackGraph {
    let mut b = TrackGraphBuilder::new();
    for p in 1..=5 {
        b.add_point(PointId(p), GeoPoint::new(46.8, -71.2 + p as f64 * 0.01));
    }
    b.add_block(block(10, &[1, 2]))
        .add_block(block(11, &[2, 3]))
        .add_block(block(12, &[4, 2]))
        .add_block(block(13, &[5]));
    b.build().unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn counts() {
        let g = junction();
        assert_eq!(g.point_count(), 5);
        assert_eq!(g.block_count(), 4);
        assert!(!g.is_empty());
        assert!(TrackGraph::empty().is_empty());
    }

    #[test]
    fn duplicate_block_rejected() {
        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(1), GeoPoint::default());
        b.add_block(block(1, &[1])).add_block(block(1, &[1]));
        assert_eq!(b.build().unwrap_err(), TrackError::DuplicateBlock(BlockId(1)));
    }

    #[test]
    fn duplicate_point_rejected() {
        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(1), GeoPoint::default());
        b.add_point(PointId(1), GeoPoint::default());
        assert_eq!(b.build().unwrap_err(), TrackError::DuplicatePoint(PointId(1)));
    }

    #[test]
    fn endpoint_count_validated() {
        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(1), GeoPoint::default());
        b.add_block(block(1, &[]));
        assert_eq!(
            b.build().unwrap_err(),
            TrackError::BadEndpoints { block: BlockId(1), count: 0 }
        );

        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(1), GeoPoint::default());
        b.add_block(block(2, &[1, 1]));
        assert!(matches!(b.build(), Err(TrackError::BadEndpoints { count: 2, .. })));
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(1), GeoPoint::default());
        b.add_block(block(1, &[1, 9]));
        assert_eq!(
            b.build().unwrap_err(),
            TrackError::UnknownEndpoint { block: BlockId(1), point: PointId(9) }
        );
    }

    #[test]
    fn preloaded_occupant_is_kept() {
        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(1), GeoPoint::default());
        let mut occupied = block(1, &[1]);
        occupied.occupant = Some(TrainId(4));
        b.add_block(occupied);
        let g = b.build().unwrap();
        assert_eq!(g.occupant(BlockId(1)), Some(TrainId(4)));
    }
}

// ── Lookup ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lookup {
    use super::*;

    #[test]
    fn block_by_id() {
        let g = junction();
        assert_eq!(g.block(BlockId(11)).unwrap().points, vec![PointId(2), PointId(3)]);
        assert_eq!(g.block(BlockId(99)).unwrap_err(), TrackError::BlockNotFound(BlockId(99)));
    }

    #[test]
    fn blocks_at_hub_point() {
        let g = junction();
        let ids: Vec<BlockId> = g.blocks_at_point(PointId(2)).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BlockId(10), BlockId(11), BlockId(12)]);
    }

    #[test]
    fn blocks_at_unknown_point_errors() {
        let g = junction();
        assert!(matches!(g.blocks_at_point(PointId(42)), Err(TrackError::PointNotFound(_))));
    }

    #[test]
    fn resolve_keeps_order() {
        let g = junction();
        let ids: Vec<BlockId> = g
            .resolve(&[BlockId(12), BlockId(10)])
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![BlockId(12), BlockId(10)]);
    }

    #[test]
    fn resolve_fails_on_unknown() {
        let g = junction();
        assert_eq!(
            g.resolve(&[BlockId(10), BlockId(77)]).unwrap_err(),
            TrackError::BlockNotFound(BlockId(77))
        );
    }

    #[test]
    fn other_end() {
        let g = junction();
        let b = g.block(BlockId(12)).unwrap();
        assert_eq!(b.other_end(PointId(2)), Some(PointId(4)));
        assert_eq!(b.other_end(PointId(4)), Some(PointId(2)));
        assert_eq!(b.other_end(PointId(1)), None);
        assert_eq!(g.block(BlockId(13)).unwrap().other_end(PointId(5)), None);
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;

    #[test]
    fn set_occupant_is_visible_immediately() {
        let mut g = junction();
        let previous = g.set_occupant(BlockId(10), Some(TrainId(1))).unwrap();
        assert_eq!(previous, None);
        assert_eq!(g.occupant(BlockId(10)), Some(TrainId(1)));
        assert!(!g.block(BlockId(10)).unwrap().is_free());

        let previous = g.set_occupant(BlockId(10), None).unwrap();
        assert_eq!(previous, Some(TrainId(1)));
        assert!(g.block(BlockId(10)).unwrap().is_free());
    }

    #[test]
    fn set_occupant_unknown_block() {
        let mut g = junction();
        assert!(g.set_occupant(BlockId(500), Some(TrainId(1))).is_err());
    }

    #[test]
    fn trains_on_blocks_and_block_of() {
        let mut g = junction();
        g.set_occupant(BlockId(11), Some(TrainId(2))).unwrap();
        g.set_occupant(BlockId(13), Some(TrainId(5))).unwrap();
        let on: Vec<TrainId> = g.trains_on_blocks().collect();
        assert_eq!(on, vec![TrainId(2), TrainId(5)]);
        assert_eq!(g.block_of(TrainId(5)), Some(BlockId(13)));
        assert_eq!(g.block_of(TrainId(9)), None);

        let occupied: Vec<BlockId> = g.occupied_blocks().map(|b| b.id).collect();
        assert_eq!(occupied, vec![BlockId(11), BlockId(13)]);
    }
}

// ── describe_point ────────────────────────────────────────────────────────────

#[cfg(test)]
mod describe {
    use super::*;

    #[test]
    fn lists_blocks_with_status_and_direction() {
        let mut g = junction();
        g.set_occupant(BlockId(11), Some(TrainId(3))).unwrap();
        let text = describe_point(&g, PointId(2)).unwrap();
        assert_eq!(
            text,
            "Point 2\nConnected blocks:\n \
             - Block 10 (free) -> point 1\n \
             - Block 11 (occupied by train 3) -> point 3\n \
             - Block 12 (free) -> point 4"
        );
    }

    #[test]
    fn single_point_block() {
        let g = junction();
        let text = describe_point(&g, PointId(5)).unwrap();
        assert!(text.ends_with("Block 13 (free) -> single point"), "{text}");
    }

    #[test]
    fn isolated_point() {
        let mut b = TrackGraphBuilder::new();
        b.add_point(PointId(8), GeoPoint::default());
        let g = b.build().unwrap();
        assert_eq!(describe_point(&g, PointId(8)).unwrap(), "Point 8\nConnected blocks:\n none");
    }
}
