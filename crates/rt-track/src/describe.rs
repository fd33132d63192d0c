//! Human-readable connectivity summary for a point, for info panels.

use std::fmt::Write;

use rt_core::PointId;

use crate::{TrackGraph, TrackResult};

/// Describe every block incident to `point`.
///
/// ```text
/// Point 4
/// Connected blocks:
///  - Block 2 (free) -> point 5
///  - Block 7 (occupied by train 3) -> single point
/// ```
pub fn describe_point(graph: &TrackGraph, point: PointId) -> TrackResult<String> {
    let blocks = graph.blocks_at_point(point)?;

    let mut out = format!("Point {}\nConnected blocks:", point.0);
    if blocks.is_empty() {
        out.push_str("\n none");
    }
    for block in blocks {
        let status = match block.occupant {
            Some(train) => format!("occupied by train {}", train.0),
            None => "free".to_owned(),
        };
        let towards = match block.other_end(point) {
            Some(other) => format!("point {}", other.0),
            None => "single point".to_owned(),
        };
        // Writing into a String cannot fail.
        let _ = write!(out, "\n - Block {} ({status}) -> {towards}", block.id.0);
    }
    Ok(out)
}
