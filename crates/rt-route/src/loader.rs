//! CSV route seeding.
//!
//! # CSV format
//!
//! One row per forward route.  Each row also produces the reverse route.
//!
//! ```csv
//! name,start_station,end_station,block_ids
//! Gare CN to Rive-Sud,2,5,30 34
//! Gare du Palais to Charlevoix,3,6,15 14 23
//! ```
//!
//! | Column          | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `name`          | Display name of the forward route                    |
//! | `start_station` | `StationId` (u32), or empty for "no station"         |
//! | `end_station`   | `StationId` (u32), or empty for "no station"         |
//! | `block_ids`     | Whitespace-separated `BlockId`s, in travel order     |
//!
//! Ids are allocated from 1 in file order: row *n* yields forward route
//! `2n - 1` and reverse route `2n`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rt_core::{BlockId, StationId};

use crate::{RouteCatalog, RouteCatalogBuilder, RouteError, RouteResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteRecord {
    name:          String,
    start_station: Option<u32>,
    end_station:   Option<u32>,
    block_ids:     String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a route catalog from a CSV file.
pub fn load_routes_csv(path: &Path) -> RouteResult<RouteCatalog> {
    let file = std::fs::File::open(path)?;
    load_routes_reader(file)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
pub fn load_routes_reader<R: Read>(reader: R) -> RouteResult<RouteCatalog> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut builder = RouteCatalogBuilder::new();

    for (line, result) in csv_reader.deserialize::<RouteRecord>().enumerate() {
        let row = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        let blocks = parse_block_ids(&row.block_ids)
            .map_err(|msg| RouteError::Parse(format!("row {}: {msg}", line + 1)))?;
        builder.add_route_with_reverse(
            row.name,
            row.start_station.map(StationId),
            row.end_station.map(StationId),
            blocks,
        )?;
    }

    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_block_ids(s: &str) -> Result<Vec<BlockId>, String> {
    s.split_whitespace()
        .map(|tok| {
            tok.parse::<u32>()
                .map(BlockId)
                .map_err(|_| format!("invalid block id {tok:?}: expected a u32"))
        })
        .collect()
}
