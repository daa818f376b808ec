//! CSV tile loader.
//!
//! # CSV format
//!
//! One row per observed tile, in wire form (raw integers, validated here).
//!
//! ```csv
//! q,r,cost,terrain
//! 0,0,1,1
//! 1,0,1,2
//! 2,0,2,3
//! 3,0,1,4
//! 4,0,1,5
//! ```
//!
//! **`terrain`** uses the server codes: 1 anthill, 2 plain, 3 mud, 4 acid,
//! 5 rock.  Coordinates outside `±COORD_LIMIT` and unknown terrain codes are
//! rejected with the 1-based data row number.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hx_core::{HexPoint, TerrainKind};

use crate::{MapError, MapResult, Tile};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TileRecord {
    q:       i64,
    r:       i64,
    cost:    u32,
    terrain: i64,
}

impl TileRecord {
    fn into_tile(self) -> Result<Tile, hx_core::CoreError> {
        Ok(Tile {
            point:   HexPoint::from_wire("tile", self.q, self.r)?,
            cost:    self.cost,
            terrain: TerrainKind::from_code("terrain", self.terrain)?,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load observed tiles from a CSV file.
pub fn load_tiles_csv(path: &Path) -> MapResult<Vec<Tile>> {
    let file = std::fs::File::open(path).map_err(MapError::Io)?;
    load_tiles_reader(file)
}

/// Like [`load_tiles_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading a tile dump
/// captured from the transport layer.
pub fn load_tiles_reader<R: Read>(reader: R) -> MapResult<Vec<Tile>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut tiles = Vec::new();
    for (index, result) in csv_reader.deserialize::<TileRecord>().enumerate() {
        let record = result.map_err(|e| MapError::Parse(e.to_string()))?;
        let tile = record
            .into_tile()
            .map_err(|source| MapError::Row { row: index + 1, source })?;
        tiles.push(tile);
    }

    tracing::debug!(tiles = tiles.len(), "tile csv loaded");
    Ok(tiles)
}
