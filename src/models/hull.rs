// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hull occupancy grid.
//!
//! The hull is an immutable set of occupied cells keyed by grid coordinate.
//! Updates return a new grid; the backing set is shared until written, so
//! snapshots kept for undo are cheap.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Integer grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Serialized form, validated on the way in.
#[derive(Serialize, Deserialize)]
struct HullGridRepr {
    width: u32,
    height: u32,
    tiles: Vec<GridCoord>,
}

/// Set of hull tiles on a `width x height` grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HullGridRepr", into = "HullGridRepr")]
pub struct HullGrid {
    width: u32,
    height: u32,
    tiles: Arc<BTreeSet<GridCoord>>,
}

impl HullGrid {
    /// Create an empty hull grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: Arc::new(BTreeSet::new()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.tiles.contains(&coord)
    }

    /// Number of hull tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Occupied cells, ordered by column then row.
    pub fn tiles(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.tiles.iter().copied()
    }

    /// Grid with `coord` occupied. Out-of-bounds or already occupied cells
    /// leave the grid unchanged.
    pub fn with_tile(&self, coord: GridCoord) -> Self {
        if !self.in_bounds(coord) || self.is_occupied(coord) {
            return self.clone();
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.tiles).insert(coord);
        next
    }

    /// Grid with `coord` cleared.
    pub fn without_tile(&self, coord: GridCoord) -> Self {
        if !self.is_occupied(coord) {
            return self.clone();
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.tiles).remove(&coord);
        next
    }

    /// Whether two grids share the same backing storage.
    #[cfg(test)]
    pub fn shares_storage_with(&self, other: &HullGrid) -> bool {
        Arc::ptr_eq(&self.tiles, &other.tiles)
    }
}

impl TryFrom<HullGridRepr> for HullGrid {
    type Error = String;

    fn try_from(repr: HullGridRepr) -> Result<Self, Self::Error> {
        let mut grid = HullGrid::new(repr.width, repr.height);
        let mut tiles = BTreeSet::new();
        for tile in repr.tiles {
            if !grid.in_bounds(tile) {
                return Err(format!(
                    "hull tile ({}, {}) outside {}x{} grid",
                    tile.x, tile.y, repr.width, repr.height
                ));
            }
            tiles.insert(tile);
        }
        grid.tiles = Arc::new(tiles);
        Ok(grid)
    }
}

impl From<HullGrid> for HullGridRepr {
    fn from(grid: HullGrid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            tiles: grid.tiles().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tile_is_copy_on_write() {
        let empty = HullGrid::new(4, 3);
        let one = empty.with_tile(GridCoord::new(1, 1));

        assert!(empty.is_empty());
        assert!(one.is_occupied(GridCoord::new(1, 1)));
        assert_eq!(one.tile_count(), 1);
        assert!(!empty.shares_storage_with(&one));
    }

    #[test]
    fn test_unchanged_updates_share_storage() {
        let grid = HullGrid::new(4, 3).with_tile(GridCoord::new(0, 0));

        let again = grid.with_tile(GridCoord::new(0, 0));
        assert!(grid.shares_storage_with(&again));

        let outside = grid.with_tile(GridCoord::new(4, 0));
        assert!(grid.shares_storage_with(&outside));
        assert_eq!(outside.tile_count(), 1);

        let not_there = grid.without_tile(GridCoord::new(2, 2));
        assert!(grid.shares_storage_with(&not_there));
    }

    #[test]
    fn test_without_tile() {
        let grid = HullGrid::new(4, 3)
            .with_tile(GridCoord::new(0, 0))
            .with_tile(GridCoord::new(3, 2));
        let erased = grid.without_tile(GridCoord::new(0, 0));

        assert_eq!(grid.tile_count(), 2);
        assert_eq!(erased.tiles().collect::<Vec<_>>(), vec![GridCoord::new(3, 2)]);
    }

    #[test]
    fn test_deserialize_rejects_out_of_bounds_tiles() {
        let ok = r#"{"width":2,"height":2,"tiles":[{"x":1,"y":1}]}"#;
        let grid: HullGrid = serde_json::from_str(ok).unwrap();
        assert!(grid.is_occupied(GridCoord::new(1, 1)));

        let bad = r#"{"width":2,"height":2,"tiles":[{"x":2,"y":0}]}"#;
        assert!(serde_json::from_str::<HullGrid>(bad).is_err());
    }
}
