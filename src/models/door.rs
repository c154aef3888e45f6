// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Doors placed on grid edges.

use super::hull::GridCoord;
use serde::{Deserialize, Serialize};

/// One of the four edges of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// A door sitting on a grid edge.
///
/// Edges shared by two cells have a single representation, so a door placed
/// on the right edge of one cell equals a door on the left edge of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "orientation", rename_all = "lowercase")]
pub enum Door {
    /// On vertical grid line `x`, spanning row `y`.
    Vertical { x: u32, y: u32 },
    /// On horizontal grid line `y`, spanning column `x`.
    Horizontal { x: u32, y: u32 },
}

impl Door {
    /// Door on the given edge of a cell.
    pub fn on_cell_edge(cell: GridCoord, edge: CellEdge) -> Self {
        match edge {
            CellEdge::Left => Door::Vertical { x: cell.x, y: cell.y },
            CellEdge::Right => Door::Vertical {
                x: cell.x + 1,
                y: cell.y,
            },
            CellEdge::Top => Door::Horizontal { x: cell.x, y: cell.y },
            CellEdge::Bottom => Door::Horizontal {
                x: cell.x,
                y: cell.y + 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_edges_normalize() {
        let left = Door::on_cell_edge(GridCoord::new(3, 2), CellEdge::Left);
        let right = Door::on_cell_edge(GridCoord::new(2, 2), CellEdge::Right);
        assert_eq!(left, right);

        let top = Door::on_cell_edge(GridCoord::new(4, 5), CellEdge::Top);
        let bottom = Door::on_cell_edge(GridCoord::new(4, 4), CellEdge::Bottom);
        assert_eq!(top, bottom);
        assert_ne!(left, top);
    }

    #[test]
    fn test_door_json_shape() {
        let json = serde_json::to_string(&Door::Horizontal { x: 1, y: 2 }).unwrap();
        assert_eq!(json, r#"{"orientation":"horizontal","x":1,"y":2}"#);
    }
}
