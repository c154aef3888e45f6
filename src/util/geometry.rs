// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the world-space primitives used by the editor and
//! the grid math that maps pixel positions onto grid cells, edges and
//! vertices.

use crate::models::door::{CellEdge, Door};
use crate::models::hull::GridCoord;
use earcutr::earcut;
use serde::{Deserialize, Serialize};

/// A 2D point in world (design) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point moved by the given offset.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Check if another rectangle lies completely inside this one.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Check if two rectangles share interior area. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Grid dimensions and block size, the basis of all snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Side length of one grid block in pixels.
    pub block_size: f64,
    /// Number of blocks across.
    pub width: u32,
    /// Number of blocks down.
    pub height: u32,
}

impl GridSpec {
    pub fn new(block_size: f64, width: u32, height: u32) -> Self {
        Self {
            block_size,
            width,
            height,
        }
    }

    pub fn width_px(&self) -> f64 {
        f64::from(self.width) * self.block_size
    }

    pub fn height_px(&self) -> f64 {
        f64::from(self.height) * self.block_size
    }

    /// The whole grid area in world pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width_px(), self.height_px())
    }

    /// Snap down to the corner of the block containing `p`.
    pub fn snap_floor(&self, p: Point) -> Point {
        Point::new(
            (p.x / self.block_size).floor() * self.block_size,
            (p.y / self.block_size).floor() * self.block_size,
        )
    }

    /// Snap to the nearest block multiple (nearest grid vertex).
    pub fn snap_round(&self, p: Point) -> Point {
        Point::new(
            (p.x / self.block_size).round() * self.block_size,
            (p.y / self.block_size).round() * self.block_size,
        )
    }

    /// Grid cell containing `p`, or `None` outside the grid.
    pub fn to_grid_coords(&self, p: Point) -> Option<GridCoord> {
        if !self.contains(p) {
            return None;
        }
        // The far edges belong to the last row/column.
        let x = ((p.x / self.block_size).floor() as u32).min(self.width.saturating_sub(1));
        let y = ((p.y / self.block_size).floor() as u32).min(self.height.saturating_sub(1));
        Some(GridCoord::new(x, y))
    }

    /// Top-left corner of a cell in pixels.
    pub fn cell_origin(&self, coord: GridCoord) -> Point {
        Point::new(
            f64::from(coord.x) * self.block_size,
            f64::from(coord.y) * self.block_size,
        )
    }

    pub fn cell_rect(&self, coord: GridCoord) -> Rect {
        Rect::from_origin(self.cell_origin(coord), self.block_size, self.block_size)
    }

    /// Whether `p` is within the grid area (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Whether a rectangle lies completely within the grid area.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        self.bounds().contains_rect(rect)
    }

    /// Find the door slot nearest to `p`: the closest edge of the cell under it.
    pub fn door_at(&self, p: Point) -> Option<Door> {
        let cell = self.to_grid_coords(p)?;
        let origin = self.cell_origin(cell);
        let x_diff = p.x - origin.x;
        let y_diff = p.y - origin.y;

        // Ties resolve in this order.
        let candidates = [
            (CellEdge::Left, x_diff),
            (CellEdge::Right, self.block_size - x_diff),
            (CellEdge::Top, y_diff),
            (CellEdge::Bottom, self.block_size - y_diff),
        ];
        let mut nearest = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < nearest.1 {
                nearest = *candidate;
            }
        }

        Some(Door::on_cell_edge(cell, nearest.0))
    }

    /// The two leaf rectangles of a door, centred on its edge midpoint.
    pub fn door_leaves(&self, door: Door, door_width: f64, door_height: f64) -> [Rect; 2] {
        let half_width = door_width / 2.0;
        let half_height = door_height / 2.0;
        let b = self.block_size;
        match door {
            Door::Vertical { x, y } => {
                let line_x = f64::from(x) * b;
                let mid_y = f64::from(y) * b + b / 2.0;
                [
                    Rect::new(line_x - half_width, mid_y - half_height, door_width, half_height),
                    Rect::new(line_x - half_width, mid_y, door_width, half_height),
                ]
            }
            Door::Horizontal { x, y } => {
                let line_y = f64::from(y) * b;
                let mid_x = f64::from(x) * b + b / 2.0;
                [
                    Rect::new(mid_x - half_height, line_y - half_width, half_height, door_width),
                    Rect::new(mid_x, line_y - half_width, half_height, door_width),
                ]
            }
        }
    }
}

/// Split a simple polygon (possibly concave) into triangles.
///
/// Returns index triples into `points`; empty for fewer than three points
/// or a degenerate outline.
pub fn triangulate(points: &[Point]) -> Vec<[usize; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    // Flattened [x0, y0, x1, y1, ...]
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcut(&flat, &[], 2).unwrap_or_default();
    indices
        .chunks_exact(3)
        .filter(|t| t.iter().all(|&i| i < points.len()))
        .map(|t| [t[0], t[1], t[2]])
        .collect()
}
