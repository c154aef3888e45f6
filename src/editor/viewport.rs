// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas pan and zoom.
//!
//! Screen coordinates are canvas-local pixels; world coordinates are design
//! pixels. `screen = world * scale + offset`.

use crate::util::geometry::{Point, Rect};

/// Zoom direction of one scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling down zooms out.
    pub fn from_scroll(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else {
            None
        }
    }
}

/// Screen/world transform of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f64,
}

impl Viewport {
    pub fn new(scale: f64) -> Self {
        Self {
            offset: Point::default(),
            scale,
        }
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    #[cfg(test)]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Convert a screen-space distance to world space.
    pub fn screen_dist_to_world(&self, dist: f64) -> f64 {
        dist / self.scale
    }

    /// Zoom by one step keeping the world point under `pointer` fixed.
    pub fn zoom_at(&mut self, pointer: Point, direction: ZoomDirection, step: f64) {
        let anchor = self.screen_to_world(pointer);
        self.scale = match direction {
            ZoomDirection::In => self.scale * step,
            ZoomDirection::Out => self.scale / step,
        };
        self.offset = Point::new(
            pointer.x - anchor.x * self.scale,
            pointer.y - anchor.y * self.scale,
        );
    }

    /// Move the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset = self.offset.translate(dx, dy);
    }

    /// Back to the origin at the given scale.
    pub fn reset(&mut self, scale: f64) {
        self.offset = Point::default();
        self.scale = scale;
    }

    /// Scale and centre `bounds` inside a screen area of the given size.
    pub fn fit(&mut self, bounds: &Rect, screen_width: f64, screen_height: f64, margin: f64) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let usable_w = (screen_width - 2.0 * margin).max(1.0);
        let usable_h = (screen_height - 2.0 * margin).max(1.0);
        self.scale = (usable_w / bounds.width).min(usable_h / bounds.height);
        self.offset = Point::new(
            (screen_width - bounds.width * self.scale) / 2.0 - bounds.x * self.scale,
            (screen_height - bounds.height * self.scale) / 2.0 - bounds.y * self.scale,
        );
    }
}
