// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// World-to-screen transform: `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset_x,
            world.y * self.scale + self.offset_y,
        )
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Zooms by `factor` anchored at `screen_anchor`: the world point under
    /// the anchor stays under it. The scale clamps to [MIN_ZOOM, MAX_ZOOM].
    pub fn zoom_at(&mut self, screen_anchor: Point, factor: f64) {
        let anchor_world = self.to_world(screen_anchor);
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset_x = screen_anchor.x - anchor_world.x * self.scale;
        self.offset_y = screen_anchor.y - anchor_world.y * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::{Camera, MAX_ZOOM, MIN_ZOOM};
    use crate::model::Point;

    #[test]
    fn screen_world_round_trip() {
        let mut camera = Camera::default();
        camera.pan(13.0, -7.0);
        camera.zoom_at(Point::new(0.0, 0.0), 2.0);

        let world = Point::new(123.0, 45.0);
        let back = camera.to_world(camera.to_screen(world));
        assert!(world.distance_to(back) < 1e-9);
    }

    #[test]
    fn zoom_is_anchored_at_the_pointer() {
        let mut camera = Camera::default();
        let anchor = Point::new(80.0, 40.0);
        let world_before = camera.to_world(anchor);

        camera.zoom_at(anchor, 1.5);
        let world_after = camera.to_world(anchor);

        assert!(world_before.distance_to(world_after) < 1e-9);
    }

    #[test]
    fn zoom_clamps_to_range() {
        let mut camera = Camera::default();
        for _ in 0..64 {
            camera.zoom_at(Point::new(0.0, 0.0), 2.0);
        }
        assert_eq!(camera.scale(), MAX_ZOOM);

        for _ in 0..64 {
            camera.zoom_at(Point::new(0.0, 0.0), 0.5);
        }
        assert_eq!(camera.scale(), MIN_ZOOM);
    }
}
