// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! World-space geometry primitives shared by hit testing, gestures and layout.

/// A point in world coordinates (free-form canvas units).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle normalized so `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Builds a rectangle from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half_w = width.abs() / 2.0;
        let half_h = height.abs() / 2.0;
        Self {
            min: Point::new(center.x - half_w, center.y - half_h),
            max: Point::new(center.x + half_w, center.y + half_h),
        }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn center(&self) -> Point {
        Point::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn expanded(&self, margin: f64) -> Rect {
        Rect::from_corners(
            Point::new(self.min.x - margin, self.min.y - margin),
            Point::new(self.max.x + margin, self.max.y + margin),
        )
    }
}

/// Distance from `p` to the segment `a..b`, clamping the projection to the
/// segment endpoints so edge hit tests do not extend past node centers.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let seg_x = b.x - a.x;
    let seg_y = b.y - a.y;
    let len_sq = seg_x * seg_x + seg_y * seg_y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }

    let t = (((p.x - a.x) * seg_x + (p.y - a.y) * seg_y) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * seg_x, a.y + t * seg_y);
    p.distance_to(closest)
}
