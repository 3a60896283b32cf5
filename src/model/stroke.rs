// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geom::Point;
use super::ids::StrokeId;

/// Which freehand tool produced a stroke. Eraser strokes paint in the canvas
/// background color; they are ordinary strokes for history and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTool {
    Pen,
    Eraser,
}

impl StrokeTool {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
        }
    }
}

/// One continuous freehand gesture: an ordered, append-only point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    tool: StrokeTool,
    color: String,
    width: f64,
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(id: StrokeId, tool: StrokeTool, color: impl Into<String>, width: f64) -> Self {
        Self {
            id,
            tool,
            color: color.into(),
            width,
            points: Vec::new(),
        }
    }

    pub fn id(&self) -> &StrokeId {
        &self.id
    }

    pub fn tool(&self) -> StrokeTool {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn push_point(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    /// The point that stands in for the whole stroke during box selection.
    pub fn representative_point(&self) -> Option<Point> {
        self.points.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Stroke, StrokeTool};
    use crate::model::geom::Point;
    use crate::model::ids::StrokeId;

    #[test]
    fn stroke_appends_points_in_order() {
        let mut stroke = Stroke::new(StrokeId::from_counter(1), StrokeTool::Pen, "#222222", 2.0);
        assert_eq!(stroke.representative_point(), None);

        stroke.push_point(Point::new(1.0, 2.0));
        stroke.push_point(Point::new(3.0, 4.0));

        assert_eq!(stroke.points().len(), 2);
        assert_eq!(stroke.representative_point(), Some(Point::new(1.0, 2.0)));
    }
}
