// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unicode rendering of a sketch viewport.
//!
//! The renderer projects world coordinates through the camera onto a
//! character-cell canvas. Unlike a pixel surface, terminal cells are roughly
//! twice as tall as they are wide, so projected y coordinates are divided by
//! [`CELL_ASPECT`]. Everything off the canvas is clipped silently: panning a
//! diagram out of view must never be an error.

use std::fmt;

use crate::editor::Camera;
use crate::model::{NodeId, Point, Rect, Shape, Sketch, Stroke, StrokeTool};
use crate::ops::Selection;

/// Height of a terminal cell in units of its width.
pub const CELL_ASPECT: f64 = 2.0;

const GLYPH_MATERIAL: char = '●';
const GLYPH_ACTIVITY: char = '▲';
const GLYPH_INK: char = '•';
const GLYPH_HANDLE: char = '◆';

/// Per-cell color class. The TUI maps tints onto its theme; the plain-text
/// renderer ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Plain,
    /// Connection lines and their labels.
    Wire,
    /// Node glyphs and node labels.
    Node,
    /// Freehand pen strokes.
    Ink,
    /// Selected or pending-source objects.
    Accent,
    /// Selection frames and the box-select marquee.
    Frame,
}

/// A fixed-size character grid with per-cell tints.
///
/// Writes clip at the edges instead of failing, and signed coordinates are
/// accepted so callers can draw partially visible objects without pre-
/// clipping. Crossing `─` and `│` cells merge into `┼` rather than
/// overwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    tints: Vec<Tint>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width.saturating_mul(height);
        Self {
            width,
            height,
            cells: vec![' '; len],
            tints: vec![Tint::Plain; len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Tint)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        Some((self.cells[idx], self.tints[idx]))
    }

    /// Writes one character, clipping when out of bounds.
    pub fn set(&mut self, x: isize, y: isize, ch: char, tint: Tint) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.cells[idx] = merge_cell(self.cells[idx], ch);
        self.tints[idx] = tint;
    }

    pub fn write_str(&mut self, x: isize, y: isize, text: &str, tint: Tint) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as isize, y, ch, tint);
        }
    }

    /// Writes `text` so its middle lands on `(x, y)`.
    pub fn write_centered(&mut self, x: isize, y: isize, text: &str, tint: Tint) {
        let half = (text.chars().count() / 2) as isize;
        self.write_str(x - half, y, text, tint);
    }

    /// Draws a straight line between two cells, picking `─`, `│`, `╱` or `╲`
    /// per step from the dominant direction.
    pub fn draw_segment(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, tint: Tint) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let ch = segment_char(dx, dy, sx, sy);
        for (x, y) in line_cells(x0, y0, x1, y1) {
            self.set(x, y, ch, tint);
        }
    }

    /// Draws a single-line box frame. Degenerate frames collapse to a line
    /// or a point.
    pub fn draw_frame(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, tint: Tint) {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));

        for x in (min_x + 1)..max_x {
            self.set(x, min_y, '─', tint);
            self.set(x, max_y, '─', tint);
        }
        for y in (min_y + 1)..max_y {
            self.set(min_x, y, '│', tint);
            self.set(max_x, y, '│', tint);
        }
        self.set(min_x, min_y, '┌', tint);
        self.set(max_x, min_y, '┐', tint);
        self.set(min_x, max_y, '└', tint);
        self.set(max_x, max_y, '┘', tint);
    }

    /// Dashed frame for the in-progress box selection.
    pub fn draw_marquee(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, tint: Tint) {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));

        for x in min_x..=max_x {
            self.set(x, min_y, '╌', tint);
            self.set(x, max_y, '╌', tint);
        }
        for y in min_y..=max_y {
            self.set(min_x, y, '╎', tint);
            self.set(max_x, y, '╎', tint);
        }
    }

    /// Clears a cell back to background. Used by eraser strokes.
    pub fn erase(&mut self, x: isize, y: isize) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.cells[idx] = ' ';
        self.tints[idx] = Tint::Plain;
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.cells[y * self.width + x])?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

fn merge_cell(old: char, new: char) -> char {
    match (old, new) {
        ('─', '│') | ('│', '─') => '┼',
        (_, new) => new,
    }
}

fn segment_char(dx: isize, dy: isize, sx: isize, sy: isize) -> char {
    if dy == 0 {
        '─'
    } else if dx == 0 {
        '│'
    } else if dx >= dy * 2 {
        '─'
    } else if dy >= dx * 2 {
        '│'
    } else if sx == sy {
        '╲'
    } else {
        '╱'
    }
}

/// Everything the renderer needs to draw one frame of the viewport.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub sketch: &'a Sketch,
    pub selection: &'a Selection,
    pub camera: &'a Camera,
    pub pending_source: Option<&'a NodeId>,
    pub box_selection: Option<Rect>,
    pub selection_frame: Option<Rect>,
    pub active_stroke: Option<&'a Stroke>,
}

/// Renders the visible portion of the sketch onto a fresh canvas.
///
/// Draw order is connections, nodes, freehand strokes, then the selection
/// frame and box-select marquee, so chrome always reads on top.
pub fn render_scene(view: &SceneView<'_>, width: usize, height: usize) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let graph = view.sketch.graph();

    for connection in graph.connections() {
        let (Some(from), Some(to)) = (graph.node(connection.from()), graph.node(connection.to()))
        else {
            continue;
        };
        let (x0, y0) = project(view.camera, from.position());
        let (x1, y1) = project(view.camera, to.position());
        canvas.draw_segment(x0, y0, x1, y1, Tint::Wire);
        if let Some(label) = connection.label() {
            canvas.write_centered((x0 + x1) / 2, (y0 + y1) / 2, label, Tint::Wire);
        }
    }

    for node in graph.nodes() {
        let selected = view.selection.contains_node(node.id())
            || view.pending_source.is_some_and(|id| id == node.id());
        let tint = if selected { Tint::Accent } else { Tint::Node };
        draw_node(&mut canvas, view.camera, node, tint);
    }

    for stroke in view.sketch.strokes() {
        draw_stroke(&mut canvas, view.camera, stroke);
    }
    if let Some(stroke) = view.active_stroke {
        draw_stroke(&mut canvas, view.camera, stroke);
    }

    if let Some(frame) = view.selection_frame {
        let (x0, y0) = project(view.camera, frame.min());
        let (x1, y1) = project(view.camera, frame.max());
        canvas.draw_frame(x0, y0, x1, y1, Tint::Frame);
        for (hx, hy) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            canvas.set(hx, hy, GLYPH_HANDLE, Tint::Frame);
        }
    }

    if let Some(rect) = view.box_selection {
        let (x0, y0) = project(view.camera, rect.min());
        let (x1, y1) = project(view.camera, rect.max());
        canvas.draw_marquee(x0, y0, x1, y1, Tint::Frame);
    }

    canvas
}

fn project(camera: &Camera, world: Point) -> (isize, isize) {
    let screen = camera.to_screen(world);
    (
        screen.x.round() as isize,
        (screen.y / CELL_ASPECT).round() as isize,
    )
}

fn draw_node(canvas: &mut Canvas, camera: &Camera, node: &crate::model::Node, tint: Tint) {
    let (cx, cy) = project(camera, node.position());
    match node.shape() {
        Shape::Circle | Shape::Triangle => {
            let glyph = match node.shape() {
                Shape::Circle => GLYPH_MATERIAL,
                _ => GLYPH_ACTIVITY,
            };
            canvas.set(cx, cy, glyph, tint);
            canvas.write_str(cx + 2, cy, node.label(), tint);
        }
        Shape::Rectangle => {
            let bounds = node.bounds();
            let (x0, y0) = project(camera, bounds.min());
            let (x1, y1) = project(camera, bounds.max());
            canvas.draw_frame(x0, y0, x1, y1, tint);
            canvas.write_centered(cx, cy, node.label(), tint);
        }
    }
}

fn draw_stroke(canvas: &mut Canvas, camera: &Camera, stroke: &Stroke) {
    for pair in stroke.points().windows(2) {
        let (x0, y0) = project(camera, pair[0]);
        let (x1, y1) = project(camera, pair[1]);
        match stroke.tool() {
            StrokeTool::Pen => draw_ink_segment(canvas, x0, y0, x1, y1),
            StrokeTool::Eraser => erase_segment(canvas, x0, y0, x1, y1),
        }
    }
    if stroke.points().len() == 1 {
        let (x, y) = project(camera, stroke.points()[0]);
        match stroke.tool() {
            StrokeTool::Pen => canvas.set(x, y, GLYPH_INK, Tint::Ink),
            StrokeTool::Eraser => canvas.erase(x, y),
        }
    }
}

fn draw_ink_segment(canvas: &mut Canvas, x0: isize, y0: isize, x1: isize, y1: isize) {
    for (x, y) in line_cells(x0, y0, x1, y1) {
        canvas.set(x, y, GLYPH_INK, Tint::Ink);
    }
}

fn erase_segment(canvas: &mut Canvas, x0: isize, y0: isize, x1: isize, y1: isize) {
    for (x, y) in line_cells(x0, y0, x1, y1) {
        canvas.erase(x, y);
    }
}

fn line_cells(x0: isize, y0: isize, x1: isize, y1: isize) -> Vec<(isize, isize)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut cells = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx - dy;
    loop {
        cells.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    cells
}
