// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editor facade: one diagram per instance, owning the sketch, the undo
//! history, the transient selection/clipboard/camera, and the tool state
//! machine that interprets pointer input.
//!
//! Gesture protocol: pointer-down captures starting offsets and the
//! pre-gesture sketch, pointer-move applies live deltas without touching
//! history, pointer-up commits exactly one history snapshot for the whole
//! gesture. Escape discards the in-flight gesture and restores the
//! pre-gesture state.

use std::time::{Duration, Instant};

use crate::generate::{self, BuildReport, GenerateError};
use crate::history::History;
use crate::model::{NodeId, NodeKind, Point, Rect, Sketch, Stroke, StrokeTool};
use crate::ops::{self, Clipboard, Selection};

pub mod camera;

pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};

const STATUS_TTL: Duration = Duration::from_secs(3);
const PASTE_OFFSET: f64 = 40.0;
const PEN_COLOR: &str = "#222222";
const PEN_WIDTH: f64 = 2.0;
const ERASER_COLOR: &str = "#ffffff";
const ERASER_WIDTH: f64 = 16.0;
const MIN_RESIZE_SCALE: f64 = 0.05;
/// Screen-constant grab radius for resize handles, in world units at 1x.
const HANDLE_RADIUS: f64 = 12.0;
/// Below this world-space travel a box-select press counts as a deselect
/// click, not a selection rectangle.
const CLICK_SLOP: f64 = 2.0;

/// The current interpretation context for pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Connect,
    Pan,
    Delete,
    Pen,
    Eraser,
}

impl Tool {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Connect => "connect",
            Self::Pan => "pan",
            Self::Delete => "delete",
            Self::Pen => "pen",
            Self::Eraser => "eraser",
        }
    }

    pub fn default_hint(self) -> &'static str {
        match self {
            Self::Select => "select: click or drag a box; drag nodes to move",
            Self::Connect => "connect: click a source node, then a target",
            Self::Pan => "pan: drag to move the canvas",
            Self::Delete => "delete: click a node or connection",
            Self::Pen => "pen: drag to draw",
            Self::Eraser => "eraser: drag to erase",
        }
    }
}

/// Which corner of the selection frame a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResizeHandle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl ResizeHandle {
    const ALL: [ResizeHandle; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    fn corner(self, bounds: &Rect) -> Point {
        match self {
            Self::NorthWest => bounds.min(),
            Self::NorthEast => Point::new(bounds.max().x, bounds.min().y),
            Self::SouthWest => Point::new(bounds.min().x, bounds.max().y),
            Self::SouthEast => bounds.max(),
        }
    }

    fn anchor(self, bounds: &Rect) -> Point {
        match self {
            Self::NorthWest => bounds.max(),
            Self::NorthEast => Point::new(bounds.min().x, bounds.max().y),
            Self::SouthWest => Point::new(bounds.max().x, bounds.min().y),
            Self::SouthEast => bounds.min(),
        }
    }
}

/// Pre-gesture geometry for one node in a resize, so every move is
/// computed from the original layout rather than accumulated deltas.
#[derive(Debug, Clone)]
struct ResizeOrigin {
    id: NodeId,
    position: Point,
    text_box_extent: Option<(f64, f64)>,
}

#[derive(Debug)]
enum Gesture {
    Idle,
    DraggingNodes {
        before: Box<Sketch>,
        start: Point,
        node_origins: Vec<(NodeId, Point)>,
        stroke_origins: Vec<(crate::model::StrokeId, Vec<Point>)>,
        moved: bool,
    },
    BoxSelecting {
        start: Point,
        current: Point,
    },
    Resizing {
        before: Box<Sketch>,
        anchor: Point,
        start_corner: Point,
        node_origins: Vec<ResizeOrigin>,
    },
    Panning {
        last_screen: Point,
    },
    Drawing {
        before: Box<Sketch>,
        stroke: Stroke,
    },
}

#[derive(Debug, Clone)]
struct StatusToast {
    message: String,
    expires_at: Instant,
}

/// The process-wide editor instance (one diagram per run).
#[derive(Debug)]
pub struct Editor {
    sketch: Sketch,
    history: History,
    selection: Selection,
    clipboard: Clipboard,
    camera: Camera,
    tool: Tool,
    pan_override: bool,
    gesture: Gesture,
    pending_source: Option<NodeId>,
    toast: Option<StatusToast>,
    needs_redraw: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        let sketch = Sketch::new();
        let history = History::new(&sketch);
        Self {
            sketch,
            history,
            selection: Selection::default(),
            clipboard: Clipboard::default(),
            camera: Camera::default(),
            tool: Tool::Select,
            pan_override: false,
            gesture: Gesture::Idle,
            pending_source: None,
            toast: None,
            needs_redraw: true,
        }
    }

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn pan_override(&self) -> bool {
        self.pan_override
    }

    pub fn pending_source(&self) -> Option<&NodeId> {
        self.pending_source.as_ref()
    }

    /// The in-progress box-select rectangle, for rendering.
    pub fn box_selection_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::BoxSelecting { start, current } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }

    /// The stroke being drawn right now, not yet part of the sketch.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match &self.gesture {
            Gesture::Drawing { stroke, .. } => Some(stroke),
            _ => None,
        }
    }

    /// Redraw coalescing: any number of mutations set the flag once; the UI
    /// takes it at most once per frame.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.toast = Some(StatusToast {
            message: message.into(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.mark_dirty();
    }

    /// The footer text: a live toast if one has not expired, otherwise the
    /// current tool's hint.
    pub fn status_line(&mut self, now: Instant) -> String {
        if let Some(toast) = &self.toast {
            if now < toast.expires_at {
                return toast.message.clone();
            }
            self.toast = None;
            self.mark_dirty();
        }
        let mut line = self.tool.default_hint().to_owned();
        if self.pan_override {
            line = format!("[pan] {line}");
        }
        line
    }

    // ----- tool transitions -------------------------------------------------

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        self.abort_gesture();
        // Switching away from connect always clears the pending source, and
        // any tool change drops the transient selection.
        self.pending_source = None;
        self.selection.clear();
        self.tool = tool;
        self.set_status(format!("tool: {}", tool.display_name()));
    }

    /// Spacebar override: pan regardless of the active tool.
    pub fn set_pan_override(&mut self, active: bool) {
        if self.pan_override == active {
            return;
        }
        self.pan_override = active;
        if !active {
            if let Gesture::Panning { .. } = self.gesture {
                self.gesture = Gesture::Idle;
            }
        }
        self.mark_dirty();
    }

    /// Escape: deterministically resolve any in-flight gesture back to idle,
    /// restoring the pre-gesture state, and drop a pending connect source.
    pub fn escape(&mut self) {
        self.abort_gesture();
        if self.pending_source.take().is_some() {
            self.set_status("connection cancelled");
        }
        self.mark_dirty();
    }

    fn abort_gesture(&mut self) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::DraggingNodes { before, moved, .. } => {
                if moved {
                    self.sketch = *before;
                }
            }
            Gesture::Resizing { before, .. } => {
                self.sketch = *before;
            }
            Gesture::Idle
            | Gesture::BoxSelecting { .. }
            | Gesture::Panning { .. }
            | Gesture::Drawing { .. } => {}
        }
        self.mark_dirty();
    }

    fn effective_tool(&self) -> Tool {
        if self.pan_override {
            Tool::Pan
        } else {
            self.tool
        }
    }

    // ----- pointer input ----------------------------------------------------

    pub fn pointer_down(&mut self, screen: Point) {
        let world = self.camera.to_world(screen);
        match self.effective_tool() {
            Tool::Pan => {
                self.gesture = Gesture::Panning {
                    last_screen: screen,
                };
            }
            Tool::Select => self.select_down(world),
            Tool::Connect => self.connect_click(world),
            Tool::Delete => self.delete_click(world),
            Tool::Pen => self.begin_stroke(world, StrokeTool::Pen),
            Tool::Eraser => self.begin_stroke(world, StrokeTool::Eraser),
        }
        self.mark_dirty();
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let world = self.camera.to_world(screen);
        match &mut self.gesture {
            Gesture::Idle => return,
            Gesture::Panning { last_screen } => {
                let dx = screen.x - last_screen.x;
                let dy = screen.y - last_screen.y;
                *last_screen = screen;
                self.camera.pan(dx, dy);
            }
            Gesture::DraggingNodes {
                start,
                node_origins,
                stroke_origins,
                moved,
                ..
            } => {
                let dx = world.x - start.x;
                let dy = world.y - start.y;
                *moved = true;
                let node_origins = node_origins.clone();
                let stroke_origins = stroke_origins.clone();
                for (id, origin) in &node_origins {
                    if let Some(node) = self.sketch.graph_mut().node_mut(id) {
                        node.set_position(origin.offset(dx, dy));
                    }
                }
                for (id, origins) in &stroke_origins {
                    if let Some(stroke) = self.sketch.stroke_mut(id) {
                        stroke.set_points(origins.iter().map(|p| p.offset(dx, dy)).collect());
                    }
                }
            }
            Gesture::BoxSelecting { current, .. } => {
                *current = world;
            }
            Gesture::Resizing {
                anchor,
                start_corner,
                node_origins,
                ..
            } => {
                let anchor = *anchor;
                let sx = scale_factor(anchor.x, start_corner.x, world.x);
                let sy = scale_factor(anchor.y, start_corner.y, world.y);
                let node_origins = node_origins.clone();
                for origin in &node_origins {
                    if let Some(node) = self.sketch.graph_mut().node_mut(&origin.id) {
                        node.set_position(Point::new(
                            anchor.x + (origin.position.x - anchor.x) * sx,
                            anchor.y + (origin.position.y - anchor.y) * sy,
                        ));
                        if let Some((width, height)) = origin.text_box_extent {
                            node.set_text_box_extent(width * sx.abs(), height * sy.abs());
                        }
                    }
                }
            }
            Gesture::Drawing { stroke, .. } => {
                stroke.push_point(world);
            }
        }
        self.mark_dirty();
    }

    pub fn pointer_up(&mut self, screen: Point) {
        let world = self.camera.to_world(screen);
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::DraggingNodes { before, moved, .. } => {
                // One history step for the whole drag, none for a plain click.
                if moved {
                    self.history.save(&before);
                }
            }
            Gesture::BoxSelecting { start, .. } => {
                self.finish_box_select(start, world);
            }
            Gesture::Resizing { before, .. } => {
                self.history.save(&before);
            }
            Gesture::Drawing { before, mut stroke } => {
                stroke.push_point(world);
                if stroke.points().len() >= 2 {
                    self.history.save(&before);
                    self.sketch.push_stroke(stroke);
                }
            }
        }
        self.mark_dirty();
    }

    fn select_down(&mut self, world: Point) {
        if let (Some(handle), Some(bounds)) = (self.handle_at(world), self.selection_bounds()) {
            let node_origins = self
                .selection
                .nodes()
                .iter()
                .filter_map(|id| {
                    self.sketch.graph().node(id).map(|n| ResizeOrigin {
                        id: id.clone(),
                        position: n.position(),
                        text_box_extent: match n.kind() {
                            NodeKind::TextBox { width, height, .. } => Some((*width, *height)),
                            _ => None,
                        },
                    })
                })
                .collect();
            self.gesture = Gesture::Resizing {
                before: Box::new(self.sketch.clone()),
                anchor: handle.anchor(&bounds),
                start_corner: handle.corner(&bounds),
                node_origins,
            };
            return;
        }

        if let Some(node) = self.sketch.graph().find_node_at(world) {
            let id = node.id().clone();
            if !self.selection.contains_node(&id) {
                self.selection = Selection::single_node(id);
            }
            let node_origins = self
                .selection
                .nodes()
                .iter()
                .filter_map(|id| {
                    self.sketch
                        .graph()
                        .node(id)
                        .map(|n| (id.clone(), n.position()))
                })
                .collect();
            let stroke_origins = self
                .selection
                .strokes()
                .iter()
                .filter_map(|id| {
                    self.sketch
                        .stroke(id)
                        .map(|s| (id.clone(), s.points().to_vec()))
                })
                .collect();
            self.gesture = Gesture::DraggingNodes {
                before: Box::new(self.sketch.clone()),
                start: world,
                node_origins,
                stroke_origins,
                moved: false,
            };
            return;
        }

        self.gesture = Gesture::BoxSelecting {
            start: world,
            current: world,
        };
    }

    fn finish_box_select(&mut self, start: Point, end: Point) {
        let rect = Rect::from_corners(start, end);
        if rect.width() < CLICK_SLOP && rect.height() < CLICK_SLOP {
            self.selection.clear();
            return;
        }

        let mut selection = Selection::default();
        for node in self.sketch.graph().nodes() {
            if rect.contains(node.position()) {
                selection.insert_node(node.id().clone());
            }
        }
        for stroke in self.sketch.strokes() {
            if stroke.representative_point().is_some_and(|p| rect.contains(p)) {
                selection.insert_stroke(stroke.id().clone());
            }
        }
        let count = selection.len();
        self.selection = selection;
        if count > 0 {
            self.set_status(format!("selected {count} object(s)"));
        }
    }

    fn connect_click(&mut self, world: Point) {
        let Some(node) = self.sketch.graph().find_node_at(world) else {
            return;
        };
        let id = node.id().clone();

        match self.pending_source.take() {
            None => {
                self.pending_source = Some(id.clone());
                self.set_status(format!("connect {}: choose a target", node_label(self, &id)));
            }
            Some(source) if source == id => {
                // Clicking the pending source again is a deselect.
                self.set_status("connection cancelled");
            }
            Some(source) => {
                let before = self.sketch.clone();
                match ops::connect(self.sketch.graph_mut(), &source, &id) {
                    Ok(()) => {
                        self.history.save(&before);
                        self.set_status(format!(
                            "connected {} -> {}",
                            node_label(self, &source),
                            node_label(self, &id)
                        ));
                    }
                    Err(err) => {
                        self.set_status(err.to_string());
                    }
                }
            }
        }
    }

    fn delete_click(&mut self, world: Point) {
        if let Some(node) = self.sketch.graph().find_node_at(world) {
            let id = node.id().clone();
            let label = node.label().to_owned();
            let before = self.sketch.clone();
            self.sketch.graph_mut().delete_node(&id);
            self.history.save(&before);
            self.set_status(format!("deleted {label}"));
            return;
        }
        if let Some(connection) = self.sketch.graph().find_connection_at(world) {
            let (from, to) = (connection.from().clone(), connection.to().clone());
            let before = self.sketch.clone();
            self.sketch.graph_mut().remove_connection(&from, &to);
            self.history.save(&before);
            self.set_status("deleted connection");
        }
    }

    fn begin_stroke(&mut self, world: Point, tool: StrokeTool) {
        let (color, width) = match tool {
            StrokeTool::Pen => (PEN_COLOR, PEN_WIDTH),
            StrokeTool::Eraser => (ERASER_COLOR, ERASER_WIDTH),
        };
        let before = Box::new(self.sketch.clone());
        let id = self.sketch.next_stroke_id();
        let mut stroke = Stroke::new(id, tool, color, width);
        stroke.push_point(world);
        self.gesture = Gesture::Drawing { before, stroke };
    }

    fn handle_at(&self, world: Point) -> Option<ResizeHandle> {
        // Resize frames only appear around multi-selections.
        if self.selection.nodes().len() < 2 {
            return None;
        }
        let bounds = self.selection_bounds()?;
        let radius = HANDLE_RADIUS / self.camera.scale();
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| handle.corner(&bounds).distance_to(world) <= radius)
    }

    /// World-space frame around the selected nodes.
    pub fn selection_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for id in self.selection.nodes() {
            let node = self.sketch.graph().node(id)?;
            let node_bounds = node.bounds();
            bounds = Some(match bounds {
                Some(b) => b.union(&node_bounds),
                None => node_bounds,
            });
        }
        bounds
    }

    // ----- zoom -------------------------------------------------------------

    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        self.camera.zoom_at(screen, factor);
        self.mark_dirty();
    }

    pub fn pan_camera(&mut self, dx: f64, dy: f64) {
        self.camera.pan(dx, dy);
        self.mark_dirty();
    }

    // ----- edit operations --------------------------------------------------

    pub fn add_node(&mut self, kind: NodeKind, world: Point) -> NodeId {
        let before = self.sketch.clone();
        let id = ops::add_node(&mut self.sketch, &mut self.selection, kind, world);
        self.history.save(&before);
        let label = node_label(self, &id);
        self.set_status(format!("added {label}"));
        id
    }

    pub fn delete_selection(&mut self) {
        if self.selection.is_empty() {
            self.set_status("nothing selected to delete");
            return;
        }
        let before = self.sketch.clone();
        let removed = ops::delete_selection(&mut self.sketch, &self.selection);
        self.selection.clear();
        if removed == 0 {
            self.set_status("nothing selected to delete");
            return;
        }
        self.history.save(&before);
        self.set_status(format!("deleted {removed} object(s)"));
    }

    pub fn rename_selection(&mut self, label: impl Into<String>) {
        let mut node_ids = self.selection.nodes().iter();
        let (Some(id), None) = (node_ids.next(), node_ids.next()) else {
            self.set_status("select exactly one node to rename");
            return;
        };
        let id = id.clone();
        let before = self.sketch.clone();
        let Some(node) = self.sketch.graph_mut().node_mut(&id) else {
            return;
        };
        node.set_label(label);
        self.history.save(&before);
        self.set_status("renamed node");
    }

    pub fn copy_selection(&mut self) {
        if self.selection.nodes().is_empty() {
            self.set_status("nothing selected to copy");
            return;
        }
        self.clipboard = ops::copy_selection(&self.sketch, &self.selection);
        self.set_status(format!("copied {} node(s)", self.clipboard.node_count()));
    }

    pub fn cut_selection(&mut self) {
        if self.selection.nodes().is_empty() {
            self.set_status("nothing selected to cut");
            return;
        }
        self.clipboard = ops::copy_selection(&self.sketch, &self.selection);
        let before = self.sketch.clone();
        ops::delete_selection(&mut self.sketch, &self.selection);
        self.selection.clear();
        self.history.save(&before);
        self.set_status(format!("cut {} node(s)", self.clipboard.node_count()));
    }

    pub fn paste_clipboard(&mut self) {
        if self.clipboard.is_empty() {
            self.set_status("clipboard is empty");
            return;
        }
        let before = self.sketch.clone();
        let clipboard = self.clipboard.clone();
        let pasted = ops::paste(
            &mut self.sketch,
            &clipboard,
            Point::new(PASTE_OFFSET, PASTE_OFFSET),
        );
        self.history.save(&before);
        let mut selection = Selection::default();
        for id in &pasted {
            selection.insert_node(id.clone());
        }
        self.selection = selection;
        self.set_status(format!("pasted {} node(s)", pasted.len()));
        self.mark_dirty();
    }

    pub fn undo(&mut self) {
        self.abort_gesture();
        match self.history.undo() {
            Some(previous) => {
                self.sketch = previous;
                self.selection.clear();
                self.pending_source = None;
                self.set_status("undid last change");
            }
            None => self.set_status("nothing to undo"),
        }
    }

    /// Generates a diagram from a free-text description, replacing the
    /// current diagram. A failed generation rolls back through the history
    /// snapshot taken before the clear, leaving the sketch untouched.
    pub fn generate_from_description(&mut self, text: &str) -> Result<BuildReport, GenerateError> {
        let before = self.sketch.clone();
        self.history.save(&before);
        self.sketch.clear_diagram();
        self.selection.clear();
        self.pending_source = None;

        match generate::build_from_description(self.sketch.graph_mut(), text) {
            Ok(report) => {
                let mut message = format!(
                    "generated {} node(s), {} connection(s)",
                    report.nodes_added, report.edges_added
                );
                if !report.warnings.is_empty() {
                    message.push_str(&format!(" ({} warning(s))", report.warnings.len()));
                }
                self.set_status(message);
                Ok(report)
            }
            Err(err) => {
                if let Some(previous) = self.history.undo() {
                    self.sketch = previous;
                }
                self.set_status(err.to_string());
                Err(err)
            }
        }
    }

    /// Replaces the document wholesale (file load): fresh history baseline,
    /// cleared selection and camera. The caller keeps its old sketch when
    /// loading fails, because this is only invoked with a parsed result.
    pub fn replace_sketch(&mut self, sketch: Sketch) {
        self.sketch = sketch;
        self.history = History::new(&self.sketch);
        self.selection.clear();
        self.pending_source = None;
        self.gesture = Gesture::Idle;
        self.camera = Camera::default();
        self.mark_dirty();
    }
}

fn node_label(editor: &Editor, id: &NodeId) -> String {
    editor
        .sketch
        .graph()
        .node(id)
        .map(|n| n.label().to_owned())
        .unwrap_or_else(|| id.to_string())
}

/// Per-axis proportional scale: how far the pointer moved from the anchor
/// relative to the grabbed corner's starting distance.
fn scale_factor(anchor: f64, start_corner: f64, pointer: f64) -> f64 {
    let original = start_corner - anchor;
    if original.abs() < f64::EPSILON {
        return 1.0;
    }
    let factor = (pointer - anchor) / original;
    factor.max(MIN_RESIZE_SCALE)
}
