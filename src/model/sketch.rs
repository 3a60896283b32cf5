// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::Graph;
use super::ids::StrokeId;
use super::stroke::Stroke;

/// The full undoable document state: the graph plus the freehand stroke
/// layer. This is the snapshot unit for the history manager and the shape the
/// store serializes. Selection and camera are transient editor state and live
/// outside of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sketch {
    graph: Graph,
    strokes: Vec<Stroke>,
    stroke_counter: u64,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn strokes_mut(&mut self) -> &mut [Stroke] {
        &mut self.strokes
    }

    pub fn stroke(&self, id: &StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn stroke_mut(&mut self, id: &StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    /// Reserves the next counter-derived stroke id.
    pub fn next_stroke_id(&mut self) -> StrokeId {
        self.stroke_counter += 1;
        StrokeId::from_counter(self.stroke_counter)
    }

    /// Adds a finalized stroke (paste, pointer-release, file load), keeping
    /// the counter ahead of any counter-derived id it carries.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        if let Some(suffix) = stroke.id().counter_suffix() {
            self.stroke_counter = self.stroke_counter.max(suffix);
        }
        self.strokes.push(stroke);
    }

    pub fn delete_stroke(&mut self, id: &StrokeId) {
        self.strokes.retain(|s| s.id() != id);
    }

    /// Drops the diagram content while keeping counters monotonic, so ids
    /// from before a clear are never handed out again.
    pub fn clear_diagram(&mut self) {
        let node_counter = self.graph.node_counter();
        self.graph = Graph::new();
        while self.graph.node_counter() < node_counter {
            let _ = self.graph.next_node_id();
        }
        self.strokes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty() && self.strokes.is_empty()
    }
}
