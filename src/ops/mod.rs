// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Gated mutation operations on the sketch.
//!
//! [`connect`] is the single gate for direct-manipulation edge creation; the
//! generator builds alternating-kind edges by construction and bypasses it.
//! History snapshots are the caller's concern: the editor saves the pre-state
//! before invoking an operation that succeeds, and never for one that is
//! rejected.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::model::{Connection, Graph, Node, NodeId, NodeKind, Point, Sketch, StrokeId};

/// Whether an edge between these two nodes would be valid: different nodes,
/// both of connectable kinds, kinds not of the same flavor. Symmetric in its
/// arguments; the stored edge direction is whatever the caller passes to
/// [`connect`].
pub fn can_connect(a: &Node, b: &Node) -> bool {
    if a.id() == b.id() {
        return false;
    }
    if !a.kind().is_connectable() || !b.kind().is_connectable() {
        return false;
    }
    !a.kind().same_flavor(b.kind())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectError {
    MissingNode { node_id: NodeId },
    SelfLoop,
    NotConnectable { kind: &'static str },
    SameKind { kind: &'static str },
    AlreadyExists,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node_id } => write!(f, "node not found (id={node_id})"),
            Self::SelfLoop => f.write_str("cannot connect a node to itself"),
            Self::NotConnectable { kind } => {
                write!(f, "{} nodes cannot be connected", kind.to_lowercase())
            }
            Self::SameKind { kind } => write!(
                f,
                "invalid connection: connect a material to an activity, not two {} nodes",
                kind.to_lowercase()
            ),
            Self::AlreadyExists => f.write_str("these nodes are already connected"),
        }
    }
}

impl std::error::Error for ConnectError {}

/// Creates the directed edge `from -> to` after validating the alternating
/// kind rule and the no-duplicate rule (checked in both directions). On any
/// rejection the graph is untouched.
pub fn connect(graph: &mut Graph, from: &NodeId, to: &NodeId) -> Result<(), ConnectError> {
    let from_node = graph.node(from).ok_or_else(|| ConnectError::MissingNode {
        node_id: from.clone(),
    })?;
    let to_node = graph.node(to).ok_or_else(|| ConnectError::MissingNode {
        node_id: to.clone(),
    })?;

    if from_node.id() == to_node.id() {
        return Err(ConnectError::SelfLoop);
    }
    if !from_node.kind().is_connectable() {
        return Err(ConnectError::NotConnectable {
            kind: from_node.kind().display_name(),
        });
    }
    if !to_node.kind().is_connectable() {
        return Err(ConnectError::NotConnectable {
            kind: to_node.kind().display_name(),
        });
    }
    if from_node.kind().same_flavor(to_node.kind()) {
        return Err(ConnectError::SameKind {
            kind: from_node.kind().display_name(),
        });
    }
    if graph.has_connection_between(from, to) {
        return Err(ConnectError::AlreadyExists);
    }

    graph.push_connection(Connection::new(from.clone(), to.clone()));
    Ok(())
}

/// The transient set of selected nodes and strokes. Not part of persisted
/// state; cleared on tool change, undo, and explicit deselect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: BTreeSet<NodeId>,
    strokes: BTreeSet<StrokeId>,
}

impl Selection {
    pub fn single_node(id: NodeId) -> Self {
        let mut selection = Self::default();
        selection.nodes.insert(id);
        selection
    }

    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    pub fn strokes(&self) -> &BTreeSet<StrokeId> {
        &self.strokes
    }

    pub fn insert_node(&mut self, id: NodeId) {
        self.nodes.insert(id);
    }

    pub fn insert_stroke(&mut self, id: StrokeId) {
        self.strokes.insert(id);
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.strokes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.strokes.clear();
    }
}

/// Removes every selected node (cascading to incident edges) and every
/// selected stroke. One call, one history step for the caller. Returns the
/// number of removed objects.
pub fn delete_selection(sketch: &mut Sketch, selection: &Selection) -> usize {
    let mut removed = 0;
    for node_id in selection.nodes() {
        if sketch.graph().node(node_id).is_some() {
            sketch.graph_mut().delete_node(node_id);
            removed += 1;
        }
    }
    for stroke_id in selection.strokes() {
        if sketch.stroke(stroke_id).is_some() {
            sketch.delete_stroke(stroke_id);
            removed += 1;
        }
    }
    removed
}

/// A copied sub-graph: the selected nodes plus only the connections internal
/// to that subset. Node ids are remapped fresh on paste.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Captures the selected sub-graph. Connections with an endpoint outside the
/// selection are dropped; they would dangle after paste.
pub fn copy_selection(sketch: &Sketch, selection: &Selection) -> Clipboard {
    let nodes: Vec<Node> = sketch
        .graph()
        .nodes()
        .iter()
        .filter(|n| selection.contains_node(n.id()))
        .cloned()
        .collect();
    let connections = sketch
        .graph()
        .connections()
        .iter()
        .filter(|c| selection.contains_node(c.from()) && selection.contains_node(c.to()))
        .cloned()
        .collect();
    Clipboard { nodes, connections }
}

/// Inserts the clipboard content with fresh counter-derived ids and a small
/// positional offset, and returns the new ids (the caller selects them).
pub fn paste(sketch: &mut Sketch, clipboard: &Clipboard, offset: Point) -> Vec<NodeId> {
    let mut id_map: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut pasted = Vec::with_capacity(clipboard.nodes.len());

    for node in &clipboard.nodes {
        let fresh_id = sketch.graph_mut().next_node_id();
        id_map.insert(node.id().clone(), fresh_id.clone());

        let mut copy = Node::new(
            fresh_id.clone(),
            node.kind().clone(),
            node.label(),
            node.position().offset(offset.x, offset.y),
        );
        copy.set_shape(node.shape());
        sketch.graph_mut().insert_node(copy);
        pasted.push(fresh_id);
    }

    for connection in &clipboard.connections {
        let (Some(from), Some(to)) = (id_map.get(connection.from()), id_map.get(connection.to()))
        else {
            continue;
        };
        sketch.graph_mut().push_connection(Connection::new_with_label(
            from.clone(),
            to.clone(),
            connection.label().map(str::to_owned),
        ));
    }

    pasted
}

/// Convenience used by the editor: add a node of `kind` and make it the sole
/// selection, mirroring direct-manipulation adds.
pub fn add_node(
    sketch: &mut Sketch,
    selection: &mut Selection,
    kind: NodeKind,
    position: Point,
) -> NodeId {
    let id = sketch
        .graph_mut()
        .add_node(kind, position, None)
        .id()
        .clone();
    *selection = Selection::single_node(id.clone());
    id
}

#[cfg(test)]
mod tests;
