// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geom::{point_segment_distance, Point};
use super::ids::NodeId;
use super::node::{Node, NodeKind};

/// Hit-test threshold for connections, in world units.
pub const EDGE_HIT_DISTANCE: f64 = 10.0;

/// A directed link between two nodes representing material/activity flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    from: NodeId,
    to: NodeId,
    label: Option<String>,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: None,
        }
    }

    pub fn new_with_label(from: NodeId, to: NodeId, label: Option<String>) -> Self {
        Self { from, to, label }
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    /// True when this connection links the same unordered node pair.
    pub fn links(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    pub fn touches(&self, id: &NodeId) -> bool {
        &self.from == id || &self.to == id
    }
}

/// The node/edge collections plus the monotonic id counter.
///
/// Nodes keep insertion order; hit testing walks that order in reverse so the
/// most recently added node wins on overlap. The counter only ever increases,
/// so an id is never reused within a graph's lifetime even after deletion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    node_counter: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node_counter(&self) -> u64 {
        self.node_counter
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    /// Creates a node with the next counter-derived id and a default
    /// `"<Kind> <counter>"` label when none is given.
    pub fn add_node(&mut self, kind: NodeKind, position: Point, label: Option<String>) -> &Node {
        self.node_counter += 1;
        let id = NodeId::from_counter(self.node_counter);
        let label =
            label.unwrap_or_else(|| format!("{} {}", kind.display_name(), self.node_counter));
        self.nodes.push(Node::new(id, kind, label, position));
        self.nodes.last().expect("node just pushed")
    }

    /// Inserts a pre-built node (paste, file load). The caller is responsible
    /// for id freshness; the counter is bumped so future counter-derived ids
    /// stay ahead of it.
    pub fn insert_node(&mut self, node: Node) {
        if let Some(suffix) = node.id().counter_suffix() {
            self.node_counter = self.node_counter.max(suffix);
        }
        self.nodes.push(node);
    }

    /// Removes a node and every connection touching it, in one step.
    /// Idempotent: deleting an absent id is a no-op.
    pub fn delete_node(&mut self, id: &NodeId) {
        self.nodes.retain(|n| n.id() != id);
        self.connections.retain(|c| !c.touches(id));
    }

    /// Reserves the next counter-derived id without creating a node.
    pub fn next_node_id(&mut self) -> NodeId {
        self.node_counter += 1;
        NodeId::from_counter(self.node_counter)
    }

    pub fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn remove_connection(&mut self, a: &NodeId, b: &NodeId) {
        self.connections.retain(|c| !c.links(a, b));
    }

    pub fn has_connection_between(&self, a: &NodeId, b: &NodeId) -> bool {
        self.connections.iter().any(|c| c.links(a, b))
    }

    /// Topmost node under `p`: reverse insertion order, shape-specific bounds.
    pub fn find_node_at(&self, p: Point) -> Option<&Node> {
        self.nodes.iter().rev().find(|n| n.hit_test(p))
    }

    /// The connection whose center-to-center segment passes closest to `p`
    /// within [`EDGE_HIT_DISTANCE`]. Connections with a missing endpoint are
    /// skipped; they only exist transiently during load pruning.
    pub fn find_connection_at(&self, p: Point) -> Option<&Connection> {
        let mut best: Option<(f64, &Connection)> = None;
        for connection in &self.connections {
            let (Some(from), Some(to)) = (self.node(connection.from()), self.node(connection.to()))
            else {
                continue;
            };
            let distance = point_segment_distance(p, from.position(), to.position());
            if distance > EDGE_HIT_DISTANCE {
                continue;
            }
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, connection));
            }
        }
        best.map(|(_, connection)| connection)
    }

    /// Recomputes the counter as the max canonical `node_<N>` suffix. Called
    /// after wholesale replacement (file load) so fresh ids never collide
    /// with imported ones, including ids freed by pre-save deletions.
    pub fn recompute_counter(&mut self) {
        self.node_counter = self
            .nodes
            .iter()
            .filter_map(|n| n.id().counter_suffix())
            .max()
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::{Connection, Graph};
    use crate::model::geom::Point;
    use crate::model::ids::NodeId;
    use crate::model::node::{Node, NodeKind};

    #[test]
    fn add_node_assigns_monotonic_ids_and_default_labels() {
        let mut graph = Graph::new();
        let first = graph
            .add_node(NodeKind::Material, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        let second = graph
            .add_node(NodeKind::Activity, Point::new(10.0, 0.0), None)
            .id()
            .clone();

        assert_eq!(first.as_str(), "node_1");
        assert_eq!(second.as_str(), "node_2");
        assert_eq!(graph.node(&first).expect("node").label(), "Material 1");
        assert_eq!(graph.node(&second).expect("node").label(), "Activity 2");
    }

    #[test]
    fn ids_are_never_reused_after_deletion() {
        let mut graph = Graph::new();
        let first = graph
            .add_node(NodeKind::Material, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        graph.delete_node(&first);

        let second = graph
            .add_node(NodeKind::Material, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        assert_eq!(second.as_str(), "node_2");
    }

    #[test]
    fn delete_node_cascades_to_connections_and_is_idempotent() {
        let mut graph = Graph::new();
        let m = graph
            .add_node(NodeKind::Material, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        let a = graph
            .add_node(NodeKind::Activity, Point::new(100.0, 0.0), None)
            .id()
            .clone();
        graph.push_connection(Connection::new(m.clone(), a.clone()));

        graph.delete_node(&m);
        assert!(graph.node(&m).is_none());
        assert!(graph.connections().is_empty());

        // Absent id, nothing changes.
        graph.delete_node(&m);
        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.node(&a).is_some());
    }

    #[test]
    fn find_node_at_prefers_most_recently_added() {
        let mut graph = Graph::new();
        let older = graph
            .add_node(NodeKind::Material, Point::new(100.0, 100.0), None)
            .id()
            .clone();
        let newer = graph
            .add_node(NodeKind::Activity, Point::new(110.0, 100.0), None)
            .id()
            .clone();

        let hit = graph.find_node_at(Point::new(105.0, 100.0)).expect("hit");
        assert_eq!(hit.id(), &newer);
        assert_ne!(hit.id(), &older);
    }

    #[test]
    fn find_connection_at_returns_closest_within_threshold() {
        let mut graph = Graph::new();
        let m = graph
            .add_node(NodeKind::Material, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        let a = graph
            .add_node(NodeKind::Activity, Point::new(100.0, 0.0), None)
            .id()
            .clone();
        let m2 = graph
            .add_node(NodeKind::Material, Point::new(0.0, 12.0), None)
            .id()
            .clone();
        graph.push_connection(Connection::new(m.clone(), a.clone()));
        graph.push_connection(Connection::new(m2.clone(), a.clone()));

        // 4 units from the first segment, ~5.6 from the second.
        let hit = graph.find_connection_at(Point::new(20.0, 4.0)).expect("hit");
        assert!(hit.links(&m, &a));

        assert!(graph.find_connection_at(Point::new(50.0, 30.0)).is_none());
    }

    #[test]
    fn insert_node_keeps_counter_ahead_of_imported_ids() {
        let mut graph = Graph::new();
        graph.insert_node(Node::new(
            NodeId::from_counter(9),
            NodeKind::Material,
            "imported",
            Point::new(0.0, 0.0),
        ));

        let next = graph
            .add_node(NodeKind::Activity, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        assert_eq!(next.as_str(), "node_10");
    }

    #[test]
    fn recompute_counter_uses_max_suffix_and_ignores_foreign_ids() {
        let mut graph = Graph::new();
        for (id, label) in [("node_1", "a"), ("node_5", "b"), ("legacy-3", "c")] {
            graph.insert_node(Node::new(
                NodeId::new(id).expect("node id"),
                NodeKind::Material,
                label,
                Point::new(0.0, 0.0),
            ));
        }

        graph.recompute_counter();
        assert_eq!(graph.node_counter(), 5);

        let next = graph
            .add_node(NodeKind::Activity, Point::new(0.0, 0.0), None)
            .id()
            .clone();
        assert_eq!(next.as_str(), "node_6");
    }
}
