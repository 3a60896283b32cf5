// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use crate::model::{NodeId, NodeKind, Point, Sketch};

use super::{
    add_node, can_connect, connect, copy_selection, delete_selection, paste, ConnectError,
    Selection,
};

fn sketch_with(kinds: &[NodeKind]) -> (Sketch, Vec<NodeId>) {
    let mut sketch = Sketch::new();
    let mut ids = Vec::with_capacity(kinds.len());
    for (i, kind) in kinds.iter().enumerate() {
        let id = sketch
            .graph_mut()
            .add_node(kind.clone(), Point::new(i as f64 * 200.0, 100.0), None)
            .id()
            .clone();
        ids.push(id);
    }
    (sketch, ids)
}

#[rstest]
#[case(NodeKind::Material, NodeKind::Activity, true)]
#[case(NodeKind::Activity, NodeKind::Material, true)]
#[case(NodeKind::Material, NodeKind::Material, false)]
#[case(NodeKind::Activity, NodeKind::Activity, false)]
#[case(NodeKind::Material, NodeKind::text_box(), false)]
#[case(NodeKind::text_box(), NodeKind::Activity, false)]
#[case(NodeKind::text_box(), NodeKind::text_box(), false)]
fn can_connect_matrix(#[case] a: NodeKind, #[case] b: NodeKind, #[case] expected: bool) {
    let (sketch, ids) = sketch_with(&[a, b]);
    let a = sketch.graph().node(&ids[0]).expect("node a");
    let b = sketch.graph().node(&ids[1]).expect("node b");
    assert_eq!(can_connect(a, b), expected);
}

#[test]
fn can_connect_rejects_identity() {
    let (sketch, ids) = sketch_with(&[NodeKind::Material]);
    let a = sketch.graph().node(&ids[0]).expect("node");
    assert!(!can_connect(a, a));
}

#[test]
fn connect_creates_one_edge_and_rejects_duplicates_in_either_direction() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::Material, NodeKind::Activity]);
    let (m, a) = (&ids[0], &ids[1]);

    connect(sketch.graph_mut(), m, a).expect("first connection");
    assert_eq!(sketch.graph().connections().len(), 1);

    // Reversed direction still counts as a duplicate of the unordered pair.
    assert_eq!(
        connect(sketch.graph_mut(), a, m),
        Err(ConnectError::AlreadyExists)
    );
    assert_eq!(sketch.graph().connections().len(), 1);
}

#[test]
fn connect_rejects_self_loop_and_same_kind() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::Material, NodeKind::Material]);

    assert_eq!(
        connect(sketch.graph_mut(), &ids[0], &ids[0]),
        Err(ConnectError::SelfLoop)
    );
    assert_eq!(
        connect(sketch.graph_mut(), &ids[0], &ids[1]),
        Err(ConnectError::SameKind { kind: "Material" })
    );
    assert!(sketch.graph().connections().is_empty());
}

#[test]
fn connect_rejects_text_boxes() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::text_box(), NodeKind::Activity]);
    assert_eq!(
        connect(sketch.graph_mut(), &ids[0], &ids[1]),
        Err(ConnectError::NotConnectable { kind: "Text" })
    );
}

#[test]
fn connect_rejects_missing_nodes_without_touching_the_graph() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::Material]);
    let ghost = NodeId::from_counter(99);
    assert_eq!(
        connect(sketch.graph_mut(), &ids[0], &ghost),
        Err(ConnectError::MissingNode {
            node_id: ghost.clone()
        })
    );
    assert!(sketch.graph().connections().is_empty());
}

#[test]
fn delete_selection_removes_nodes_strokes_and_incident_edges() {
    let (mut sketch, ids) =
        sketch_with(&[NodeKind::Material, NodeKind::Activity, NodeKind::Material]);
    connect(sketch.graph_mut(), &ids[0], &ids[1]).expect("connect");
    connect(sketch.graph_mut(), &ids[2], &ids[1]).expect("connect");

    let stroke_id = sketch.next_stroke_id();
    let mut stroke = crate::model::Stroke::new(
        stroke_id.clone(),
        crate::model::StrokeTool::Pen,
        "#222222",
        2.0,
    );
    stroke.push_point(Point::new(0.0, 0.0));
    sketch.push_stroke(stroke);

    let mut selection = Selection::single_node(ids[1].clone());
    selection.insert_stroke(stroke_id);

    let removed = delete_selection(&mut sketch, &selection);
    assert_eq!(removed, 2);
    assert_eq!(sketch.graph().nodes().len(), 2);
    assert!(sketch.graph().connections().is_empty());
    assert!(sketch.strokes().is_empty());
}

#[test]
fn delete_selection_with_stale_ids_is_a_no_op() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::Material]);
    let mut selection = Selection::single_node(ids[0].clone());
    delete_selection(&mut sketch, &selection);

    selection.insert_node(NodeId::from_counter(50));
    let removed = delete_selection(&mut sketch, &selection);
    assert_eq!(removed, 0);
}

#[test]
fn copy_captures_only_internal_connections() {
    let (mut sketch, ids) =
        sketch_with(&[NodeKind::Material, NodeKind::Activity, NodeKind::Material]);
    connect(sketch.graph_mut(), &ids[0], &ids[1]).expect("connect");
    connect(sketch.graph_mut(), &ids[2], &ids[1]).expect("connect");

    let mut selection = Selection::single_node(ids[0].clone());
    selection.insert_node(ids[1].clone());

    let clipboard = copy_selection(&sketch, &selection);
    assert_eq!(clipboard.node_count(), 2);
    // The edge to the unselected third node is dropped.
    assert_eq!(clipboard.connections.len(), 1);
}

#[test]
fn paste_remaps_ids_and_offsets_positions() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::Material, NodeKind::Activity]);
    connect(sketch.graph_mut(), &ids[0], &ids[1]).expect("connect");

    let mut selection = Selection::single_node(ids[0].clone());
    selection.insert_node(ids[1].clone());
    let clipboard = copy_selection(&sketch, &selection);

    let pasted = paste(&mut sketch, &clipboard, Point::new(40.0, 40.0));
    assert_eq!(pasted, vec![NodeId::from_counter(3), NodeId::from_counter(4)]);
    assert_eq!(sketch.graph().nodes().len(), 4);
    assert_eq!(sketch.graph().connections().len(), 2);

    let original = sketch.graph().node(&ids[0]).expect("original").position();
    let copy = sketch.graph().node(&pasted[0]).expect("copy").position();
    assert_eq!(copy, original.offset(40.0, 40.0));

    // The pasted edge links the fresh ids, not the originals.
    assert!(sketch
        .graph()
        .has_connection_between(&pasted[0], &pasted[1]));
}

#[test]
fn paste_twice_never_collides() {
    let (mut sketch, ids) = sketch_with(&[NodeKind::Material]);
    let selection = Selection::single_node(ids[0].clone());
    let clipboard = copy_selection(&sketch, &selection);

    let first = paste(&mut sketch, &clipboard, Point::new(20.0, 20.0));
    let second = paste(&mut sketch, &clipboard, Point::new(20.0, 20.0));
    assert_ne!(first, second);
    assert_eq!(sketch.graph().nodes().len(), 3);
}

#[test]
fn add_node_selects_the_new_node() {
    let mut sketch = Sketch::new();
    let mut selection = Selection::default();
    let id = add_node(
        &mut sketch,
        &mut selection,
        NodeKind::Material,
        Point::new(100.0, 100.0),
    );
    assert_eq!(selection.nodes().len(), 1);
    assert!(selection.contains_node(&id));
}
