// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Graph, NodeKind};

use super::{build_from_description, GenerateError};

fn kinds_by_x(graph: &Graph) -> Vec<(&'static str, f64)> {
    let mut nodes: Vec<_> = graph
        .nodes()
        .iter()
        .map(|n| (n.kind().display_name(), n.position().x))
        .collect();
    nodes.sort_by(|a, b| a.1.partial_cmp(&b.1).expect("finite x"));
    nodes
}

#[test]
fn scenario_builds_fixed_six_node_five_edge_diagram() {
    let mut graph = Graph::new();
    let report = build_from_description(
        &mut graph,
        "two raw materials consumed in a bom to produce a finished good distributed to a dc",
    )
    .expect("generation succeeds");

    assert_eq!(report.nodes_added, 6);
    assert_eq!(report.edges_added, 5);
    assert_eq!(graph.nodes().len(), 6);
    assert_eq!(graph.connections().len(), 5);

    // Columns alternate material/activity left to right.
    let materials = graph
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind(), NodeKind::Material))
        .count();
    let activities = graph
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind(), NodeKind::Activity))
        .count();
    assert_eq!(materials, 4);
    assert_eq!(activities, 2);

    // Fan-out suffixes on the quantity-2 column.
    let labels: Vec<&str> = graph.nodes().iter().map(|n| n.label()).collect();
    assert!(labels.contains(&"Raw Materials 1"));
    assert!(labels.contains(&"Raw Materials 2"));
    assert!(labels.contains(&"BOM"));
    assert!(labels.contains(&"DC"));

    // Every edge links a material to an activity.
    for connection in graph.connections() {
        let from = graph.node(connection.from()).expect("from node");
        let to = graph.node(connection.to()).expect("to node");
        assert!(!from.kind().same_flavor(to.kind()));
    }
}

#[test]
fn quantity_fans_out_into_full_bipartite_edges() {
    let mut graph = Graph::new();
    let report =
        build_from_description(&mut graph, "three components assembled in production into a product")
            .expect("generation succeeds");

    // 3 materials -> 1 activity -> 1 material.
    assert_eq!(report.nodes_added, 5);
    assert_eq!(report.edges_added, 4);
}

#[test]
fn consecutive_same_kind_tokens_are_skipped_with_a_warning() {
    let mut graph = Graph::new();
    let report = build_from_description(&mut graph, "factory warehouse shipping")
        .expect("generation succeeds");

    // The second material column is dropped, never two adjacent same-kind
    // columns.
    assert_eq!(report.nodes_added, 2);
    assert_eq!(report.edges_added, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Warehouse"));
}

#[test]
fn movement_stage_wins_over_tokenizer() {
    let mut graph = Graph::new();
    let report = build_from_description(&mut graph, "pallets shipped from factory to warehouse")
        .expect("generation succeeds");

    assert_eq!(report.nodes_added, 3);
    assert_eq!(report.edges_added, 2);

    let kinds = kinds_by_x(&graph);
    assert_eq!(kinds[0].0, "Material");
    assert_eq!(kinds[1].0, "Activity");
    assert_eq!(kinds[2].0, "Material");

    // The material phrase labels the flow edges.
    assert!(graph
        .connections()
        .iter()
        .all(|c| c.label() == Some("Pallets")));
}

#[test]
fn chained_movements_reuse_the_shared_location() {
    let mut graph = Graph::new();
    let report = build_from_description(
        &mut graph,
        "parts shipped from supplier to plant. parts sent from plant to warehouse",
    )
    .expect("generation succeeds");

    // supplier, ship, plant, send, warehouse: the plant node is shared.
    assert_eq!(report.nodes_added, 5);
    assert_eq!(report.edges_added, 4);
    assert_eq!(
        graph
            .nodes()
            .iter()
            .filter(|n| n.label() == "Plant")
            .count(),
        1
    );
}

#[test]
fn unrecognized_description_is_an_error_and_adds_nothing() {
    let mut graph = Graph::new();
    let result = build_from_description(&mut graph, "completely unrelated prose");
    assert_eq!(result, Err(GenerateError::NothingRecognized));
    assert!(graph.is_empty());

    let result = build_from_description(&mut graph, "");
    assert_eq!(result, Err(GenerateError::NothingRecognized));
}

#[test]
fn generated_ids_continue_from_the_existing_counter() {
    let mut graph = Graph::new();
    graph.add_node(
        NodeKind::Material,
        crate::model::Point::new(0.0, 0.0),
        None,
    );

    build_from_description(&mut graph, "factory shipping warehouse").expect("generation succeeds");
    assert!(graph
        .nodes()
        .iter()
        .any(|n| n.id().as_str() == "node_4"));
}
