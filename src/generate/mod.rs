// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Natural-language diagram generator.
//!
//! Two stages tried in order: movement-pattern extraction, then the fallback
//! keyword tokenizer. Either way the result is expanded into nodes and edges
//! by deterministic column layout. Edges are pushed directly because the
//! expansion only ever links alternating kinds; direct manipulation still
//! goes through [`crate::ops::connect`].

use std::fmt;

use crate::model::{Connection, Graph, NodeId, NodeKind, Point};

pub mod movement;
pub mod tokens;
pub mod vocab;

pub use movement::MovementStep;
pub use tokens::{Token, TokenKind};

const LAYOUT_ORIGIN_X: f64 = 140.0;
const LAYOUT_ORIGIN_Y: f64 = 220.0;
const COLUMN_GAP: f64 = 200.0;
const ROW_GAP: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    NothingRecognized,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingRecognized => f.write_str("could not understand the description"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// What a successful generation did, for the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub nodes_added: usize,
    pub edges_added: usize,
    pub warnings: Vec<String>,
}

/// Expands `text` into a node/edge subgraph appended to `graph`.
///
/// The caller is responsible for the rollback protocol: snapshot history,
/// clear the diagram, call this, and undo on error so a failed generation
/// leaves the sketch exactly as it was.
pub fn build_from_description(graph: &mut Graph, text: &str) -> Result<BuildReport, GenerateError> {
    let steps = movement::extract_steps(text);
    if !steps.is_empty() {
        return Ok(build_from_movements(graph, &steps));
    }

    let tokens = tokens::tokenize(text);
    build_from_tokens(graph, &tokens)
}

/// Lays out `source -> activity -> destination` per step, left to right,
/// reusing a previously placed material node when a later step names it
/// again (that is how steps chain through a shared location).
fn build_from_movements(graph: &mut Graph, steps: &[MovementStep]) -> BuildReport {
    let mut report = BuildReport::default();
    let mut column = 0usize;
    let mut placed_materials: Vec<(String, NodeId)> = Vec::new();

    for step in steps {
        let source = reuse_or_add_material(graph, &mut placed_materials, &step.source, &mut column, &mut report);

        let activity_id = add_at_column(graph, NodeKind::Activity, &step.activity, &mut column);
        report.nodes_added += 1;

        let destination =
            reuse_or_add_material(graph, &mut placed_materials, &step.destination, &mut column, &mut report);

        let material_label = step.material.clone();
        push_edge(graph, &source, &activity_id, material_label.clone());
        report.edges_added += 1;
        // "from X to X" collapses onto one node; skip the duplicate pair.
        if !graph.has_connection_between(&activity_id, &destination) {
            push_edge(graph, &activity_id, &destination, material_label);
            report.edges_added += 1;
        }
    }

    report
}

fn reuse_or_add_material(
    graph: &mut Graph,
    placed: &mut Vec<(String, NodeId)>,
    label: &str,
    column: &mut usize,
    report: &mut BuildReport,
) -> NodeId {
    let key = label.to_lowercase();
    if let Some((_, id)) = placed.iter().find(|(existing, _)| *existing == key) {
        return id.clone();
    }
    let id = add_at_column(graph, NodeKind::Material, label, column);
    placed.push((key, id.clone()));
    report.nodes_added += 1;
    id
}

fn add_at_column(graph: &mut Graph, kind: NodeKind, label: &str, column: &mut usize) -> NodeId {
    let position = Point::new(
        LAYOUT_ORIGIN_X + *column as f64 * COLUMN_GAP,
        LAYOUT_ORIGIN_Y,
    );
    *column += 1;
    graph
        .add_node(kind, position, Some(label.to_owned()))
        .id()
        .clone()
}

/// Columns left to right; quantity fans out vertically; a full bipartite edge
/// set connects each column to the previous one. Consecutive same-kind
/// tokens are dropped with a warning so adjacent columns always alternate.
fn build_from_tokens(graph: &mut Graph, tokens: &[Token]) -> Result<BuildReport, GenerateError> {
    let mut report = BuildReport::default();
    let mut previous_column: Vec<NodeId> = Vec::new();
    let mut previous_kind: Option<TokenKind> = None;
    let mut column = 0usize;

    for token in tokens {
        if previous_kind == Some(token.kind) {
            report.warnings.push(format!(
                "skipped \"{}\": two {} steps cannot follow each other",
                token.label,
                token.kind.display_name()
            ));
            continue;
        }

        let kind = match token.kind {
            TokenKind::Material => NodeKind::Material,
            TokenKind::Activity => NodeKind::Activity,
        };
        let x = LAYOUT_ORIGIN_X + column as f64 * COLUMN_GAP;
        let y_top = LAYOUT_ORIGIN_Y - (token.quantity.saturating_sub(1)) as f64 * ROW_GAP / 2.0;

        let mut current_column = Vec::with_capacity(token.quantity);
        for row in 0..token.quantity {
            let label = if token.quantity > 1 {
                format!("{} {}", token.label, row + 1)
            } else {
                token.label.clone()
            };
            let position = Point::new(x, y_top + row as f64 * ROW_GAP);
            let id = graph
                .add_node(kind.clone(), position, Some(label))
                .id()
                .clone();
            report.nodes_added += 1;
            current_column.push(id);
        }

        for from in &previous_column {
            for to in &current_column {
                push_edge(graph, from, to, None);
                report.edges_added += 1;
            }
        }

        previous_column = current_column;
        previous_kind = Some(token.kind);
        column += 1;
    }

    if report.nodes_added == 0 {
        return Err(GenerateError::NothingRecognized);
    }
    Ok(report)
}

fn push_edge(graph: &mut Graph, from: &NodeId, to: &NodeId, label: Option<String>) {
    debug_assert!(
        graph
            .node(from)
            .zip(graph.node(to))
            .is_some_and(|(a, b)| !a.kind().same_flavor(b.kind())),
        "generator must only produce alternating-kind edges"
    );
    graph.push_connection(Connection::new_with_label(from.clone(), to.clone(), label));
}

#[cfg(test)]
mod tests;
