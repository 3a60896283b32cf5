// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A sketch holds the node/edge graph plus the freehand stroke layer; both
//! together form the snapshot unit for undo history and persistence.

pub mod geom;
pub mod graph;
pub mod ids;
pub mod node;
pub mod sketch;
pub mod stroke;

pub use geom::{point_segment_distance, Point, Rect};
pub use graph::{Connection, Graph, EDGE_HIT_DISTANCE};
pub use ids::{Id, IdError, NodeId, StrokeId};
pub use node::{Node, NodeKind, Shape, NODE_HIT_RADIUS};
pub use sketch::Sketch;
pub use stroke::{Stroke, StrokeTool};
