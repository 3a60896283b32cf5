// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON persistence for sketches.
//!
//! The on-disk shape is a flat camelCase document; the record structs here
//! are the only serde surface in the crate and convert to/from model types.
//! Loading replaces the sketch wholesale and recomputes the node counter; a
//! malformed file fails the load without touching the caller's sketch.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Connection, Node, NodeId, NodeKind, Point, Shape, Sketch, Stroke, StrokeId, StrokeTool,
};

pub const SKETCH_FILE_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchFile {
    pub version: String,
    pub timestamp: String,
    pub nodes: Vec<NodeRecord>,
    pub connections: Vec<ConnectionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub freehand_strokes: Vec<StrokeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub shape: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeRecord {
    pub id: String,
    pub tool: String,
    pub color: String,
    pub width: f64,
    pub points: Vec<PointRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Json(serde_json::Error),
    InvalidNodeId { id: String },
    UnknownNodeKind { id: String, kind: String },
    UnknownShape { id: String, shape: String },
    InvalidStrokeId { id: String },
    UnknownStrokeTool { id: String, tool: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read sketch file: {err}"),
            Self::Json(err) => write!(f, "sketch file is not valid JSON: {err}"),
            Self::InvalidNodeId { id } => write!(f, "invalid node id in sketch file: {id:?}"),
            Self::UnknownNodeKind { id, kind } => {
                write!(f, "unknown kind {kind:?} for node {id}")
            }
            Self::UnknownShape { id, shape } => {
                write!(f, "unknown shape {shape:?} for node {id}")
            }
            Self::InvalidStrokeId { id } => write!(f, "invalid stroke id in sketch file: {id:?}"),
            Self::UnknownStrokeTool { id, tool } => {
                write!(f, "unknown tool {tool:?} for stroke {id}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not write sketch file: {err}"),
            Self::Json(err) => write!(f, "could not serialize sketch: {err}"),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl SketchFile {
    pub fn from_sketch(sketch: &Sketch, timestamp: String) -> Self {
        let nodes = sketch.graph().nodes().iter().map(node_record).collect();
        let connections = sketch
            .graph()
            .connections()
            .iter()
            .map(connection_record)
            .collect();
        let freehand_strokes = sketch.strokes().iter().map(stroke_record).collect();
        Self {
            version: SKETCH_FILE_VERSION.to_owned(),
            timestamp,
            nodes,
            connections,
            freehand_strokes,
        }
    }

    /// Converts the document into a model sketch. Connections referencing a
    /// missing node are pruned (the original editor filtered them the same
    /// way); structural problems are errors.
    pub fn into_sketch(self) -> Result<Sketch, LoadError> {
        let mut sketch = Sketch::new();

        for record in self.nodes {
            let node = node_from_record(record)?;
            sketch.graph_mut().insert_node(node);
        }

        for record in self.connections {
            let (Ok(from), Ok(to)) = (
                NodeId::new(record.from.clone()),
                NodeId::new(record.to.clone()),
            ) else {
                continue;
            };
            if sketch.graph().node(&from).is_none() || sketch.graph().node(&to).is_none() {
                continue;
            }
            if from == to || sketch.graph().has_connection_between(&from, &to) {
                continue;
            }
            sketch
                .graph_mut()
                .push_connection(Connection::new_with_label(from, to, record.label));
        }

        for record in self.freehand_strokes {
            sketch.push_stroke(stroke_from_record(record)?);
        }

        sketch.graph_mut().recompute_counter();
        Ok(sketch)
    }
}

fn node_record(node: &Node) -> NodeRecord {
    let (kind, width, height, font_size) = match *node.kind() {
        NodeKind::Material => ("material", None, None, None),
        NodeKind::Activity => ("activity", None, None, None),
        NodeKind::TextBox {
            width,
            height,
            font_size,
        } => ("textbox", Some(width), Some(height), Some(font_size)),
    };
    NodeRecord {
        id: node.id().as_str().to_owned(),
        kind: kind.to_owned(),
        label: node.label().to_owned(),
        x: node.position().x,
        y: node.position().y,
        shape: shape_name(node.shape()).to_owned(),
        width,
        height,
        font_size,
    }
}

fn node_from_record(record: NodeRecord) -> Result<Node, LoadError> {
    let id = NodeId::new(record.id.clone()).map_err(|_| LoadError::InvalidNodeId {
        id: record.id.clone(),
    })?;

    let kind = match record.kind.as_str() {
        "material" => NodeKind::Material,
        "activity" => NodeKind::Activity,
        "textbox" => {
            let default = NodeKind::text_box();
            let NodeKind::TextBox {
                width: dw,
                height: dh,
                font_size: df,
            } = default
            else {
                unreachable!("text_box constructor returns a text box");
            };
            NodeKind::TextBox {
                width: record.width.unwrap_or(dw),
                height: record.height.unwrap_or(dh),
                font_size: record.font_size.unwrap_or(df),
            }
        }
        _ => {
            return Err(LoadError::UnknownNodeKind {
                id: record.id,
                kind: record.kind,
            })
        }
    };

    let shape = match record.shape.as_str() {
        "triangle" => Shape::Triangle,
        "circle" => Shape::Circle,
        "rectangle" => Shape::Rectangle,
        _ => {
            return Err(LoadError::UnknownShape {
                id: record.id,
                shape: record.shape,
            })
        }
    };

    let mut node = Node::new(id, kind, record.label, Point::new(record.x, record.y));
    node.set_shape(shape);
    Ok(node)
}

fn shape_name(shape: Shape) -> &'static str {
    match shape {
        Shape::Triangle => "triangle",
        Shape::Circle => "circle",
        Shape::Rectangle => "rectangle",
    }
}

fn connection_record(connection: &Connection) -> ConnectionRecord {
    ConnectionRecord {
        from: connection.from().as_str().to_owned(),
        to: connection.to().as_str().to_owned(),
        label: connection.label().map(str::to_owned),
    }
}

fn stroke_record(stroke: &Stroke) -> StrokeRecord {
    StrokeRecord {
        id: stroke.id().as_str().to_owned(),
        tool: stroke.tool().display_name().to_owned(),
        color: stroke.color().to_owned(),
        width: stroke.width(),
        points: stroke
            .points()
            .iter()
            .map(|p| PointRecord { x: p.x, y: p.y })
            .collect(),
    }
}

fn stroke_from_record(record: StrokeRecord) -> Result<Stroke, LoadError> {
    let id = StrokeId::new(record.id.clone()).map_err(|_| LoadError::InvalidStrokeId {
        id: record.id.clone(),
    })?;
    let tool = match record.tool.as_str() {
        "pen" => StrokeTool::Pen,
        "eraser" => StrokeTool::Eraser,
        _ => {
            return Err(LoadError::UnknownStrokeTool {
                id: record.id,
                tool: record.tool,
            })
        }
    };
    let mut stroke = Stroke::new(id, tool, record.color, record.width);
    stroke.set_points(record.points.into_iter().map(|p| Point::new(p.x, p.y)).collect());
    Ok(stroke)
}

/// Serializes the sketch and writes it to `path` in one shot.
pub fn save_sketch(path: &Path, sketch: &Sketch) -> Result<(), SaveError> {
    let file = SketchFile::from_sketch(sketch, now_rfc3339());
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads and converts a sketch file. On any error the caller's current
/// sketch is untouched because the result is returned by value.
pub fn load_sketch(path: &Path) -> Result<Sketch, LoadError> {
    let json = fs::read_to_string(path)?;
    let file: SketchFile = serde_json::from_str(&json)?;
    file.into_sketch()
}

fn now_rfc3339() -> String {
    format_rfc3339(SystemTime::now())
}

/// UTC RFC3339 with second precision, e.g. `2026-08-30T12:34:56Z`.
pub fn format_rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}
