// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geom::{Point, Rect};
use super::ids::NodeId;

/// Hit-test radius for material/activity nodes, in world units.
pub const NODE_HIT_RADIUS: f64 = 30.0;

const TEXT_BOX_DEFAULT_WIDTH: f64 = 120.0;
const TEXT_BOX_DEFAULT_HEIGHT: f64 = 40.0;
const TEXT_BOX_DEFAULT_FONT_SIZE: f64 = 14.0;

/// The node variant. Text boxes carry their own extent; materials and
/// activities are fixed-radius glyphs.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Material,
    Activity,
    TextBox {
        width: f64,
        height: f64,
        font_size: f64,
    },
}

impl NodeKind {
    pub fn text_box() -> Self {
        Self::TextBox {
            width: TEXT_BOX_DEFAULT_WIDTH,
            height: TEXT_BOX_DEFAULT_HEIGHT,
            font_size: TEXT_BOX_DEFAULT_FONT_SIZE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Activity => "Activity",
            Self::TextBox { .. } => "Text",
        }
    }

    /// Whether edges may attach to this kind at all. Text boxes are
    /// annotations and never participate in connections.
    pub fn is_connectable(&self) -> bool {
        !matches!(self, Self::TextBox { .. })
    }

    /// Two kinds are the same flavor when an edge between them would violate
    /// the alternating-kind rule.
    pub fn same_flavor(&self, other: &NodeKind) -> bool {
        matches!(
            (self, other),
            (Self::Material, Self::Material)
                | (Self::Activity, Self::Activity)
                | (Self::TextBox { .. }, Self::TextBox { .. })
        )
    }

    pub fn default_shape(&self) -> Shape {
        match self {
            Self::Material => Shape::Circle,
            Self::Activity => Shape::Triangle,
            Self::TextBox { .. } => Shape::Rectangle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Triangle,
    Circle,
    Rectangle,
}

/// A graph vertex. `position` is the shape center.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    label: String,
    position: Point,
    shape: Shape,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>, position: Point) -> Self {
        let shape = kind.default_shape();
        Self {
            id,
            kind,
            label: label.into(),
            position,
            shape,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn set_text_box_extent(&mut self, new_width: f64, new_height: f64) {
        if let NodeKind::TextBox { width, height, .. } = &mut self.kind {
            *width = new_width.max(1.0);
            *height = new_height.max(1.0);
        }
    }

    /// Shape-specific hit test: circular radius for material/activity,
    /// axis-aligned extent for text boxes.
    pub fn hit_test(&self, p: Point) -> bool {
        match self.kind {
            NodeKind::TextBox { width, height, .. } => {
                Rect::from_center(self.position, width, height).contains(p)
            }
            NodeKind::Material | NodeKind::Activity => {
                self.position.distance_to(p) <= NODE_HIT_RADIUS
            }
        }
    }

    /// World-space bounds used for selection framing and image-copy padding.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            NodeKind::TextBox { width, height, .. } => {
                Rect::from_center(self.position, width, height)
            }
            NodeKind::Material | NodeKind::Activity => Rect::from_center(
                self.position,
                NODE_HIT_RADIUS * 2.0,
                NODE_HIT_RADIUS * 2.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind, Shape, NODE_HIT_RADIUS};
    use crate::model::geom::Point;
    use crate::model::ids::NodeId;

    fn node(kind: NodeKind) -> Node {
        Node::new(NodeId::from_counter(1), kind, "n", Point::new(100.0, 100.0))
    }

    #[test]
    fn material_defaults_to_circle_and_radial_hit_test() {
        let n = node(NodeKind::Material);
        assert_eq!(n.shape(), Shape::Circle);
        assert!(n.hit_test(Point::new(100.0 + NODE_HIT_RADIUS, 100.0)));
        assert!(!n.hit_test(Point::new(100.0 + NODE_HIT_RADIUS + 0.1, 100.0)));
    }

    #[test]
    fn activity_defaults_to_triangle() {
        assert_eq!(node(NodeKind::Activity).shape(), Shape::Triangle);
    }

    #[test]
    fn text_box_hit_test_uses_extent() {
        let mut n = node(NodeKind::text_box());
        n.set_text_box_extent(60.0, 20.0);
        assert!(n.hit_test(Point::new(129.0, 109.0)));
        assert!(!n.hit_test(Point::new(131.0, 100.0)));
        assert!(!n.hit_test(Point::new(100.0, 111.0)));
    }

    #[test]
    fn text_box_extent_never_collapses() {
        let mut n = node(NodeKind::text_box());
        n.set_text_box_extent(-5.0, 0.0);
        let NodeKind::TextBox { width, height, .. } = *n.kind() else {
            panic!("expected text box kind");
        };
        assert_eq!(width, 1.0);
        assert_eq!(height, 1.0);
    }

    #[test]
    fn connectable_kinds() {
        assert!(NodeKind::Material.is_connectable());
        assert!(NodeKind::Activity.is_connectable());
        assert!(!NodeKind::text_box().is_connectable());
    }

    #[test]
    fn same_flavor_ignores_text_box_extent() {
        let a = NodeKind::text_box();
        let b = NodeKind::TextBox {
            width: 1.0,
            height: 2.0,
            font_size: 3.0,
        };
        assert!(a.same_flavor(&b));
        assert!(!NodeKind::Material.same_flavor(&NodeKind::Activity));
    }
}
