// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Node tree definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 3D vector type alias
pub type Vec3 = nalgebra::Vector3<f64>;

/// Allocate a fresh unique node/term identity
pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn zero_vec3() -> Vec3 {
    Vec3::zeros()
}

/// One operation in the geometry tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: fresh_id(),
            kind,
        }
    }

    pub fn with_id(kind: NodeKind, id: String) -> Self {
        Self { id, kind }
    }
}

/// Unit selector for angle-valued parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Deg,
    Rad,
}

impl AngleUnit {
    /// Convert a value carried in this unit to radians
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            AngleUnit::Deg => crate::utils::math::deg_to_rad(value),
            AngleUnit::Rad => value,
        }
    }
}

/// Emission style for a point literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStyle {
    #[default]
    Inline,
    Scalars,
    Named,
}

/// One term of a fourier series curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default)]
    pub start_angle_unit: AngleUnit,
}

impl Term {
    pub fn new(r: f64, w: f64, start_angle: f64, start_angle_unit: AngleUnit) -> Self {
        Self {
            id: fresh_id(),
            r,
            w,
            start_angle,
            start_angle_unit,
        }
    }

    /// Phase offset in radians
    pub fn phase(&self) -> f64 {
        self.start_angle_unit.to_radians(self.start_angle)
    }
}

/// Operation kinds
///
/// Closed set: every kind carries both a numeric evaluation rule and a
/// source emission rule, dispatched by exhaustive match. Missing persisted
/// parameters default to zero rather than failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    // Coordinate-frame transforms. These mutate points already in the
    // accumulator and affect all subsequent siblings.
    Axis {
        #[serde(default = "zero_vec3")]
        v: Vec3,
    },
    Scale {
        #[serde(default)]
        factor: f64,
    },
    RotateAsAxis {
        #[serde(default)]
        angle: f64,
        #[serde(default)]
        unit: AngleUnit,
        #[serde(default)]
        axis: Option<Vec3>,
    },
    RotateTo {
        #[serde(default)]
        origin: Option<Vec3>,
        #[serde(default)]
        end: Option<Vec3>,
        #[serde(default)]
        to: Option<Vec3>,
    },

    // Point samplers
    AddPoint {
        #[serde(default = "zero_vec3")]
        offset: Vec3,
        #[serde(default)]
        style: PointStyle,
    },
    AddLine {
        #[serde(default = "zero_vec3")]
        start: Vec3,
        #[serde(default = "zero_vec3")]
        end: Vec3,
        #[serde(default)]
        count: u32,
    },
    AddCircle {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        count: u32,
    },
    AddArc {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        from: f64,
        #[serde(default)]
        to: f64,
        #[serde(default)]
        unit: AngleUnit,
        #[serde(default)]
        count: u32,
    },
    AddEllipse {
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        rz: f64,
        #[serde(default)]
        count: u32,
    },
    AddPolygon {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        sides: u32,
        #[serde(default)]
        count: u32,
    },
    AddStar {
        #[serde(default)]
        outer: f64,
        #[serde(default)]
        inner: f64,
        #[serde(default)]
        points: u32,
        #[serde(default)]
        count: u32,
    },
    AddSpiral {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        turns: f64,
        #[serde(default)]
        count: u32,
    },
    AddHelix {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        height: f64,
        #[serde(default)]
        turns: f64,
        #[serde(default)]
        count: u32,
    },
    AddRose {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        petals: u32,
        #[serde(default)]
        count: u32,
    },
    AddWave {
        #[serde(default)]
        length: f64,
        #[serde(default)]
        amplitude: f64,
        #[serde(default)]
        cycles: f64,
        #[serde(default)]
        count: u32,
    },
    AddLissajous {
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        rz: f64,
        #[serde(default)]
        a: f64,
        #[serde(default)]
        b: f64,
        #[serde(default)]
        phase: f64,
        #[serde(default)]
        unit: AngleUnit,
        #[serde(default)]
        count: u32,
    },
    AddGrid {
        #[serde(default)]
        width: f64,
        #[serde(default)]
        depth: f64,
        #[serde(default)]
        cols: u32,
        #[serde(default)]
        rows: u32,
    },
    AddBox {
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
        #[serde(default)]
        depth: f64,
        #[serde(default)]
        count: u32,
    },
    AddSphere {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        rings: u32,
        #[serde(default)]
        segments: u32,
    },
    AddCylinder {
        #[serde(default)]
        r: f64,
        #[serde(default)]
        height: f64,
        #[serde(default)]
        rings: u32,
        #[serde(default)]
        segments: u32,
    },
    AddCone {
        #[serde(default)]
        r1: f64,
        #[serde(default)]
        r2: f64,
        #[serde(default)]
        height: f64,
        #[serde(default)]
        rings: u32,
        #[serde(default)]
        segments: u32,
    },
    AddTorus {
        #[serde(default)]
        major: f64,
        #[serde(default)]
        minor: f64,
        #[serde(default)]
        rings: u32,
        #[serde(default)]
        segments: u32,
    },
    AddRing {
        #[serde(default)]
        inner: f64,
        #[serde(default)]
        outer: f64,
        #[serde(default)]
        rings: u32,
        #[serde(default)]
        count: u32,
    },
    AddBezier {
        #[serde(default = "zero_vec3")]
        start: Vec3,
        #[serde(default = "zero_vec3")]
        control: Vec3,
        #[serde(default = "zero_vec3")]
        end: Vec3,
        #[serde(default)]
        count: u32,
    },
    #[serde(rename = "add_bezier_4")]
    AddBezier4 {
        #[serde(default = "zero_vec3")]
        start: Vec3,
        #[serde(default = "zero_vec3")]
        c1: Vec3,
        #[serde(default = "zero_vec3")]
        c2: Vec3,
        #[serde(default = "zero_vec3")]
        end: Vec3,
        #[serde(default)]
        count: u32,
    },
    AddFourierSeries {
        #[serde(default)]
        count: u32,
        #[serde(default)]
        scale: f64,
        #[serde(default)]
        terms: Vec<Term>,
    },

    // Containers. Children evaluate in a fresh sub-context.
    AddBuilder {
        #[serde(default = "zero_vec3")]
        offset: Vec3,
        #[serde(default)]
        children: Vec<Node>,
    },
    WithBuilder {
        #[serde(default)]
        children: Vec<Node>,
    },
    AddWith {
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        count: u32,
        #[serde(default)]
        face: bool,
        #[serde(default)]
        reverse: bool,
        #[serde(default = "zero_vec3")]
        face_offset: Vec3,
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl NodeKind {
    /// Registry tag of this kind
    pub fn tag(&self) -> KindTag {
        match self {
            NodeKind::Axis { .. } => KindTag::Axis,
            NodeKind::Scale { .. } => KindTag::Scale,
            NodeKind::RotateAsAxis { .. } => KindTag::RotateAsAxis,
            NodeKind::RotateTo { .. } => KindTag::RotateTo,
            NodeKind::AddPoint { .. } => KindTag::AddPoint,
            NodeKind::AddLine { .. } => KindTag::AddLine,
            NodeKind::AddCircle { .. } => KindTag::AddCircle,
            NodeKind::AddArc { .. } => KindTag::AddArc,
            NodeKind::AddEllipse { .. } => KindTag::AddEllipse,
            NodeKind::AddPolygon { .. } => KindTag::AddPolygon,
            NodeKind::AddStar { .. } => KindTag::AddStar,
            NodeKind::AddSpiral { .. } => KindTag::AddSpiral,
            NodeKind::AddHelix { .. } => KindTag::AddHelix,
            NodeKind::AddRose { .. } => KindTag::AddRose,
            NodeKind::AddWave { .. } => KindTag::AddWave,
            NodeKind::AddLissajous { .. } => KindTag::AddLissajous,
            NodeKind::AddGrid { .. } => KindTag::AddGrid,
            NodeKind::AddBox { .. } => KindTag::AddBox,
            NodeKind::AddSphere { .. } => KindTag::AddSphere,
            NodeKind::AddCylinder { .. } => KindTag::AddCylinder,
            NodeKind::AddCone { .. } => KindTag::AddCone,
            NodeKind::AddTorus { .. } => KindTag::AddTorus,
            NodeKind::AddRing { .. } => KindTag::AddRing,
            NodeKind::AddBezier { .. } => KindTag::AddBezier,
            NodeKind::AddBezier4 { .. } => KindTag::AddBezier4,
            NodeKind::AddFourierSeries { .. } => KindTag::AddFourierSeries,
            NodeKind::AddBuilder { .. } => KindTag::AddBuilder,
            NodeKind::WithBuilder { .. } => KindTag::WithBuilder,
            NodeKind::AddWith { .. } => KindTag::AddWith,
        }
    }

    /// Nested child list for container kinds
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            NodeKind::AddBuilder { children, .. }
            | NodeKind::WithBuilder { children }
            | NodeKind::AddWith { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            NodeKind::AddBuilder { children, .. }
            | NodeKind::WithBuilder { children }
            | NodeKind::AddWith { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }
}

/// Fieldless companion to [`NodeKind`] enumerating the closed registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Axis,
    Scale,
    RotateAsAxis,
    RotateTo,
    AddPoint,
    AddLine,
    AddCircle,
    AddArc,
    AddEllipse,
    AddPolygon,
    AddStar,
    AddSpiral,
    AddHelix,
    AddRose,
    AddWave,
    AddLissajous,
    AddGrid,
    AddBox,
    AddSphere,
    AddCylinder,
    AddCone,
    AddTorus,
    AddRing,
    AddBezier,
    AddBezier4,
    AddFourierSeries,
    AddBuilder,
    WithBuilder,
    AddWith,
}

impl KindTag {
    /// Every registered kind, in display order
    pub const ALL: [KindTag; 29] = [
        KindTag::Axis,
        KindTag::Scale,
        KindTag::RotateAsAxis,
        KindTag::RotateTo,
        KindTag::AddPoint,
        KindTag::AddLine,
        KindTag::AddCircle,
        KindTag::AddArc,
        KindTag::AddEllipse,
        KindTag::AddPolygon,
        KindTag::AddStar,
        KindTag::AddSpiral,
        KindTag::AddHelix,
        KindTag::AddRose,
        KindTag::AddWave,
        KindTag::AddLissajous,
        KindTag::AddGrid,
        KindTag::AddBox,
        KindTag::AddSphere,
        KindTag::AddCylinder,
        KindTag::AddCone,
        KindTag::AddTorus,
        KindTag::AddRing,
        KindTag::AddBezier,
        KindTag::AddBezier4,
        KindTag::AddFourierSeries,
        KindTag::AddBuilder,
        KindTag::WithBuilder,
        KindTag::AddWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KindTag::Axis => "axis",
            KindTag::Scale => "scale",
            KindTag::RotateAsAxis => "rotate_as_axis",
            KindTag::RotateTo => "rotate_to",
            KindTag::AddPoint => "add_point",
            KindTag::AddLine => "add_line",
            KindTag::AddCircle => "add_circle",
            KindTag::AddArc => "add_arc",
            KindTag::AddEllipse => "add_ellipse",
            KindTag::AddPolygon => "add_polygon",
            KindTag::AddStar => "add_star",
            KindTag::AddSpiral => "add_spiral",
            KindTag::AddHelix => "add_helix",
            KindTag::AddRose => "add_rose",
            KindTag::AddWave => "add_wave",
            KindTag::AddLissajous => "add_lissajous",
            KindTag::AddGrid => "add_grid",
            KindTag::AddBox => "add_box",
            KindTag::AddSphere => "add_sphere",
            KindTag::AddCylinder => "add_cylinder",
            KindTag::AddCone => "add_cone",
            KindTag::AddTorus => "add_torus",
            KindTag::AddRing => "add_ring",
            KindTag::AddBezier => "add_bezier",
            KindTag::AddBezier4 => "add_bezier_4",
            KindTag::AddFourierSeries => "add_fourier_series",
            KindTag::AddBuilder => "add_builder",
            KindTag::WithBuilder => "with_builder",
            KindTag::AddWith => "add_with",
        }
    }

    pub fn from_str(value: &str) -> Option<KindTag> {
        KindTag::ALL.iter().copied().find(|tag| tag.as_str() == value)
    }

    /// Construct a node of this kind with its default parameter set
    pub fn default_node(&self) -> Node {
        let kind = match self {
            KindTag::Axis => NodeKind::Axis {
                v: Vec3::new(0.0, 1.0, 0.0),
            },
            KindTag::Scale => NodeKind::Scale { factor: 1.0 },
            KindTag::RotateAsAxis => NodeKind::RotateAsAxis {
                angle: 0.0,
                unit: AngleUnit::Deg,
                axis: None,
            },
            KindTag::RotateTo => NodeKind::RotateTo {
                origin: None,
                end: None,
                to: None,
            },
            KindTag::AddPoint => NodeKind::AddPoint {
                offset: Vec3::zeros(),
                style: PointStyle::Inline,
            },
            KindTag::AddLine => NodeKind::AddLine {
                start: Vec3::zeros(),
                end: Vec3::new(1.0, 0.0, 0.0),
                count: 16,
            },
            KindTag::AddCircle => NodeKind::AddCircle { r: 1.0, count: 32 },
            KindTag::AddArc => NodeKind::AddArc {
                r: 1.0,
                from: 0.0,
                to: 90.0,
                unit: AngleUnit::Deg,
                count: 16,
            },
            KindTag::AddEllipse => NodeKind::AddEllipse {
                rx: 1.0,
                rz: 0.5,
                count: 32,
            },
            KindTag::AddPolygon => NodeKind::AddPolygon {
                r: 1.0,
                sides: 6,
                count: 8,
            },
            KindTag::AddStar => NodeKind::AddStar {
                outer: 1.0,
                inner: 0.5,
                points: 5,
                count: 8,
            },
            KindTag::AddSpiral => NodeKind::AddSpiral {
                r: 1.0,
                turns: 3.0,
                count: 64,
            },
            KindTag::AddHelix => NodeKind::AddHelix {
                r: 1.0,
                height: 2.0,
                turns: 3.0,
                count: 64,
            },
            KindTag::AddRose => NodeKind::AddRose {
                r: 1.0,
                petals: 4,
                count: 128,
            },
            KindTag::AddWave => NodeKind::AddWave {
                length: 2.0,
                amplitude: 0.5,
                cycles: 3.0,
                count: 64,
            },
            KindTag::AddLissajous => NodeKind::AddLissajous {
                rx: 1.0,
                rz: 1.0,
                a: 3.0,
                b: 2.0,
                phase: 90.0,
                unit: AngleUnit::Deg,
                count: 128,
            },
            KindTag::AddGrid => NodeKind::AddGrid {
                width: 2.0,
                depth: 2.0,
                cols: 8,
                rows: 8,
            },
            KindTag::AddBox => NodeKind::AddBox {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
                count: 4,
            },
            KindTag::AddSphere => NodeKind::AddSphere {
                r: 1.0,
                rings: 8,
                segments: 16,
            },
            KindTag::AddCylinder => NodeKind::AddCylinder {
                r: 1.0,
                height: 2.0,
                rings: 8,
                segments: 16,
            },
            KindTag::AddCone => NodeKind::AddCone {
                r1: 1.0,
                r2: 0.5,
                height: 2.0,
                rings: 8,
                segments: 16,
            },
            KindTag::AddTorus => NodeKind::AddTorus {
                major: 1.0,
                minor: 0.25,
                rings: 24,
                segments: 12,
            },
            KindTag::AddRing => NodeKind::AddRing {
                inner: 0.5,
                outer: 1.0,
                rings: 4,
                count: 32,
            },
            KindTag::AddBezier => NodeKind::AddBezier {
                start: Vec3::zeros(),
                control: Vec3::new(0.5, 1.0, 0.0),
                end: Vec3::new(1.0, 0.0, 0.0),
                count: 16,
            },
            KindTag::AddBezier4 => NodeKind::AddBezier4 {
                start: Vec3::zeros(),
                c1: Vec3::new(0.25, 1.0, 0.0),
                c2: Vec3::new(0.75, 1.0, 0.0),
                end: Vec3::new(1.0, 0.0, 0.0),
                count: 16,
            },
            KindTag::AddFourierSeries => NodeKind::AddFourierSeries {
                count: 128,
                scale: 1.0,
                terms: Vec::new(),
            },
            KindTag::AddBuilder => NodeKind::AddBuilder {
                offset: Vec3::zeros(),
                children: Vec::new(),
            },
            KindTag::WithBuilder => NodeKind::WithBuilder {
                children: Vec::new(),
            },
            KindTag::AddWith => NodeKind::AddWith {
                radius: 1.0,
                count: 4,
                face: false,
                reverse: false,
                face_offset: Vec3::zeros(),
                children: Vec::new(),
            },
        };
        Node::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_string_round_trip() {
        for tag in KindTag::ALL {
            assert_eq!(KindTag::from_str(tag.as_str()), Some(tag));
        }
        assert_eq!(KindTag::from_str("bogus"), None);
    }

    #[test]
    fn test_default_node_matches_tag() {
        for tag in KindTag::ALL {
            assert_eq!(tag.default_node().kind.tag(), tag);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let node = Node::new(NodeKind::AddLine {
            start: Vec3::zeros(),
            end: Vec3::new(2.0, 0.0, 0.0),
            count: 3,
        });
        let json = serde_json::to_string(&node).unwrap();
        let parsed: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn test_bezier_4_tag_spelling() {
        let node = KindTag::AddBezier4.default_node();
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"kind\":\"add_bezier_4\""));
    }

    #[test]
    fn test_missing_params_default_to_zero() {
        let node: Node = serde_json::from_str(r#"{"id":"a","kind":"add_line"}"#).unwrap();
        assert_eq!(
            node.kind,
            NodeKind::AddLine {
                start: Vec3::zeros(),
                end: Vec3::zeros(),
                count: 0,
            }
        );
    }

    #[test]
    fn test_display_flags_tolerated() {
        // UI state travels with persisted nodes and is ignored here
        let json = r#"{"id":"a","kind":"add_circle","r":1.0,"count":4,"collapsed":true}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind.tag(), KindTag::AddCircle);
    }

    #[test]
    fn test_fresh_ids_unique() {
        let a = KindTag::AddPoint.default_node();
        let b = KindTag::AddPoint.default_node();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_container_children_access() {
        let mut node = KindTag::AddBuilder.default_node();
        assert!(node.kind.is_container());
        node.kind
            .children_mut()
            .unwrap()
            .push(KindTag::AddPoint.default_node());
        assert_eq!(node.kind.children().unwrap().len(), 1);
        assert!(KindTag::AddCircle.default_node().kind.children().is_none());
    }
}
