// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Tree evaluator - walks a node list into a point cloud with provenance

use super::{Node, NodeKind, Vec3};
use crate::geometry::{orient, sampler};
use crate::utils::math::{finite_or_zero, finite_vec3};
use ahash::AHashMap;
use serde::Serialize;
use std::f64::consts::TAU;

/// Half-open index range into the evaluated point list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

/// Result of one evaluation pass: the flat point list plus the index range
/// each node contributed to it
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub points: Vec<Vec3>,
    pub segments: AHashMap<String, Segment>,
}

/// Starting coordinate axis for any child list
pub fn default_axis() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Evaluate a node list left to right against a single mutable accumulator.
/// The axis register is never inherited across container boundaries; every
/// nested child list starts from [`default_axis`].
pub fn evaluate(children: &[Node], initial_axis: Vec3) -> Evaluation {
    let mut evaluation = Evaluation {
        points: Vec::new(),
        segments: AHashMap::new(),
    };
    let mut axis = initial_axis;
    for node in children {
        apply(node, &mut evaluation, &mut axis);
    }
    evaluation
}

/// Register the sampled points under the node id. Nothing is registered when
/// the sample is empty, so no-op nodes never appear in the segment map.
fn record(evaluation: &mut Evaluation, id: &str, sampled: Vec<Vec3>) {
    if sampled.is_empty() {
        return;
    }
    let start = evaluation.points.len();
    evaluation.points.extend(sampled);
    evaluation.segments.insert(
        id.to_string(),
        Segment {
            start,
            end: evaluation.points.len(),
        },
    );
}

/// Append a sub-evaluation, translated, keeping both the container segment
/// and the child segments remapped into the parent index space
fn splice(evaluation: &mut Evaluation, id: &str, sub: Evaluation, offset: Vec3) {
    if sub.points.is_empty() {
        return;
    }
    let base = evaluation.points.len();
    evaluation.points.extend(sub.points.iter().map(|p| p + offset));
    for (child_id, segment) in sub.segments {
        evaluation.segments.insert(
            child_id,
            Segment {
                start: segment.start + base,
                end: segment.end + base,
            },
        );
    }
    evaluation.segments.insert(
        id.to_string(),
        Segment {
            start: base,
            end: evaluation.points.len(),
        },
    );
}

fn apply(node: &Node, evaluation: &mut Evaluation, axis: &mut Vec3) {
    match &node.kind {
        NodeKind::Axis { v } => *axis = finite_vec3(*v),

        NodeKind::Scale { factor } => {
            let factor = finite_or_zero(*factor);
            if factor > 0.0 {
                for p in evaluation.points.iter_mut() {
                    *p *= factor;
                }
            }
        }

        NodeKind::RotateAsAxis {
            angle,
            unit,
            axis: custom,
        } => {
            let rad = unit.to_radians(finite_or_zero(*angle));
            let rotation_axis = custom.map(finite_vec3).unwrap_or(*axis);
            orient::rotate_about(&mut evaluation.points, rotation_axis, rad);
        }

        NodeKind::RotateTo { origin, end, to } => {
            let target = match (origin, end) {
                (Some(origin), Some(end)) => finite_vec3(*end) - finite_vec3(*origin),
                _ => to.map(finite_vec3).unwrap_or_else(Vec3::zeros),
            };
            if let Some(rotation) = orient::rotation_to(*axis, target) {
                for p in evaluation.points.iter_mut() {
                    *p = rotation * *p;
                }
            }
        }

        NodeKind::AddPoint { offset, .. } => {
            record(evaluation, &node.id, vec![finite_vec3(*offset)]);
        }

        NodeKind::AddLine { start, end, count } => {
            record(evaluation, &node.id, sampler::sample_line(*start, *end, *count));
        }

        NodeKind::AddCircle { r, count } => {
            record(evaluation, &node.id, sampler::sample_circle(*r, *count));
        }

        NodeKind::AddArc {
            r,
            from,
            to,
            unit,
            count,
        } => {
            let from_rad = unit.to_radians(finite_or_zero(*from));
            let to_rad = unit.to_radians(finite_or_zero(*to));
            record(
                evaluation,
                &node.id,
                sampler::sample_arc(*r, from_rad, to_rad, *count),
            );
        }

        NodeKind::AddEllipse { rx, rz, count } => {
            record(evaluation, &node.id, sampler::sample_ellipse(*rx, *rz, *count));
        }

        NodeKind::AddPolygon { r, sides, count } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_polygon(*r, *sides, *count),
            );
        }

        NodeKind::AddStar {
            outer,
            inner,
            points,
            count,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_star(*outer, *inner, *points, *count),
            );
        }

        NodeKind::AddSpiral { r, turns, count } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_spiral(*r, *turns, *count),
            );
        }

        NodeKind::AddHelix {
            r,
            height,
            turns,
            count,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_helix(*r, *height, *turns, *count),
            );
        }

        NodeKind::AddRose { r, petals, count } => {
            record(evaluation, &node.id, sampler::sample_rose(*r, *petals, *count));
        }

        NodeKind::AddWave {
            length,
            amplitude,
            cycles,
            count,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_wave(*length, *amplitude, *cycles, *count),
            );
        }

        NodeKind::AddLissajous {
            rx,
            rz,
            a,
            b,
            phase,
            unit,
            count,
        } => {
            let phase_rad = unit.to_radians(finite_or_zero(*phase));
            record(
                evaluation,
                &node.id,
                sampler::sample_lissajous(*rx, *rz, *a, *b, phase_rad, *count),
            );
        }

        NodeKind::AddGrid {
            width,
            depth,
            cols,
            rows,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_grid(*width, *depth, *cols, *rows),
            );
        }

        NodeKind::AddBox {
            width,
            height,
            depth,
            count,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_box(*width, *height, *depth, *count),
            );
        }

        NodeKind::AddSphere { r, rings, segments } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_sphere(*r, *rings, *segments),
            );
        }

        NodeKind::AddCylinder {
            r,
            height,
            rings,
            segments,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_cylinder(*r, *height, *rings, *segments),
            );
        }

        NodeKind::AddCone {
            r1,
            r2,
            height,
            rings,
            segments,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_cone(*r1, *r2, *height, *rings, *segments),
            );
        }

        NodeKind::AddTorus {
            major,
            minor,
            rings,
            segments,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_torus(*major, *minor, *rings, *segments),
            );
        }

        NodeKind::AddRing {
            inner,
            outer,
            rings,
            count,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_ring(*inner, *outer, *rings, *count),
            );
        }

        NodeKind::AddBezier {
            start,
            control,
            end,
            count,
        } => {
            let (c1, c2) = sampler::raise_to_cubic(*start, *control, *end);
            record(
                evaluation,
                &node.id,
                sampler::sample_cubic_bezier(*start, c1, c2, *end, *count),
            );
        }

        NodeKind::AddBezier4 {
            start,
            c1,
            c2,
            end,
            count,
        } => {
            record(
                evaluation,
                &node.id,
                sampler::sample_cubic_bezier(*start, *c1, *c2, *end, *count),
            );
        }

        NodeKind::AddFourierSeries { count, scale, terms } => {
            let terms: Vec<(f64, f64, f64)> =
                terms.iter().map(|t| (t.r, t.w, t.phase())).collect();
            record(
                evaluation,
                &node.id,
                sampler::sample_fourier_series(&terms, *count, *scale),
            );
        }

        NodeKind::AddBuilder { offset, children } => {
            let sub = evaluate(children, default_axis());
            splice(evaluation, &node.id, sub, finite_vec3(*offset));
        }

        NodeKind::WithBuilder { children } => {
            let sub = evaluate(children, default_axis());
            splice(evaluation, &node.id, sub, Vec3::zeros());
        }

        NodeKind::AddWith {
            radius,
            count,
            face,
            reverse,
            face_offset,
            children,
        } => {
            let sub = evaluate(children, default_axis());
            if sub.points.is_empty() || *count == 0 {
                return;
            }
            let radius = finite_or_zero(*radius);
            let target = finite_vec3(*face_offset);
            let base = evaluation.points.len();
            for i in 0..*count {
                let theta = TAU * i as f64 / *count as f64;
                let vertex = Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin());
                let mut placed = sub.points.clone();
                if *face {
                    let mut forward = target - vertex;
                    if *reverse {
                        forward = -forward;
                    }
                    orient::align_upright(&mut placed, Vec3::z(), forward);
                }
                evaluation.points.extend(placed.iter().map(|p| p + vertex));
            }
            // one replicated range only: a child id would otherwise map to
            // `count` conflicting ranges
            evaluation.segments.insert(
                node.id.clone(),
                Segment {
                    start: base,
                    end: evaluation.points.len(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{AngleUnit, PointStyle};
    use approx::assert_relative_eq;

    fn point(x: f64, y: f64, z: f64) -> Node {
        Node::new(NodeKind::AddPoint {
            offset: Vec3::new(x, y, z),
            style: PointStyle::Inline,
        })
    }

    #[test]
    fn test_line_scenario() {
        let nodes = vec![Node::new(NodeKind::AddLine {
            start: Vec3::zeros(),
            end: Vec3::new(2.0, 0.0, 0.0),
            count: 3,
        })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points.len(), 3);
        assert_relative_eq!(evaluation.points[1].x, 1.0);
    }

    #[test]
    fn test_circle_scenario() {
        let nodes = vec![Node::new(NodeKind::AddCircle { r: 1.0, count: 4 })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points.len(), 4);
        for p in &evaluation.points {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
        }
        // 90 degree spacing: consecutive points are orthogonal
        assert_relative_eq!(
            evaluation.points[0].dot(&evaluation.points[1]),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_add_builder_translates_children() {
        let nodes = vec![Node::new(NodeKind::AddBuilder {
            offset: Vec3::new(1.0, 2.0, 3.0),
            children: vec![point(0.5, 0.0, 0.0)],
        })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points.len(), 1);
        assert_relative_eq!(evaluation.points[0].x, 1.5);
        assert_relative_eq!(evaluation.points[0].y, 2.0);
        assert_relative_eq!(evaluation.points[0].z, 3.0);
    }

    #[test]
    fn test_with_builder_does_not_translate() {
        let nodes = vec![Node::new(NodeKind::WithBuilder {
            children: vec![point(0.5, 0.25, 0.0)],
        })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points.len(), 1);
        assert_relative_eq!(evaluation.points[0].x, 0.5);
        assert_relative_eq!(evaluation.points[0].y, 0.25);
    }

    #[test]
    fn test_replication_scenario() {
        let nodes = vec![Node::new(NodeKind::AddWith {
            radius: 3.0,
            count: 4,
            face: false,
            reverse: false,
            face_offset: Vec3::zeros(),
            children: vec![point(0.0, 0.0, 0.0)],
        })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points.len(), 4);
        for p in &evaluation.points {
            assert_relative_eq!(p.norm(), 3.0, epsilon = 1e-12);
            assert_relative_eq!(p.y, 0.0);
        }
        assert_relative_eq!(
            evaluation.points[0].dot(&evaluation.points[1]),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rotate_to_zero_target_is_noop() {
        let nodes = vec![
            point(1.0, 2.0, 3.0),
            Node::new(NodeKind::RotateTo {
                origin: None,
                end: None,
                to: Some(Vec3::zeros()),
            }),
        ];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points[0], Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotate_to_origin_end_pair() {
        let nodes = vec![
            point(0.0, 1.0, 0.0),
            Node::new(NodeKind::RotateTo {
                origin: Some(Vec3::zeros()),
                end: Some(Vec3::new(1.0, 0.0, 0.0)),
                to: None,
            }),
        ];
        let evaluation = evaluate(&nodes, default_axis());
        // the +Y axis point follows the axis onto +X
        assert_relative_eq!(evaluation.points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluation.points[0].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_mutates_without_segment() {
        let scale = Node::new(NodeKind::Scale { factor: 2.0 });
        let scale_id = scale.id.clone();
        let nodes = vec![point(1.0, 0.0, 0.0), scale];
        let evaluation = evaluate(&nodes, default_axis());
        assert_relative_eq!(evaluation.points[0].x, 2.0);
        assert!(!evaluation.segments.contains_key(&scale_id));
    }

    #[test]
    fn test_scale_ignores_non_positive_factor() {
        let nodes = vec![point(1.0, 0.0, 0.0), Node::new(NodeKind::Scale { factor: -2.0 })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_relative_eq!(evaluation.points[0].x, 1.0);
    }

    #[test]
    fn test_rotate_as_axis_uses_axis_register() {
        let nodes = vec![
            point(0.0, 0.0, 1.0),
            Node::new(NodeKind::Axis {
                v: Vec3::new(0.0, 1.0, 0.0),
            }),
            Node::new(NodeKind::RotateAsAxis {
                angle: 90.0,
                unit: AngleUnit::Deg,
                axis: None,
            }),
        ];
        let evaluation = evaluate(&nodes, default_axis());
        assert_relative_eq!(evaluation.points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluation.points[0].z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_not_inherited_into_containers() {
        // the parent list switches its axis to +X; the nested child list
        // still rotates about the default +Y
        let nodes = vec![
            Node::new(NodeKind::Axis {
                v: Vec3::new(1.0, 0.0, 0.0),
            }),
            Node::new(NodeKind::WithBuilder {
                children: vec![
                    point(0.0, 0.0, 1.0),
                    Node::new(NodeKind::RotateAsAxis {
                        angle: 90.0,
                        unit: AngleUnit::Deg,
                        axis: None,
                    }),
                ],
            }),
        ];
        let evaluation = evaluate(&nodes, default_axis());
        assert_relative_eq!(evaluation.points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluation.points[0].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_coverage_is_disjoint_and_complete() {
        let a = Node::new(NodeKind::AddLine {
            start: Vec3::zeros(),
            end: Vec3::new(1.0, 0.0, 0.0),
            count: 5,
        });
        let b = Node::new(NodeKind::AddCircle { r: 1.0, count: 8 });
        let c = point(0.0, 1.0, 0.0);
        let ids = [a.id.clone(), b.id.clone(), c.id.clone()];
        let evaluation = evaluate(&[a, b, c], default_axis());

        let mut covered = 0;
        let mut ranges: Vec<Segment> = Vec::new();
        for id in &ids {
            let segment = evaluation.segments[id];
            covered += segment.end - segment.start;
            ranges.push(segment);
        }
        assert_eq!(covered, evaluation.points.len());
        ranges.sort_by_key(|s| s.start);
        for pair in ranges.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_nested_segments_remap_into_parent_space() {
        let inner = point(0.0, 0.0, 0.0);
        let inner_id = inner.id.clone();
        let builder = Node::new(NodeKind::AddBuilder {
            offset: Vec3::new(1.0, 0.0, 0.0),
            children: vec![inner],
        });
        let builder_id = builder.id.clone();
        let lead = Node::new(NodeKind::AddCircle { r: 1.0, count: 8 });
        let evaluation = evaluate(&[lead, builder], default_axis());

        let container = evaluation.segments[&builder_id];
        assert_eq!(container, Segment { start: 8, end: 9 });
        // the nested point keeps its own addressable range, shifted
        assert_eq!(evaluation.segments[&inner_id], Segment { start: 8, end: 9 });
    }

    #[test]
    fn test_empty_container_registers_no_segment() {
        let builder = Node::new(NodeKind::AddBuilder {
            offset: Vec3::new(1.0, 0.0, 0.0),
            children: Vec::new(),
        });
        let builder_id = builder.id.clone();
        let evaluation = evaluate(&[builder], default_axis());
        assert!(evaluation.points.is_empty());
        assert!(!evaluation.segments.contains_key(&builder_id));
    }

    #[test]
    fn test_add_with_faces_target() {
        // a probe point on the sub-builder's forward axis turns toward the
        // polygon center at every vertex
        let nodes = vec![Node::new(NodeKind::AddWith {
            radius: 2.0,
            count: 4,
            face: true,
            reverse: false,
            face_offset: Vec3::zeros(),
            children: vec![point(0.0, 0.0, 1.0)],
        })];
        let evaluation = evaluate(&nodes, default_axis());
        assert_eq!(evaluation.points.len(), 4);
        for p in &evaluation.points {
            // one unit closer to the origin than the vertex radius
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_add_with_reverse_faces_away() {
        let nodes = vec![Node::new(NodeKind::AddWith {
            radius: 2.0,
            count: 4,
            face: true,
            reverse: true,
            face_offset: Vec3::zeros(),
            children: vec![point(0.0, 0.0, 1.0)],
        })];
        let evaluation = evaluate(&nodes, default_axis());
        for p in &evaluation.points {
            assert_relative_eq!(p.norm(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_transforms_scoped_to_container() {
        // scaling inside a container leaves the parent's earlier points alone
        let nodes = vec![
            point(1.0, 0.0, 0.0),
            Node::new(NodeKind::WithBuilder {
                children: vec![point(0.0, 0.0, 1.0), Node::new(NodeKind::Scale { factor: 5.0 })],
            }),
        ];
        let evaluation = evaluate(&nodes, default_axis());
        assert_relative_eq!(evaluation.points[0].x, 1.0);
        assert_relative_eq!(evaluation.points[1].z, 5.0);
    }
}
