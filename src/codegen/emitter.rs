// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Source emitter - translates a node list into a fluent builder chain

use super::format::{collapse_blank_lines, fmt_num, fmt_vec3};
use crate::config::EmitOptions;
use crate::geometry::sampler::raise_to_cubic;
use crate::tree::{Node, NodeKind, PointStyle, Vec3};
use serde::{Deserialize, Serialize};

/// Trailing call appended after all nodes at top level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndMode {
    /// Return the live mutable point list
    List,
    /// Return an immutable copy
    Clone,
    /// Leave the builder object unterminated
    #[default]
    Builder,
}

impl EndMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndMode::List => "list",
            EndMode::Clone => "clone",
            EndMode::Builder => "builder",
        }
    }

    pub fn parse(value: &str) -> Option<EndMode> {
        match value {
            "list" => Some(EndMode::List),
            "clone" => Some(EndMode::Clone),
            "builder" => Some(EndMode::Builder),
            _ => None,
        }
    }
}

/// Shared emission state threaded through all recursion. Declarations hoist
/// to the outermost scope regardless of nesting depth.
#[derive(Debug, Default)]
struct EmitContext {
    decls: Vec<String>,
    point_counter: u32,
}

/// Emit the builder-chain source text for a node list
pub fn emit(children: &[Node], options: &EmitOptions) -> String {
    let mut ctx = EmitContext::default();
    let mut lines = vec![format!("{}()", options.builder_class)];
    for node in children {
        emit_node(node, options, &mut ctx, 1, &mut lines);
    }
    match options.end_mode {
        EndMode::List => lines.push(format!("{}.points()", options.indent)),
        EndMode::Clone => lines.push(format!("{}.build()", options.indent)),
        EndMode::Builder => {}
    }

    let text = if ctx.decls.is_empty() {
        lines.join("\n")
    } else {
        // hoisted declarations need a scope of their own
        let mut wrapped = vec!["run {".to_string()];
        for decl in &ctx.decls {
            wrapped.push(format!("{}{}", options.indent, decl));
        }
        for line in &lines {
            wrapped.push(format!("{}{}", options.indent, line));
        }
        wrapped.push("}".to_string());
        wrapped.join("\n")
    };
    collapse_blank_lines(&text)
}

fn emit_node(
    node: &Node,
    options: &EmitOptions,
    ctx: &mut EmitContext,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let pad = options.indent.repeat(depth);
    match &node.kind {
        NodeKind::Axis { v } => lines.push(format!("{}.axis({})", pad, fmt_vec3(v))),

        NodeKind::Scale { factor } => {
            lines.push(format!("{}.scale({})", pad, fmt_num(*factor)));
        }

        NodeKind::RotateAsAxis { angle, unit, axis } => {
            let rad = fmt_num(unit.to_radians(*angle));
            match axis {
                Some(axis) => {
                    lines.push(format!("{}.rotateAsAxis({}, {})", pad, rad, fmt_vec3(axis)))
                }
                None => lines.push(format!("{}.rotateAsAxis({})", pad, rad)),
            }
        }

        NodeKind::RotateTo { origin, end, to } => match (origin, end) {
            (Some(origin), Some(end)) => lines.push(format!(
                "{}.rotateTo({}, {})",
                pad,
                fmt_vec3(origin),
                fmt_vec3(end)
            )),
            _ => {
                let to = to.unwrap_or_else(Vec3::zeros);
                lines.push(format!("{}.rotateTo({})", pad, fmt_vec3(&to)));
            }
        },

        NodeKind::AddPoint { offset, style } => match style {
            PointStyle::Inline => {
                lines.push(format!("{}.addPoint({})", pad, fmt_vec3(offset)));
            }
            PointStyle::Scalars => lines.push(format!(
                "{}.addPoint({}, {}, {})",
                pad,
                fmt_num(offset.x),
                fmt_num(offset.y),
                fmt_num(offset.z)
            )),
            PointStyle::Named => {
                ctx.point_counter += 1;
                let name = format!("point{}", ctx.point_counter);
                ctx.decls.push(format!("val {} = {}", name, fmt_vec3(offset)));
                lines.push(format!("{}.addPoint({})", pad, name));
            }
        },

        NodeKind::AddLine { start, end, count } => lines.push(format!(
            "{}.addLine({}, {}, {})",
            pad,
            fmt_vec3(start),
            fmt_vec3(end),
            count
        )),

        NodeKind::AddCircle { r, count } => {
            lines.push(format!("{}.addCircle({}, {})", pad, fmt_num(*r), count));
        }

        NodeKind::AddArc {
            r,
            from,
            to,
            unit,
            count,
        } => lines.push(format!(
            "{}.addArc({}, {}, {}, {})",
            pad,
            fmt_num(*r),
            fmt_num(unit.to_radians(*from)),
            fmt_num(unit.to_radians(*to)),
            count
        )),

        NodeKind::AddEllipse { rx, rz, count } => lines.push(format!(
            "{}.addEllipse({}, {}, {})",
            pad,
            fmt_num(*rx),
            fmt_num(*rz),
            count
        )),

        NodeKind::AddPolygon { r, sides, count } => lines.push(format!(
            "{}.addPolygon({}, {}, {})",
            pad,
            fmt_num(*r),
            sides,
            count
        )),

        NodeKind::AddStar {
            outer,
            inner,
            points,
            count,
        } => lines.push(format!(
            "{}.addStar({}, {}, {}, {})",
            pad,
            fmt_num(*outer),
            fmt_num(*inner),
            points,
            count
        )),

        NodeKind::AddSpiral { r, turns, count } => lines.push(format!(
            "{}.addSpiral({}, {}, {})",
            pad,
            fmt_num(*r),
            fmt_num(*turns),
            count
        )),

        NodeKind::AddHelix {
            r,
            height,
            turns,
            count,
        } => lines.push(format!(
            "{}.addHelix({}, {}, {}, {})",
            pad,
            fmt_num(*r),
            fmt_num(*height),
            fmt_num(*turns),
            count
        )),

        NodeKind::AddRose { r, petals, count } => lines.push(format!(
            "{}.addRose({}, {}, {})",
            pad,
            fmt_num(*r),
            petals,
            count
        )),

        NodeKind::AddWave {
            length,
            amplitude,
            cycles,
            count,
        } => lines.push(format!(
            "{}.addWave({}, {}, {}, {})",
            pad,
            fmt_num(*length),
            fmt_num(*amplitude),
            fmt_num(*cycles),
            count
        )),

        NodeKind::AddLissajous {
            rx,
            rz,
            a,
            b,
            phase,
            unit,
            count,
        } => lines.push(format!(
            "{}.addLissajous({}, {}, {}, {}, {}, {})",
            pad,
            fmt_num(*rx),
            fmt_num(*rz),
            fmt_num(*a),
            fmt_num(*b),
            fmt_num(unit.to_radians(*phase)),
            count
        )),

        NodeKind::AddGrid {
            width,
            depth,
            cols,
            rows,
        } => lines.push(format!(
            "{}.addGrid({}, {}, {}, {})",
            pad,
            fmt_num(*width),
            fmt_num(*depth),
            cols,
            rows
        )),

        NodeKind::AddBox {
            width,
            height,
            depth,
            count,
        } => lines.push(format!(
            "{}.addBox({}, {}, {}, {})",
            pad,
            fmt_num(*width),
            fmt_num(*height),
            fmt_num(*depth),
            count
        )),

        NodeKind::AddSphere { r, rings, segments } => lines.push(format!(
            "{}.addSphere({}, {}, {})",
            pad,
            fmt_num(*r),
            rings,
            segments
        )),

        NodeKind::AddCylinder {
            r,
            height,
            rings,
            segments,
        } => lines.push(format!(
            "{}.addCylinder({}, {}, {}, {})",
            pad,
            fmt_num(*r),
            fmt_num(*height),
            rings,
            segments
        )),

        NodeKind::AddCone {
            r1,
            r2,
            height,
            rings,
            segments,
        } => lines.push(format!(
            "{}.addCone({}, {}, {}, {}, {})",
            pad,
            fmt_num(*r1),
            fmt_num(*r2),
            fmt_num(*height),
            rings,
            segments
        )),

        NodeKind::AddTorus {
            major,
            minor,
            rings,
            segments,
        } => lines.push(format!(
            "{}.addTorus({}, {}, {}, {})",
            pad,
            fmt_num(*major),
            fmt_num(*minor),
            rings,
            segments
        )),

        NodeKind::AddRing {
            inner,
            outer,
            rings,
            count,
        } => lines.push(format!(
            "{}.addRing({}, {}, {}, {})",
            pad,
            fmt_num(*inner),
            fmt_num(*outer),
            rings,
            count
        )),

        NodeKind::AddBezier {
            start,
            control,
            end,
            count,
        } => {
            let (c1, c2) = raise_to_cubic(*start, *control, *end);
            lines.push(bezier_call(&pad, *start, c1, c2, *end, *count));
        }

        NodeKind::AddBezier4 {
            start,
            c1,
            c2,
            end,
            count,
        } => lines.push(bezier_call(&pad, *start, *c1, *c2, *end, *count)),

        NodeKind::AddFourierSeries { count, scale, terms } => {
            let tail = format!(", {}, {})", count, fmt_num(*scale));
            if terms.is_empty() {
                lines.push(format!("{}.addFourierSeries(FourierSeries(){}", pad, tail));
            } else {
                lines.push(format!("{}.addFourierSeries(FourierSeries()", pad));
                let term_pad = options.indent.repeat(depth + 1);
                for (i, term) in terms.iter().enumerate() {
                    let mut line = format!(
                        "{}.term({}, {}, {})",
                        term_pad,
                        fmt_num(term.r),
                        fmt_num(term.w),
                        fmt_num(term.phase())
                    );
                    if i == terms.len() - 1 {
                        line.push_str(&tail);
                    }
                    lines.push(line);
                }
            }
        }

        NodeKind::AddBuilder { offset, children } => {
            lines.push(format!(
                "{}.addBuilder({}, {}()",
                pad,
                fmt_vec3(offset),
                options.builder_class
            ));
            for child in children {
                emit_node(child, options, ctx, depth + 1, lines);
            }
            close_call(lines);
        }

        NodeKind::WithBuilder { children } => {
            lines.push(format!("{}.withBuilder({}()", pad, options.builder_class));
            for child in children {
                emit_node(child, options, ctx, depth + 1, lines);
            }
            close_call(lines);
        }

        NodeKind::AddWith {
            radius,
            count,
            face,
            reverse,
            face_offset,
            children,
        } => {
            lines.push(format!(
                "{}.addWith({}, {}, {}()",
                pad,
                fmt_num(*radius),
                count,
                options.builder_class
            ));
            for child in children {
                emit_node(child, options, ctx, depth + 1, lines);
            }
            if *face {
                let face_pad = options.indent.repeat(depth + 1);
                if *reverse {
                    lines.push(format!("{}.face({}, true)", face_pad, fmt_vec3(face_offset)));
                } else {
                    lines.push(format!("{}.face({})", face_pad, fmt_vec3(face_offset)));
                }
            }
            close_call(lines);
        }
    }
}

fn bezier_call(pad: &str, start: Vec3, c1: Vec3, c2: Vec3, end: Vec3, count: u32) -> String {
    // handles are pre-translated into the origin-relative frame the host
    // expects; the absolute start rides along as the first argument
    format!(
        "{}.addBezier({}, {}, {}, {}, {})",
        pad,
        fmt_vec3(&start),
        fmt_vec3(&(c1 - start)),
        fmt_vec3(&(c2 - start)),
        fmt_vec3(&(end - start)),
        count
    )
}

/// Close the surrounding call by appending to the chain's last line
fn close_call(lines: &mut Vec<String>) {
    if let Some(last) = lines.last_mut() {
        last.push(')');
    }
}
