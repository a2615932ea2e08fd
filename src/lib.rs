// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Pointframe Engine
//!
//! A parametric point-cloud engine: one tree of geometric operations, two
//! synchronized backends. The same node list evaluates to a concrete point
//! cloud for live preview and emits a fluent PointsBuilder method chain for
//! a host runtime.

pub mod codegen;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod io;
pub mod tree;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use codegen::{emit, EndMode};
pub use config::EmitOptions;
pub use engine::Engine;
pub use io::Document;
pub use tree::{
    clone_with_new_ids, default_axis, evaluate, mirror, AngleUnit, Evaluation, KindTag,
    MirrorPlane, Node, NodeKind, PointStyle, Segment, Term, Vec3,
};

use anyhow::Result;

/// Evaluate a node list to the preview point cloud
pub fn preview(children: &[Node]) -> Evaluation {
    evaluate(children, default_axis())
}

/// Emit builder-chain source text with default options
pub fn generate(children: &[Node]) -> String {
    emit(children, &EmitOptions::default())
}

/// Evaluate a persisted tree file to the preview point cloud
pub fn preview_file(path: &str) -> Result<Evaluation> {
    let document = Document::from_file(path)?;
    Ok(preview(&document.children))
}

/// Emit builder-chain source text for a persisted tree file
pub fn generate_file(path: &str) -> Result<String> {
    let document = Document::from_file(path)?;
    Ok(generate(&document.children))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let children = vec![Node::new(NodeKind::AddLine {
            start: Vec3::zeros(),
            end: Vec3::new(2.0, 0.0, 0.0),
            count: 3,
        })];
        let evaluation = preview(&children);
        assert_eq!(evaluation.points.len(), 3);

        let source = generate(&children);
        assert!(source.starts_with("PointsBuilder()"));
    }
}
