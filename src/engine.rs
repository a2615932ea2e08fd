// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Engine facade - one document, two synchronized outputs

use crate::codegen::emit;
use crate::config::EmitOptions;
use crate::io::Document;
use crate::tree::{default_axis, evaluate, Evaluation};

/// Holds a document and its emission options, recomputing both outputs from
/// scratch on every call. Evaluation and emission are pure readers; all tree
/// mutation happens in the host before a pass begins.
pub struct Engine {
    document: Document,
    options: EmitOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            document: Document::default(),
            options: EmitOptions::default(),
        }
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            options: EmitOptions::default(),
        }
    }

    /// Numeric backend: the preview point cloud with provenance
    pub fn preview(&self) -> Evaluation {
        evaluate(&self.document.children, default_axis())
    }

    /// Text backend: the builder-chain source
    pub fn source(&self) -> String {
        emit(&self.document.children, &self.options)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn set_document(&mut self, document: Document) {
        self.document = document;
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EmitOptions) {
        self.options = options;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::EndMode;
    use crate::tree::{Node, NodeKind, Vec3};

    #[test]
    fn test_both_backends_from_one_document() {
        let document = Document::new(vec![Node::new(NodeKind::AddLine {
            start: Vec3::zeros(),
            end: Vec3::new(2.0, 0.0, 0.0),
            count: 3,
        })]);
        let engine = Engine::with_document(document);

        let evaluation = engine.preview();
        assert_eq!(evaluation.points.len(), 3);

        let source = engine.source();
        assert!(source.contains(".addLine(Vec3(0, 0, 0), Vec3(2, 0, 0), 3)"));
    }

    #[test]
    fn test_options_apply_to_source() {
        let mut engine = Engine::new();
        let mut options = EmitOptions::default();
        options.end_mode = EndMode::List;
        engine.set_options(options);
        assert!(engine.source().ends_with(".points()"));
    }
}
