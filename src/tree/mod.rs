// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Node tree module
//!
//! Defines the operation tree, its evaluator, and editing utilities

mod edit;
mod evaluator;
mod node;

pub use edit::{clone_with_new_ids, mirror, MirrorPlane};
pub use evaluator::{default_axis, evaluate, Evaluation, Segment};
pub use node::{AngleUnit, KindTag, Node, NodeKind, PointStyle, Term, Vec3};
