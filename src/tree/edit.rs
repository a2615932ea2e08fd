// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Editing utilities - structural clone and plane mirroring

use super::node::fresh_id;
use super::{Node, NodeKind, Vec3};
use serde::{Deserialize, Serialize};

/// Mirror plane selector. Each plane negates the coordinate orthogonal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorPlane {
    XZ,
    XY,
    ZY,
}

/// Deep structural copy with fresh identities for the node and every
/// node/term in its subtree. No two live nodes ever share an id, even after
/// arbitrary copy operations.
pub fn clone_with_new_ids(node: &Node) -> Node {
    let mut copy = node.clone();
    refresh_ids(&mut copy);
    copy
}

fn refresh_ids(node: &mut Node) {
    node.id = fresh_id();
    match &mut node.kind {
        NodeKind::AddFourierSeries { terms, .. } => {
            for term in terms {
                term.id = fresh_id();
            }
        }
        NodeKind::AddBuilder { children, .. }
        | NodeKind::WithBuilder { children }
        | NodeKind::AddWith { children, .. } => {
            for child in children {
                refresh_ids(child);
            }
        }
        _ => {}
    }
}

/// Mirror a node's point-like parameters across a plane. Returns a fresh-id
/// clone for the kinds whose parameters are point-like, `None` otherwise.
pub fn mirror(node: &Node, plane: MirrorPlane) -> Option<Node> {
    let mut copy = clone_with_new_ids(node);
    match &mut copy.kind {
        NodeKind::AddLine { start, end, .. } => {
            flip(start, plane);
            flip(end, plane);
        }
        NodeKind::AddPoint { offset, .. } => flip(offset, plane),
        _ => return None,
    }
    Some(copy)
}

fn flip(v: &mut Vec3, plane: MirrorPlane) {
    match plane {
        MirrorPlane::XZ => v.y = -v.y,
        MirrorPlane::XY => v.z = -v.z,
        MirrorPlane::ZY => v.x = -v.x,
    }
}
