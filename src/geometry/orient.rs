// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Rotation and basis-alignment helpers

use crate::tree::Vec3;
use crate::utils::math::EPS;
use nalgebra::{Unit, UnitQuaternion};
use std::f64::consts::PI;

/// Rotate every point about an axis through the origin. Zero-length axes
/// leave the points unchanged.
pub fn rotate_about(points: &mut [Vec3], axis: Vec3, angle_rad: f64) {
    if axis.norm() < EPS {
        return;
    }
    let rotation = UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle_rad);
    for p in points.iter_mut() {
        *p = rotation * *p;
    }
}

/// Unit rotation mapping `unit(from)` onto `unit(to)`, or `None` when either
/// direction is degenerate. Antiparallel inputs resolve to a half turn about
/// an arbitrary perpendicular.
pub fn rotation_to(from: Vec3, to: Vec3) -> Option<UnitQuaternion<f64>> {
    if from.norm() < EPS || to.norm() < EPS {
        return None;
    }
    UnitQuaternion::rotation_between(&from, &to).or_else(|| {
        let mut perpendicular = from.cross(&Vec3::x());
        if perpendicular.norm() < EPS {
            perpendicular = from.cross(&Vec3::y());
        }
        Some(UnitQuaternion::from_axis_angle(
            &Unit::new_normalize(perpendicular),
            PI,
        ))
    })
}

/// Re-express every point from the upright basis of `from_forward` into the
/// upright basis of `to_forward`, keeping a stable world-up. A near-zero
/// forward on either side leaves the points unchanged.
pub fn align_upright(points: &mut [Vec3], from_forward: Vec3, to_forward: Vec3) {
    if from_forward.norm() < EPS || to_forward.norm() < EPS {
        return;
    }
    let (sr, su, sf) = upright_basis(from_forward);
    let (tr, tu, tf) = upright_basis(to_forward);
    for p in points.iter_mut() {
        let local = Vec3::new(p.dot(&sr), p.dot(&su), p.dot(&sf));
        *p = tr * local.x + tu * local.y + tf * local.z;
    }
}

/// Orthonormal `{right, up, forward}` built against world-up, with a fallback
/// up axis when the forward is nearly vertical
fn upright_basis(forward: Vec3) -> (Vec3, Vec3, Vec3) {
    let forward = forward.normalize();
    let mut up = Vec3::y();
    if forward.dot(&up).abs() > 1.0 - 1e-6 {
        up = Vec3::x();
    }
    let right = up.cross(&forward).normalize();
    let up = forward.cross(&right);
    (right, up, forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_about_y_quarter_turn() {
        let mut points = vec![Vec3::new(0.0, 0.0, 1.0)];
        rotate_about(&mut points, Vec3::new(0.0, 1.0, 0.0), PI / 2.0);
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[0].z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_zero_axis_is_noop() {
        let mut points = vec![Vec3::new(1.0, 2.0, 3.0)];
        rotate_about(&mut points, Vec3::zeros(), PI);
        assert_eq!(points[0], Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_to_maps_direction() {
        let rotation = rotation_to(Vec3::y(), Vec3::x()).unwrap();
        let mapped = rotation * Vec3::y();
        assert_relative_eq!(mapped.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mapped.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_to_degenerate_inputs() {
        assert!(rotation_to(Vec3::zeros(), Vec3::x()).is_none());
        assert!(rotation_to(Vec3::y(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_rotation_to_antiparallel_still_maps() {
        let rotation = rotation_to(Vec3::y(), -Vec3::y()).unwrap();
        let mapped = rotation * Vec3::y();
        assert_relative_eq!(mapped.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_align_upright_preserves_length() {
        let mut points = vec![Vec3::new(1.0, 2.0, 3.0)];
        let original_norm = points[0].norm();
        align_upright(&mut points, Vec3::z(), Vec3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(points[0].norm(), original_norm, epsilon = 1e-12);
    }

    #[test]
    fn test_align_upright_identity_when_same_forward() {
        let mut points = vec![Vec3::new(1.0, 2.0, 3.0)];
        align_upright(&mut points, Vec3::z(), Vec3::z());
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[0].y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(points[0].z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_align_upright_zero_forward_is_noop() {
        let mut points = vec![Vec3::new(1.0, 2.0, 3.0)];
        align_upright(&mut points, Vec3::z(), Vec3::zeros());
        assert_eq!(points[0], Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_align_upright_turns_forward_axis() {
        // a point sitting on the source forward lands on the target forward
        let mut points = vec![Vec3::new(0.0, 0.0, 2.0)];
        align_upright(&mut points, Vec3::z(), Vec3::x());
        assert_relative_eq!(points[0].x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(points[0].z, 0.0, epsilon = 1e-12);
    }
}
