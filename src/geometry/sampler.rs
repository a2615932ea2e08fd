// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Closed-form point samplers, one function per primitive kind

use crate::tree::Vec3;
use crate::utils::math::{closed_t, finite_or_zero, finite_vec3, lerp, open_t};
use std::f64::consts::{PI, TAU};

/// Inclusive linear interpolation between two endpoints
pub fn sample_line(start: Vec3, end: Vec3, count: u32) -> Vec<Vec3> {
    let start = finite_vec3(start);
    let end = finite_vec3(end);
    (0..count)
        .map(|i| start.lerp(&end, open_t(i, count)))
        .collect()
}

/// Evenly spaced points on the XZ circle of the given radius
pub fn sample_circle(r: f64, count: u32) -> Vec<Vec3> {
    let r = finite_or_zero(r);
    (0..count)
        .map(|i| {
            let theta = TAU * closed_t(i, count);
            Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
        })
        .collect()
}

/// XZ arc between two angles, both ends included
pub fn sample_arc(r: f64, from_rad: f64, to_rad: f64, count: u32) -> Vec<Vec3> {
    let r = finite_or_zero(r);
    let from_rad = finite_or_zero(from_rad);
    let to_rad = finite_or_zero(to_rad);
    (0..count)
        .map(|i| {
            let theta = lerp(from_rad, to_rad, open_t(i, count));
            Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
        })
        .collect()
}

pub fn sample_ellipse(rx: f64, rz: f64, count: u32) -> Vec<Vec3> {
    let rx = finite_or_zero(rx);
    let rz = finite_or_zero(rz);
    (0..count)
        .map(|i| {
            let theta = TAU * closed_t(i, count);
            Vec3::new(rx * theta.cos(), 0.0, rz * theta.sin())
        })
        .collect()
}

/// Regular polygon outline, `count` points per edge with the edge end excluded
pub fn sample_polygon(r: f64, sides: u32, count: u32) -> Vec<Vec3> {
    let vertices: Vec<Vec3> = (0..sides)
        .map(|i| {
            let theta = TAU * closed_t(i, sides);
            let r = finite_or_zero(r);
            Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
        })
        .collect();
    sample_edges(&vertices, count)
}

/// Star outline alternating outer and inner radii
pub fn sample_star(outer: f64, inner: f64, points: u32, count: u32) -> Vec<Vec3> {
    let outer = finite_or_zero(outer);
    let inner = finite_or_zero(inner);
    let vertices: Vec<Vec3> = (0..points * 2)
        .map(|i| {
            let theta = TAU * closed_t(i, points * 2);
            let r = if i % 2 == 0 { outer } else { inner };
            Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
        })
        .collect();
    sample_edges(&vertices, count)
}

/// Walk a closed vertex loop, sampling each edge end-exclusive
fn sample_edges(vertices: &[Vec3], count: u32) -> Vec<Vec3> {
    if vertices.is_empty() {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(vertices.len() * count as usize);
    for (i, a) in vertices.iter().enumerate() {
        let b = &vertices[(i + 1) % vertices.len()];
        for j in 0..count {
            points.push(a.lerp(b, closed_t(j, count)));
        }
    }
    points
}

/// Archimedean XZ spiral growing from the origin to the given radius
pub fn sample_spiral(r: f64, turns: f64, count: u32) -> Vec<Vec3> {
    let r = finite_or_zero(r);
    let turns = finite_or_zero(turns);
    (0..count)
        .map(|i| {
            let t = open_t(i, count);
            let theta = TAU * turns * t;
            let rho = r * t;
            Vec3::new(rho * theta.cos(), 0.0, rho * theta.sin())
        })
        .collect()
}

pub fn sample_helix(r: f64, height: f64, turns: f64, count: u32) -> Vec<Vec3> {
    let r = finite_or_zero(r);
    let height = finite_or_zero(height);
    let turns = finite_or_zero(turns);
    (0..count)
        .map(|i| {
            let t = open_t(i, count);
            let theta = TAU * turns * t;
            Vec3::new(r * theta.cos(), height * t, r * theta.sin())
        })
        .collect()
}

/// Rhodonea curve `rho = r * cos(petals * theta)`
pub fn sample_rose(r: f64, petals: u32, count: u32) -> Vec<Vec3> {
    let r = finite_or_zero(r);
    (0..count)
        .map(|i| {
            let theta = TAU * closed_t(i, count);
            let rho = r * (petals as f64 * theta).cos();
            Vec3::new(rho * theta.cos(), 0.0, rho * theta.sin())
        })
        .collect()
}

pub fn sample_wave(length: f64, amplitude: f64, cycles: f64, count: u32) -> Vec<Vec3> {
    let length = finite_or_zero(length);
    let amplitude = finite_or_zero(amplitude);
    let cycles = finite_or_zero(cycles);
    (0..count)
        .map(|i| {
            let t = open_t(i, count);
            Vec3::new(length * t, amplitude * (TAU * cycles * t).sin(), 0.0)
        })
        .collect()
}

pub fn sample_lissajous(rx: f64, rz: f64, a: f64, b: f64, phase_rad: f64, count: u32) -> Vec<Vec3> {
    let rx = finite_or_zero(rx);
    let rz = finite_or_zero(rz);
    let a = finite_or_zero(a);
    let b = finite_or_zero(b);
    let phase_rad = finite_or_zero(phase_rad);
    (0..count)
        .map(|i| {
            let theta = TAU * closed_t(i, count);
            Vec3::new(
                rx * (a * theta + phase_rad).sin(),
                0.0,
                rz * (b * theta).sin(),
            )
        })
        .collect()
}

/// Centered XZ lattice of `cols * rows` points
pub fn sample_grid(width: f64, depth: f64, cols: u32, rows: u32) -> Vec<Vec3> {
    let width = finite_or_zero(width);
    let depth = finite_or_zero(depth);
    let mut points = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows {
        let z = centered(row, rows, depth);
        for col in 0..cols {
            points.push(Vec3::new(centered(col, cols, width), 0.0, z));
        }
    }
    points
}

fn centered(i: u32, n: u32, extent: f64) -> f64 {
    if n <= 1 {
        0.0
    } else {
        -extent / 2.0 + extent * i as f64 / (n - 1) as f64
    }
}

/// The 12 edges of a centered box, `count` points per edge, end excluded
pub fn sample_box(width: f64, height: f64, depth: f64, count: u32) -> Vec<Vec3> {
    let hw = finite_or_zero(width) / 2.0;
    let hh = finite_or_zero(height) / 2.0;
    let hd = finite_or_zero(depth) / 2.0;
    let corners = [
        Vec3::new(-hw, -hh, -hd),
        Vec3::new(hw, -hh, -hd),
        Vec3::new(hw, -hh, hd),
        Vec3::new(-hw, -hh, hd),
        Vec3::new(-hw, hh, -hd),
        Vec3::new(hw, hh, -hd),
        Vec3::new(hw, hh, hd),
        Vec3::new(-hw, hh, hd),
    ];
    const EDGES: [(usize, usize); 12] = [
        // bottom loop
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        // top loop
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        // verticals
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    let mut points = Vec::with_capacity(12 * count as usize);
    for (a, b) in EDGES {
        for j in 0..count {
            points.push(corners[a].lerp(&corners[b], closed_t(j, count)));
        }
    }
    points
}

/// Latitude/longitude shell with a single point at each pole
pub fn sample_sphere(r: f64, rings: u32, segments: u32) -> Vec<Vec3> {
    if rings == 0 || segments == 0 {
        return Vec::new();
    }
    let r = finite_or_zero(r);
    let mut points = Vec::new();
    for i in 0..=rings {
        if i == 0 {
            points.push(Vec3::new(0.0, r, 0.0));
        } else if i == rings {
            points.push(Vec3::new(0.0, -r, 0.0));
        } else {
            let phi = PI * i as f64 / rings as f64;
            let y = r * phi.cos();
            let ring_r = r * phi.sin();
            for j in 0..segments {
                let theta = TAU * closed_t(j, segments);
                points.push(Vec3::new(ring_r * theta.cos(), y, ring_r * theta.sin()));
            }
        }
    }
    points
}

pub fn sample_cylinder(r: f64, height: f64, rings: u32, segments: u32) -> Vec<Vec3> {
    sample_cone(r, r, height, rings, segments)
}

/// Stacked circles with the radius swept from `r1` to `r2`
pub fn sample_cone(r1: f64, r2: f64, height: f64, rings: u32, segments: u32) -> Vec<Vec3> {
    if segments == 0 {
        return Vec::new();
    }
    let r1 = finite_or_zero(r1);
    let r2 = finite_or_zero(r2);
    let height = finite_or_zero(height);
    let mut points = Vec::with_capacity(rings as usize * segments as usize);
    for i in 0..rings {
        let t = open_t(i, rings);
        let y = height * t;
        let ring_r = lerp(r1, r2, t);
        for j in 0..segments {
            let theta = TAU * closed_t(j, segments);
            points.push(Vec3::new(ring_r * theta.cos(), y, ring_r * theta.sin()));
        }
    }
    points
}

/// Torus around the Y axis, major circle in the XZ plane
pub fn sample_torus(major: f64, minor: f64, rings: u32, segments: u32) -> Vec<Vec3> {
    let major = finite_or_zero(major);
    let minor = finite_or_zero(minor);
    let mut points = Vec::with_capacity(rings as usize * segments as usize);
    for i in 0..rings {
        let u = TAU * closed_t(i, rings);
        for j in 0..segments {
            let v = TAU * closed_t(j, segments);
            let rho = major + minor * v.cos();
            points.push(Vec3::new(rho * u.cos(), minor * v.sin(), rho * u.sin()));
        }
    }
    points
}

/// Concentric XZ circles swept from the inner to the outer radius
pub fn sample_ring(inner: f64, outer: f64, rings: u32, count: u32) -> Vec<Vec3> {
    let inner = finite_or_zero(inner);
    let outer = finite_or_zero(outer);
    let mut points = Vec::with_capacity(rings as usize * count as usize);
    for i in 0..rings {
        let r = lerp(inner, outer, open_t(i, rings));
        points.extend(sample_circle(r, count));
    }
    points
}

/// Raise a quadratic control point to the equivalent cubic handle pair
pub fn raise_to_cubic(start: Vec3, control: Vec3, end: Vec3) -> (Vec3, Vec3) {
    let start = finite_vec3(start);
    let control = finite_vec3(control);
    let end = finite_vec3(end);
    let c1 = start + (control - start) * (2.0 / 3.0);
    let c2 = end + (control - end) * (2.0 / 3.0);
    (c1, c2)
}

/// Uniform-parameter cubic Bezier sampling, both ends included
pub fn sample_cubic_bezier(p0: Vec3, c1: Vec3, c2: Vec3, p3: Vec3, count: u32) -> Vec<Vec3> {
    let p0 = finite_vec3(p0);
    let c1 = finite_vec3(c1);
    let c2 = finite_vec3(c2);
    let p3 = finite_vec3(p3);
    (0..count)
        .map(|i| {
            let t = open_t(i, count);
            let u = 1.0 - t;
            p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t)
        })
        .collect()
}

/// Parametric curve `x = sum r*cos(w*theta + phase)`, `z = sum r*sin(...)`
pub fn sample_fourier_series(terms: &[(f64, f64, f64)], count: u32, scale: f64) -> Vec<Vec3> {
    let scale = finite_or_zero(scale);
    (0..count)
        .map(|i| {
            let theta = TAU * closed_t(i, count);
            let mut x = 0.0;
            let mut z = 0.0;
            for &(r, w, phase) in terms {
                let r = finite_or_zero(r);
                let w = finite_or_zero(w);
                let phase = finite_or_zero(phase);
                x += r * (w * theta + phase).cos();
                z += r * (w * theta + phase).sin();
            }
            Vec3::new(x * scale, 0.0, z * scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_interpolates_inclusively() {
        let points = sample_line(Vec3::zeros(), Vec3::new(2.0, 0.0, 0.0), 3);
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[0].x, 0.0);
        assert_relative_eq!(points[1].x, 1.0);
        assert_relative_eq!(points[2].x, 2.0);
    }

    #[test]
    fn test_line_single_sample_sits_at_end() {
        let points = sample_line(Vec3::zeros(), Vec3::new(2.0, 0.0, 0.0), 1);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].x, 2.0);
    }

    #[test]
    fn test_circle_spacing() {
        let points = sample_circle(1.0, 4);
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[1].z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[2].x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(points[3].z, -1.0, epsilon = 1e-12);
        for p in &points {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_zero_count_appends_nothing() {
        assert!(sample_circle(1.0, 0).is_empty());
        assert!(sample_line(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 0).is_empty());
        assert!(sample_sphere(1.0, 0, 16).is_empty());
        assert!(sample_cone(1.0, 0.5, 2.0, 4, 0).is_empty());
    }

    #[test]
    fn test_nan_parameters_coerce_to_zero() {
        let points = sample_circle(f64::NAN, 4);
        assert_eq!(points.len(), 4);
        for p in &points {
            assert_relative_eq!(p.norm(), 0.0);
        }
    }

    #[test]
    fn test_polygon_point_count() {
        let points = sample_polygon(1.0, 6, 8);
        assert_eq!(points.len(), 48);
        // edge starts are the polygon vertices themselves
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_has_single_pole_points() {
        let rings = 4;
        let segments = 8;
        let points = sample_sphere(2.0, rings, segments);
        assert_eq!(points.len(), (rings as usize - 1) * segments as usize + 2);
        assert_relative_eq!(points[0].y, 2.0);
        assert_relative_eq!(points.last().unwrap().y, -2.0);
    }

    #[test]
    fn test_cylinder_delegates_to_cone() {
        assert_eq!(
            sample_cylinder(1.0, 2.0, 4, 8),
            sample_cone(1.0, 1.0, 2.0, 4, 8)
        );
    }

    #[test]
    fn test_quadratic_degree_raise() {
        let start = Vec3::zeros();
        let control = Vec3::new(1.0, 2.0, 0.0);
        let end = Vec3::new(2.0, 0.0, 0.0);
        let (c1, c2) = raise_to_cubic(start, control, end);
        // the raised cubic reproduces the quadratic at its midpoint
        let cubic = sample_cubic_bezier(start, c1, c2, end, 3);
        let t = 0.5;
        let quad = start * (1.0 - t) * (1.0 - t)
            + control * 2.0 * (1.0 - t) * t
            + end * t * t;
        assert_relative_eq!(cubic[1].x, quad.x, epsilon = 1e-12);
        assert_relative_eq!(cubic[1].y, quad.y, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_bezier_endpoints() {
        let points = sample_cubic_bezier(
            Vec3::zeros(),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            5,
        );
        assert_relative_eq!(points[0].norm(), 0.0);
        assert_relative_eq!(points[4].x, 1.0);
        assert_relative_eq!(points[4].y, 0.0);
    }

    #[test]
    fn test_grid_is_centered() {
        let points = sample_grid(2.0, 4.0, 3, 2);
        assert_eq!(points.len(), 6);
        assert_relative_eq!(points[0].x, -1.0);
        assert_relative_eq!(points[0].z, -2.0);
        assert_relative_eq!(points[5].x, 1.0);
        assert_relative_eq!(points[5].z, 2.0);
    }

    #[test]
    fn test_box_edge_count() {
        assert_eq!(sample_box(1.0, 1.0, 1.0, 4).len(), 48);
    }

    #[test]
    fn test_fourier_single_term_is_circle() {
        let terms = [(1.0, 1.0, 0.0)];
        let fourier = sample_fourier_series(&terms, 16, 1.0);
        let circle = sample_circle(1.0, 16);
        for (a, b) in fourier.iter().zip(&circle) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
        }
    }
}
