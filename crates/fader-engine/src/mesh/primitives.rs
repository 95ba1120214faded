use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::MeshData;

/// Axis-aligned box centered at the origin, 4 vertices per face so each
/// face keeps a flat normal.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;

    // (normal, u, v) with u × v == normal.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let c = n * half;
        let u = u * half;
        let v = v * half;
        let i0 = mesh.push_vertex(c - u - v, n);
        let i1 = mesh.push_vertex(c + u - v, n);
        let i2 = mesh.push_vertex(c + u + v, n);
        let i3 = mesh.push_vertex(c - u + v, n);
        mesh.push_triangle(i0, i1, i2);
        mesh.push_triangle(i0, i2, i3);
    }
    mesh
}

/// Torus in the XY plane around +Z.
///
/// `radial_segments` subdivide the tube cross-section, `tubular_segments`
/// the sweep around the ring.
pub fn torus_mesh(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push_vertex(position, position - center);
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
    mesh
}

/// UV sphere with poles on ±Y.
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=height {
        let theta = iy as f32 / height as f32 * PI;
        for ix in 0..=width {
            let phi = ix as f32 / width as f32 * TAU;
            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            mesh.push_vertex(position, position);
        }
    }

    let stride = width + 1;
    let at = |iy: u32, ix: u32| iy * stride + ix;
    for iy in 0..height {
        for ix in 0..width {
            let a = at(iy, ix + 1);
            let b = at(iy, ix);
            let c = at(iy + 1, ix);
            let d = at(iy + 1, ix + 1);
            // Pole rows collapse one triangle of each quad.
            if iy != 0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != height - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh
}
