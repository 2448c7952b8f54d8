//! Indexed triangle mesh with exact ray intersection.

use glam::DVec3;

use super::bounds::BoundingSphere;
use super::ray::Ray;

/// Watertightness is not required; intersection is the nearest forward
/// hit over the triangle soup (Moller-Trumbore per triangle).
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    positions: Vec<DVec3>,
    indices: Vec<u32>,
    bounds: BoundingSphere,
}

impl TriMesh {
    /// Build a mesh from positions and triangle indices. Indices that
    /// point past `positions` are dropped triangle-by-triangle.
    #[must_use]
    pub fn new(positions: Vec<DVec3>, indices: Vec<u32>) -> Self {
        let vertex_count = positions.len() as u32;
        let mut clean = Vec::with_capacity(indices.len());
        for tri in indices.chunks_exact(3) {
            if tri.iter().all(|&i| i < vertex_count) {
                clean.extend_from_slice(tri);
            }
        }
        let bounds = BoundingSphere::from_points(&positions);
        Self {
            positions,
            indices: clean,
            bounds,
        }
    }

    /// Two-triangle quad `a-b-c-d` (in winding order around the perimeter).
    #[must_use]
    pub fn quad(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> Self {
        Self::new(vec![a, b, c, d], vec![0, 1, 2, 0, 2, 3])
    }

    /// Bounding sphere derived from the vertex positions.
    #[must_use]
    pub const fn bounds(&self) -> BoundingSphere {
        self.bounds
    }

    /// Nearest forward intersection distance of `ray` with any triangle.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let mut nearest: Option<f64> = None;
        for tri in self.indices.chunks_exact(3) {
            let a = self.positions[tri[0] as usize];
            let b = self.positions[tri[1] as usize];
            let c = self.positions[tri[2] as usize];
            if let Some(t) = intersect_triangle(ray, a, b, c) {
                if nearest.is_none_or(|best| t < best) {
                    nearest = Some(t);
                }
            }
        }
        nearest
    }
}

/// Moller-Trumbore ray/triangle intersection, double-sided.
///
/// Returns the forward distance `t >= 0`, or `None` on miss.
fn intersect_triangle(ray: &Ray, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
    const EPSILON: f64 = 1e-12;

    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None; // parallel to the triangle plane
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
