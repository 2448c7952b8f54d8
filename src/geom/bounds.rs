//! Bounding volumes with ray entry-distance tests.

use glam::DVec3;

use super::ray::Ray;

/// A bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: DVec3,
    /// Sphere radius.
    pub radius: f64,
}

impl BoundingSphere {
    /// Create a bounding sphere.
    #[must_use]
    pub const fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere around the centroid of `points` (cheap, not
    /// minimal-enclosing; adequate for reject tests).
    #[must_use]
    pub fn from_points(points: &[DVec3]) -> Self {
        if points.is_empty() {
            return Self::new(DVec3::ZERO, 0.0);
        }
        let centroid =
            points.iter().copied().sum::<DVec3>() / points.len() as f64;
        let radius = points
            .iter()
            .map(|p| p.distance(centroid))
            .fold(0.0_f64, f64::max);
        Self::new(centroid, radius)
    }

    /// Distance along `ray` at which it enters this sphere.
    ///
    /// Returns 0 when the origin is already inside, `None` when the ray
    /// misses or the sphere is entirely behind the origin.
    #[must_use]
    pub fn entry_distance(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t_near = -b - sqrt_d;
        let t_far = -b + sqrt_d;
        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// Create an axis-aligned box from its two corners.
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Distance along `ray` at which it enters this box (slab test).
    ///
    /// Returns 0 when the origin is already inside, `None` when the ray
    /// misses or the box is entirely behind the origin.
    #[must_use]
    pub fn entry_distance(&self, ray: &Ray) -> Option<f64> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if dir.abs() < f64::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let t0 = (lo - origin) / dir;
            let t1 = (hi - origin) / dir;
            let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Either bounding-volume flavor, for drawables that carry one directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    /// Sphere bounds.
    Sphere(BoundingSphere),
    /// Axis-aligned box bounds.
    Box(Aabb),
}

impl BoundingVolume {
    /// Ray entry distance for whichever volume this is.
    #[must_use]
    pub fn entry_distance(&self, ray: &Ray) -> Option<f64> {
        match self {
            Self::Sphere(s) => s.entry_distance(ray),
            Self::Box(b) => b.entry_distance(ray),
        }
    }
}
