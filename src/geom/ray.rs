//! World-space ray.

use glam::DVec3;

/// A world-space ray: origin plus unit direction.
///
/// The constructor normalizes the direction, so `point_at(t)` distances
/// are in world units. A zero or non-finite input direction normalizes to
/// [`DVec3::ZERO`]; such a ray is degenerate and rejected by the pick
/// operations before any intersection work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: DVec3,
    /// Unit direction, or [`DVec3::ZERO`] if the ray is degenerate.
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        let direction = if direction.is_finite() {
            direction.normalize_or_zero()
        } else {
            DVec3::ZERO
        };
        Self { origin, direction }
    }

    /// Whether the direction failed to normalize (zero or non-finite).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.direction == DVec3::ZERO
    }

    /// Evaluate the ray at parameter `t` (world-space distance).
    #[must_use]
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
