//! Depth/position resolver: turns a successful pick into a world-space
//! intersection point.
//!
//! Screen picks unproject a depth-buffer sample through the host's
//! [`DepthSource`]; ray picks just evaluate the ray at the chosen
//! intersection distance. Both paths agree within floating-point
//! tolerance for the same drawable and viewpoint (covered by the engine
//! tests).

use glam::DVec3;

use super::hooks::DepthSource;
use super::WindowPosition;
use crate::geom::Ray;

/// Resolve a screen pick into a world point: sample the main scene's
/// depth buffer at the cursor and unproject. `None` when nothing was
/// rendered at that pixel.
pub(crate) fn resolve_screen(
    depth: &dyn DepthSource,
    position: WindowPosition,
) -> Option<DVec3> {
    depth
        .sample_depth(position)
        .map(|d| depth.unproject(position, d))
}

/// Resolve a ray pick into a world point. No depth sampling needed.
pub(crate) fn resolve_ray(ray: &Ray, distance: f64) -> DVec3 {
    ray.point_at(distance)
}
