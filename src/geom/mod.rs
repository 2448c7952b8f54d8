//! Picking geometry: rays, bounding volumes, and exact triangle-mesh
//! intersection.
//!
//! Everything here is `f64` (`glam::DVec3`): world coordinates are large
//! relative to the 1e-5 position tolerance the engine promises, so the
//! `f32` types the renderer uses for vertex data are not precise enough
//! for intersection distances.

mod bounds;
mod mesh;
mod ray;

pub use bounds::{Aabb, BoundingSphere, BoundingVolume};
pub use mesh::TriMesh;
pub use ray::Ray;
