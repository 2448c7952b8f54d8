//! Analytic ray intersection: traverses drawables' bounding volumes
//! without rendering and produces a distance-ordered candidate list.
//!
//! The visibility predicate runs per candidate before any distance
//! comparison, so an invisible drawable is excluded from the set
//! outright rather than merely deprioritized. Ties on distance keep the
//! scene's insertion order (stable sort).

use log::trace;

use super::PickedObject;
use crate::geom::Ray;
use crate::scene::{DrawableKind, Scene};

/// One ray-pick candidate: a forward intersection distance and the
/// specific object (drawable or sub-feature) struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCandidate {
    /// World-space distance along the ray.
    pub distance: f64,
    /// What was hit.
    pub target: PickedObject,
}

/// Collect every pickable intersection along `ray`, sorted ascending by
/// distance. Batched drawables resolve to the specific feature struck,
/// tilesets to the specific content tile.
pub(crate) fn collect_candidates(
    scene: &Scene,
    ray: &Ray,
) -> Vec<RayCandidate> {
    let mut candidates = Vec::new();
    for (key, drawable) in scene.candidates() {
        if !drawable.is_pickable() {
            continue;
        }
        match &drawable.kind {
            DrawableKind::Primitive(geometry) => {
                if let Some(distance) = geometry.ray_distance(ray) {
                    candidates.push(RayCandidate {
                        distance,
                        target: PickedObject {
                            drawable: key,
                            feature: None,
                        },
                    });
                }
            }
            DrawableKind::Batched(batch) => {
                for (index, feature) in batch.features.iter().enumerate() {
                    if !drawable.feature_pickable(index) {
                        continue;
                    }
                    if let Some(distance) = feature.geometry.ray_distance(ray)
                    {
                        candidates.push(RayCandidate {
                            distance,
                            target: PickedObject {
                                drawable: key,
                                feature: Some(index as u32),
                            },
                        });
                    }
                }
            }
            DrawableKind::Tileset(tree) => {
                tree.visit_hit(ray, &mut |index, content| {
                    if let Some(distance) = content.ray_distance(ray) {
                        candidates.push(RayCandidate {
                            distance,
                            target: PickedObject {
                                drawable: key,
                                feature: Some(index as u32),
                            },
                        });
                    }
                });
            }
        }
    }
    // Stable: equal distances keep traversal (insertion) order.
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    trace!("ray pick collected {} candidates", candidates.len());
    candidates
}
