//! Rasterized-ID picking: encode pickable geometry into the id frame
//! through the host rasterizer, then decode the pixels under the cursor.
//!
//! The visibility filter runs here, while building the encode list: an
//! invisible drawable is never rendered into the pick frame at all, so
//! it can never occlude a visible one beneath it.

use log::debug;

use super::frame::IdFrame;
use super::hooks::{EncodeItem, PickRasterizer, PickRegion};
use super::{PickedObject, WindowPosition};
use crate::scene::{DrawableKind, Scene};

/// Build the encode list for the current scene state: every pickable
/// drawable, feature, and content tile, paired with its identity.
pub(crate) fn encode_items(scene: &Scene) -> Vec<EncodeItem<'_>> {
    let registry = scene.registry();
    let mut items = Vec::new();
    for (key, drawable) in scene.candidates() {
        if !drawable.is_pickable() {
            continue;
        }
        match &drawable.kind {
            DrawableKind::Primitive(geometry) => {
                if let Some(id) = registry.lookup(key, None) {
                    items.push(EncodeItem { geometry, id });
                }
            }
            DrawableKind::Batched(batch) => {
                for (index, feature) in batch.features.iter().enumerate() {
                    if !drawable.feature_pickable(index) {
                        continue;
                    }
                    if let Some(id) = registry.lookup(key, Some(index as u32))
                    {
                        items.push(EncodeItem {
                            geometry: &feature.geometry,
                            id,
                        });
                    }
                }
            }
            DrawableKind::Tileset(tree) => {
                for (index, tile) in tree.tiles().iter().enumerate() {
                    let Some(content) = &tile.content else {
                        continue;
                    };
                    if let Some(id) = registry.lookup(key, Some(index as u32))
                    {
                        items.push(EncodeItem {
                            geometry: content,
                            id,
                        });
                    }
                }
            }
        }
    }
    items
}

/// Run one ID-buffer pick: render the search window, then decode
/// center-out. Out-of-viewport cursor positions degenerate to "no hit".
pub(crate) fn pick(
    scene: &Scene,
    rasterizer: &mut dyn PickRasterizer,
    frame: &mut IdFrame,
    position: WindowPosition,
    radius: u32,
) -> Option<PickedObject> {
    if !rasterizer.viewport().contains(position) {
        debug!("pick at ({}, {}) outside viewport", position.x, position.y);
        return None;
    }

    let items = encode_items(scene);
    let region = PickRegion {
        center: position,
        radius,
    };
    frame.reset(radius);
    if !items.is_empty() {
        rasterizer.render_for_pick(&items, &region, frame);
    }

    let picked = frame
        .first_hit()
        .and_then(|raw| scene.registry().resolve_raw(raw));
    debug!(
        "pick at ({}, {}) radius {} -> {:?}",
        position.x, position.y, radius, picked
    );
    picked
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::geom::BoundingSphere;
    use crate::scene::{Drawable, Feature, PickGeometry};

    fn sphere(z: f64) -> PickGeometry {
        PickGeometry::Sphere(BoundingSphere::new(DVec3::new(0.0, 0.0, z), 0.5))
    }

    #[test]
    fn encode_list_drops_hidden_and_transparent_drawables() {
        let mut scene = Scene::new();
        let _visible = scene.add(Drawable::primitive(sphere(0.0)));
        let hidden = scene.add(Drawable::primitive(sphere(1.0)));
        let clear = scene.add(Drawable::primitive(sphere(2.0)));
        scene.drawable_mut(hidden).unwrap().show = false;
        scene.drawable_mut(clear).unwrap().opacity = 0.0;

        assert_eq!(encode_items(&scene).len(), 1);
    }

    #[test]
    fn encode_list_filters_features_individually() {
        let mut scene = Scene::new();
        let mut off = Feature::new(sphere(1.0));
        off.show = false;
        let features =
            vec![Feature::new(sphere(0.0)), off, Feature::new(sphere(2.0))];
        let _key = scene.add(Drawable::batched(features, true));

        let items = encode_items(&scene);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn features_without_show_support_always_encode() {
        let mut scene = Scene::new();
        let mut off = Feature::new(sphere(1.0));
        off.show = false;
        let _key = scene
            .add(Drawable::batched(vec![Feature::new(sphere(0.0)), off], false));
        assert_eq!(encode_items(&scene).len(), 2);
    }
}
