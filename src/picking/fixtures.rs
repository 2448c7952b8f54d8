//! Test doubles for the rendering collaborators: a pinhole camera, a
//! CPU rasterizer that casts one ray per window pixel, and a depth
//! source backed by the same camera.
//!
//! Because the fake rasterizer and the fake depth source shoot the exact
//! same per-pixel rays the analytic strategy uses, the screen and ray
//! paths can be cross-checked against each other to tight tolerances.

use glam::DVec3;

use super::engine::PickEngine;
use super::frame::IdFrame;
use super::hooks::{
    DepthSource, EncodeItem, PickRasterizer, PickRegion, Viewport,
};
use super::{id_buffer, WindowPosition};
use crate::geom::{BoundingSphere, BoundingVolume, Ray, TriMesh};
use crate::scene::{
    Drawable, Feature, PickGeometry, Scene, Tile, TileTree,
};

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Pinhole camera: eye/target/up plus a vertical field of view.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TestCamera {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub fov_y_deg: f64,
}

impl TestCamera {
    /// Ray from the eye through window position `(px, py)` in pixels,
    /// measured from the top-left corner (pass pixel centers, e.g. 5.5).
    pub fn pixel_ray(&self, viewport: Viewport, px: f64, py: f64) -> Ray {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let ndc_x = (px / width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (py / height) * 2.0;
        let tan_half = (self.fov_y_deg / 2.0).to_radians().tan();
        let aspect = width / height;

        let direction = forward
            + right * (ndc_x * aspect * tan_half)
            + up * (ndc_y * tan_half);
        Ray::new(self.eye, direction)
    }
}

// ---------------------------------------------------------------------------
// Rasterizer double
// ---------------------------------------------------------------------------

/// CPU stand-in for the GPU pick pass: casts one camera ray per window
/// pixel of the region and keeps the nearest item, first-come on ties.
pub(crate) struct RayCastRasterizer {
    pub camera: TestCamera,
    pub size: Viewport,
}

impl PickRasterizer for RayCastRasterizer {
    fn viewport(&self) -> Viewport {
        self.size
    }

    fn render_for_pick(
        &mut self,
        items: &[EncodeItem<'_>],
        region: &PickRegion,
        frame: &mut IdFrame,
    ) {
        for fy in 0..frame.size() {
            for fx in 0..frame.size() {
                let (wx, wy) = region.window_coordinate(fx, fy);
                if wx < 0
                    || wy < 0
                    || wx >= i64::from(self.size.width)
                    || wy >= i64::from(self.size.height)
                {
                    continue;
                }
                let ray = self.camera.pixel_ray(
                    self.size,
                    wx as f64 + 0.5,
                    wy as f64 + 0.5,
                );
                let mut nearest: Option<(f64, u32)> = None;
                for item in items {
                    let Some(distance) = item.geometry.ray_distance(&ray)
                    else {
                        continue;
                    };
                    if nearest.is_none_or(|(best, _)| distance < best) {
                        nearest = Some((distance, item.id.to_raw()));
                    }
                }
                if let Some((_, raw)) = nearest {
                    frame.set(fx, fy, raw);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Depth double
// ---------------------------------------------------------------------------

/// Depth source backed by the same camera rays: the sampled depth is the
/// nearest intersection distance along the pixel's view ray, and
/// unprojection evaluates that ray.
pub(crate) struct FakeDepth {
    supported: bool,
    camera: TestCamera,
    size: Viewport,
    geometry: Vec<PickGeometry>,
}

impl DepthSource for FakeDepth {
    fn pick_position_supported(&self) -> bool {
        self.supported
    }

    fn sample_depth(&self, position: WindowPosition) -> Option<f64> {
        let ray = self.pixel_ray(position);
        self.geometry
            .iter()
            .filter_map(|g| g.ray_distance(&ray))
            .min_by(f64::total_cmp)
    }

    fn unproject(&self, position: WindowPosition, depth: f64) -> DVec3 {
        self.pixel_ray(position).point_at(depth)
    }
}

impl FakeDepth {
    fn pixel_ray(&self, position: WindowPosition) -> Ray {
        self.camera.pixel_ray(
            self.size,
            f64::from(position.x) + 0.5,
            f64::from(position.y) + 0.5,
        )
    }
}

// ---------------------------------------------------------------------------
// Rig
// ---------------------------------------------------------------------------

/// The standard test setup: a 10x10 viewport looking down the -Z axis
/// from (0, 0, 10) with a 60 degree field of view, so quads spanning
/// +/-1 around the origin comfortably cover the center pixel.
pub(crate) struct TestRig {
    pub scene: Scene,
    pub engine: PickEngine,
    pub rasterizer: RayCastRasterizer,
}

impl TestRig {
    pub fn new() -> Self {
        let camera = TestCamera {
            eye: DVec3::new(0.0, 0.0, 10.0),
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov_y_deg: 60.0,
        };
        Self {
            scene: Scene::new(),
            engine: PickEngine::new(),
            rasterizer: RayCastRasterizer {
                camera,
                size: Viewport {
                    width: 10,
                    height: 10,
                },
            },
        }
    }

    /// Camera ray through the center of window pixel `position`.
    pub fn ray_through_pixel(&self, position: WindowPosition) -> Ray {
        self.rasterizer.camera.pixel_ray(
            self.rasterizer.size,
            f64::from(position.x) + 0.5,
            f64::from(position.y) + 0.5,
        )
    }

    /// A sphere small enough that only the ray through pixel `(x, y)`
    /// hits it, placed 10 units down that ray.
    pub fn tiny_sphere_at_pixel(&self, x: i32, y: i32) -> Drawable {
        let ray = self.ray_through_pixel(WindowPosition::new(x, y));
        let center = ray.point_at(10.0);
        Drawable::primitive(PickGeometry::Sphere(BoundingSphere::new(
            center, 0.05,
        )))
    }

    /// Depth source snapshotting the scene's current pickable geometry.
    pub fn depth_source(&self, supported: bool) -> FakeDepth {
        FakeDepth {
            supported,
            camera: self.rasterizer.camera,
            size: self.rasterizer.size,
            geometry: id_buffer::encode_items(&self.scene)
                .iter()
                .map(|item| item.geometry.clone())
                .collect(),
        }
    }

    /// Split borrows for calls that need the scene, the rasterizer, and
    /// the engine at once.
    pub fn parts(
        &mut self,
    ) -> (&Scene, &mut RayCastRasterizer, &mut PickEngine) {
        (&self.scene, &mut self.rasterizer, &mut self.engine)
    }
}

// ---------------------------------------------------------------------------
// Geometry builders
// ---------------------------------------------------------------------------

fn quad_geometry(half: f64, z: f64) -> PickGeometry {
    PickGeometry::Mesh(TriMesh::quad(
        DVec3::new(-half, -half, z),
        DVec3::new(half, -half, z),
        DVec3::new(half, half, z),
        DVec3::new(-half, half, z),
    ))
}

/// Horizontal quad spanning +/-1 around the origin at height `z`.
pub(crate) fn quad_drawable(z: f64) -> Drawable {
    Drawable::primitive(quad_geometry(1.0, z))
}

/// Tiny horizontal quad at height `z`, for point-precise position tests.
pub(crate) fn small_quad_drawable(z: f64) -> Drawable {
    Drawable::primitive(quad_geometry(1e-4, z))
}

/// Batched drawable of full-size quads from `(height, show)` pairs.
pub(crate) fn batched_quads(
    layers: &[(f64, bool)],
    per_feature_show: bool,
) -> Drawable {
    let features = layers
        .iter()
        .map(|&(z, show)| {
            let mut feature = Feature::new(quad_geometry(1.0, z));
            feature.show = show;
            feature
        })
        .collect();
    Drawable::batched(features, per_feature_show)
}

/// A root tile without content whose single child carries a quad at the
/// origin.
pub(crate) fn two_level_tileset() -> Drawable {
    let root = Tile {
        bounds: BoundingVolume::Sphere(BoundingSphere::new(DVec3::ZERO, 5.0)),
        content: None,
        children: vec![1],
    };
    let leaf = Tile {
        bounds: BoundingVolume::Sphere(BoundingSphere::new(DVec3::ZERO, 2.0)),
        content: Some(quad_geometry(1.0, 0.0)),
        children: Vec::new(),
    };
    Drawable::tileset(TileTree::with_root(vec![root, leaf]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_ray_points_straight_down_the_view_axis() {
        let rig = TestRig::new();
        let ray = rig.ray_through_pixel(WindowPosition::new(5, 5));
        // Pixel centers sit half a pixel off the exact viewport center,
        // so the ray is only approximately axial.
        assert!((ray.direction + DVec3::Z).length() < 0.15);
        assert!(ray.direction.z < -0.99);
    }

    #[test]
    fn tiny_sphere_is_visible_only_from_its_own_pixel() {
        let rig = TestRig::new();
        let drawable = rig.tiny_sphere_at_pixel(2, 2);
        let crate::scene::DrawableKind::Primitive(geometry) = &drawable.kind
        else {
            panic!("expected a primitive");
        };

        let own = rig.ray_through_pixel(WindowPosition::new(2, 2));
        assert!(geometry.ray_distance(&own).is_some());
        let neighbor = rig.ray_through_pixel(WindowPosition::new(3, 2));
        assert!(geometry.ray_distance(&neighbor).is_none());
    }

    #[test]
    fn rasterizer_writes_the_nearest_item_per_pixel() {
        let mut rig = TestRig::new();
        let low = rig.scene.add(quad_drawable(0.0));
        let high = rig.scene.add(quad_drawable(1.0));

        let items = id_buffer::encode_items(&rig.scene);
        let mut frame = IdFrame::new();
        frame.reset(0);
        rig.rasterizer.render_for_pick(
            &items,
            &PickRegion {
                center: WindowPosition::new(5, 5),
                radius: 0,
            },
            &mut frame,
        );

        let raw = frame.get(0, 0);
        let picked = rig.scene.registry().resolve_raw(raw).unwrap();
        assert_eq!(picked.drawable, high);
        assert_ne!(picked.drawable, low);
    }

    #[test]
    fn rasterizer_leaves_out_of_viewport_pixels_at_background() {
        let mut rig = TestRig::new();
        let _key = rig.scene.add(quad_drawable(0.0));
        let items = id_buffer::encode_items(&rig.scene);

        let mut frame = IdFrame::new();
        frame.reset(1);
        // Region centered at the window origin: the top-left frame pixels
        // map to negative window coordinates.
        rig.rasterizer.render_for_pick(
            &items,
            &PickRegion {
                center: WindowPosition::new(0, 0),
                radius: 1,
            },
            &mut frame,
        );
        assert_eq!(frame.get(0, 0), super::super::registry::BACKGROUND);
    }

    #[test]
    fn depth_sample_matches_the_analytic_distance() {
        let mut rig = TestRig::new();
        let _key = rig.scene.add(quad_drawable(1.0));
        let depth = rig.depth_source(true);

        let center = WindowPosition::new(5, 5);
        let sampled = depth.sample_depth(center).unwrap();
        let ray = rig.ray_through_pixel(center);
        let analytic = crate::picking::ray::collect_candidates(
            &rig.scene, &ray,
        )[0]
        .distance;
        assert!((sampled - analytic).abs() < 1e-12);

        let point = depth.unproject(center, sampled);
        assert!((point.z - 1.0).abs() < 1e-9);
    }
}
