//! The pick-operation facade.
//!
//! All public picking entry points live here: argument validation, the
//! mode gate, strategy dispatch, and drill control flow. Calls are
//! synchronous and run inline on the calling thread; the id frame is the
//! one shared offscreen target, so the engine takes `&mut self` for the
//! screen strategies.

use glam::DVec3;
use log::debug;

use super::drill::{ExclusionSet, HiddenScope};
use super::frame::IdFrame;
use super::hooks::{DepthSource, PickRasterizer};
use super::{id_buffer, position, ray as ray_pick, PickedObject, WindowPosition};
use crate::error::PickError;
use crate::geom::Ray;
use crate::options::PickOptions;
use crate::scene::mode::{ray_pick_modes, require_mode, SCREEN_PICK_MODES};
use crate::scene::Scene;

/// The scene-picking engine.
///
/// Owns the reusable offscreen id frame and the pick options; everything
/// else (drawables, registry, mode) lives on the [`Scene`], and the
/// actual rasterization/depth work happens behind the
/// [`hooks`](super::hooks) traits.
pub struct PickEngine {
    frame: IdFrame,
    options: PickOptions,
}

impl PickEngine {
    /// Engine with default options (3x3 search window, no ray picking
    /// during morph transitions).
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(PickOptions::default())
    }

    /// Engine with explicit options.
    #[must_use]
    pub const fn with_options(options: PickOptions) -> Self {
        Self {
            frame: IdFrame::new(),
            options,
        }
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &PickOptions {
        &self.options
    }

    /// Mutable options (e.g. to widen the default search window).
    pub fn options_mut(&mut self) -> &mut PickOptions {
        &mut self.options
    }

    // -----------------------------------------------------------------
    // Screen picking
    // -----------------------------------------------------------------

    /// Pick the topmost drawable at `position` using the default search
    /// window. `Ok(None)` when nothing pickable is in range.
    pub fn pick(
        &mut self,
        scene: &Scene,
        rasterizer: &mut dyn PickRasterizer,
        position: Option<WindowPosition>,
    ) -> Result<Option<PickedObject>, PickError> {
        self.pick_with_radius(
            scene,
            rasterizer,
            position,
            self.options.search_radius,
        )
    }

    /// [`Self::pick`] with an explicit search-window radius.
    pub fn pick_with_radius(
        &mut self,
        scene: &Scene,
        rasterizer: &mut dyn PickRasterizer,
        position: Option<WindowPosition>,
        radius: u32,
    ) -> Result<Option<PickedObject>, PickError> {
        let position = position.ok_or(PickError::MissingWindowPosition)?;
        require_mode(scene.mode(), SCREEN_PICK_MODES)?;
        Ok(id_buffer::pick(
            scene,
            rasterizer,
            &mut self.frame,
            position,
            radius,
        ))
    }

    /// Enumerate stacked hits at `position`, topmost first, temporarily
    /// hiding each returned object before re-picking. `limit` of `None`
    /// drills until nothing is left.
    pub fn drill_pick(
        &mut self,
        scene: &mut Scene,
        rasterizer: &mut dyn PickRasterizer,
        position: Option<WindowPosition>,
        limit: Option<usize>,
    ) -> Result<Vec<PickedObject>, PickError> {
        self.drill_pick_with_radius(
            scene,
            rasterizer,
            position,
            limit,
            self.options.search_radius,
        )
    }

    /// [`Self::drill_pick`] with an explicit search-window radius.
    pub fn drill_pick_with_radius(
        &mut self,
        scene: &mut Scene,
        rasterizer: &mut dyn PickRasterizer,
        position: Option<WindowPosition>,
        limit: Option<usize>,
        radius: u32,
    ) -> Result<Vec<PickedObject>, PickError> {
        let position = position.ok_or(PickError::MissingWindowPosition)?;
        require_mode(scene.mode(), SCREEN_PICK_MODES)?;

        let limit = limit.unwrap_or(usize::MAX);
        let mut picked = Vec::new();
        // Overrides roll back when the scope drops, on every exit path.
        let mut scope = HiddenScope::new(scene);
        while picked.len() < limit {
            let Some(hit) = id_buffer::pick(
                scope.scene(),
                rasterizer,
                &mut self.frame,
                position,
                radius,
            ) else {
                break;
            };
            picked.push(hit);
            scope.hide(&hit);
        }
        debug!("drill pick returned {} objects", picked.len());
        Ok(picked)
    }

    // -----------------------------------------------------------------
    // Ray picking
    // -----------------------------------------------------------------

    /// Pick the nearest drawable along `ray`. Requires a 3D scene mode.
    pub fn pick_from_ray(
        &self,
        scene: &Scene,
        ray: Option<&Ray>,
    ) -> Result<Option<PickedObject>, PickError> {
        let ray = self.validate_ray(scene, ray)?;
        let candidates = ray_pick::collect_candidates(scene, ray);
        Ok(candidates.first().map(|c| c.target))
    }

    /// Enumerate all hits along `ray` in distance order, nearest first.
    pub fn drill_pick_from_ray(
        &self,
        scene: &Scene,
        ray: Option<&Ray>,
        limit: Option<usize>,
    ) -> Result<Vec<PickedObject>, PickError> {
        let ray = self.validate_ray(scene, ray)?;
        let limit = limit.unwrap_or(usize::MAX);
        let mut excluded = ExclusionSet::default();
        let mut picked = Vec::new();
        for candidate in ray_pick::collect_candidates(scene, ray) {
            if picked.len() >= limit {
                break;
            }
            if excluded.contains(&candidate.target) {
                continue;
            }
            excluded.exclude(scene, &candidate.target);
            picked.push(candidate.target);
        }
        Ok(picked)
    }

    // -----------------------------------------------------------------
    // Position resolution
    // -----------------------------------------------------------------

    /// World-space position under the cursor: ID-buffer hit first, then a
    /// depth-buffer sample unprojected through the camera. `Ok(None)` when
    /// nothing was hit or the depth sample is empty.
    pub fn pick_position(
        &mut self,
        scene: &Scene,
        rasterizer: &mut dyn PickRasterizer,
        depth: &dyn DepthSource,
        position: Option<WindowPosition>,
    ) -> Result<Option<DVec3>, PickError> {
        let window = position.ok_or(PickError::MissingWindowPosition)?;
        if !depth.pick_position_supported() {
            return Err(PickError::PickPositionUnsupported);
        }
        require_mode(scene.mode(), SCREEN_PICK_MODES)?;

        let hit = id_buffer::pick(
            scene,
            rasterizer,
            &mut self.frame,
            window,
            self.options.search_radius,
        );
        if hit.is_none() {
            return Ok(None);
        }
        Ok(position::resolve_screen(depth, window))
    }

    /// World-space intersection of `ray` with the nearest drawable it
    /// hits: the ray evaluated at the chosen candidate's distance.
    pub fn pick_position_from_ray(
        &self,
        scene: &Scene,
        depth: &dyn DepthSource,
        ray: Option<&Ray>,
    ) -> Result<Option<DVec3>, PickError> {
        if !depth.pick_position_supported() {
            return Err(PickError::PickPositionUnsupported);
        }
        let ray = self.validate_ray(scene, ray)?;
        let candidates = ray_pick::collect_candidates(scene, ray);
        Ok(candidates
            .first()
            .map(|c| position::resolve_ray(ray, c.distance)))
    }

    // -----------------------------------------------------------------

    fn validate_ray<'r>(
        &self,
        scene: &Scene,
        ray: Option<&'r Ray>,
    ) -> Result<&'r Ray, PickError> {
        let ray = ray.ok_or(PickError::MissingRay)?;
        if ray.is_degenerate() {
            return Err(PickError::DegenerateRay);
        }
        require_mode(
            scene.mode(),
            ray_pick_modes(self.options.ray_picking_during_morph),
        )?;
        Ok(ray)
    }
}

impl Default for PickEngine {
    fn default() -> Self {
        Self::new()
    }
}
