//! Collaborator traits implemented by the host renderer.
//!
//! The engine owns the decision logic only. Rendering geometry into the
//! id frame, sampling the main scene's depth buffer, and unprojecting
//! window coordinates are the host's business, reached through these
//! seams.

use glam::DVec3;

use super::frame::IdFrame;
use super::registry::PickId;
use super::WindowPosition;
use crate::scene::PickGeometry;

/// Viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Whether `position` lies inside the viewport.
    #[must_use]
    pub const fn contains(&self, position: WindowPosition) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }
}

/// One entry of the encode pass: geometry to draw flat-colored with its
/// pick identity. The visibility filter has already run; every item here
/// is pickable.
#[derive(Debug, Clone, Copy)]
pub struct EncodeItem<'a> {
    /// Geometry to rasterize.
    pub geometry: &'a PickGeometry,
    /// Identity whose raw value stands in for the shaded color.
    pub id: PickId,
}

/// The letterboxed window region the encode pass covers: a square of side
/// `2 * radius + 1` centered on the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRegion {
    /// Cursor position at the center of the region.
    pub center: WindowPosition,
    /// Search-window radius in pixels.
    pub radius: u32,
}

impl PickRegion {
    /// Window coordinate of frame pixel `(fx, fy)`. May fall outside the
    /// viewport near edges; such pixels stay background.
    #[must_use]
    pub const fn window_coordinate(&self, fx: u32, fy: u32) -> (i64, i64) {
        let radius = self.radius as i64;
        (
            self.center.x as i64 - radius + fx as i64,
            self.center.y as i64 - radius + fy as i64,
        )
    }
}

/// Rasterization hook: render every encode item into `frame`, pick
/// identity standing in for shaded color, nearest surface winning per
/// pixel (depth-tested, no blending, no shading).
///
/// The pass must stay invisible to the user: it targets the supplied
/// frame and must leave the main color/depth targets untouched. Pixels of
/// the region that fall outside the viewport are left at background.
pub trait PickRasterizer {
    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Render `items` into `frame` over the given window region.
    fn render_for_pick(
        &mut self,
        items: &[EncodeItem<'_>],
        region: &PickRegion,
        frame: &mut IdFrame,
    );
}

/// Depth-buffer hook used by the position resolver.
pub trait DepthSource {
    /// Whether the runtime can resolve positions at all (depth-texture
    /// support). Reported by the rendering collaborator, not decided here.
    fn pick_position_supported(&self) -> bool;

    /// Sample the main scene's depth buffer at `position`. `None` means
    /// nothing was rendered there.
    fn sample_depth(&self, position: WindowPosition) -> Option<f64>;

    /// Unproject a window coordinate plus sampled depth into world space
    /// using the active camera/projection transform.
    fn unproject(&self, position: WindowPosition, depth: f64) -> DVec3;
}
