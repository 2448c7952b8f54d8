//! Authoritative drawable collection: flat insertion-ordered storage,
//! scene mode, and the pick-identity registry.
//!
//! The scene assigns pick identities when a drawable is added and
//! releases them when it is removed; picking itself never mutates the
//! registry.

mod drawable;
pub mod mode;

pub use drawable::{
    BatchedGeometry, Drawable, DrawableKind, Feature, PickGeometry, Tile,
    TileTree,
};
pub use mode::{ModeSet, SceneMode};

use crate::picking::registry::PickRegistry;

/// Stable handle to a drawable in a [`Scene`]. Never reused within one
/// scene, even after the drawable is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableKey(pub(crate) u32);

impl DrawableKey {
    /// Raw numeric value, for host-side bookkeeping.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

struct SceneDrawable {
    key: DrawableKey,
    drawable: Drawable,
}

/// The scene's drawable collection. Owns all drawables in a flat list in
/// insertion order (the deterministic tie-break order for equal pick
/// distances) together with the pick-identity registry.
pub struct Scene {
    mode: SceneMode,
    drawables: Vec<SceneDrawable>,
    registry: PickRegistry,
    next_key: u32,
}

impl Scene {
    /// Create an empty scene in 3D mode.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(SceneMode::Scene3d)
    }

    /// Create an empty scene in the given mode.
    #[must_use]
    pub fn with_mode(mode: SceneMode) -> Self {
        Self {
            mode,
            drawables: Vec::new(),
            registry: PickRegistry::new(),
            next_key: 0,
        }
    }

    /// Current projection mode.
    #[must_use]
    pub const fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Switch projection mode (the host drives morph transitions).
    pub fn set_mode(&mut self, mode: SceneMode) {
        self.mode = mode;
    }

    /// Add a drawable, registering a pick identity for it (and one per
    /// sub-feature for batched and tiled drawables).
    ///
    /// Geometry is fixed once added; visibility flags stay mutable through
    /// [`Self::drawable_mut`]. To change geometry, remove and re-add.
    pub fn add(&mut self, drawable: Drawable) -> DrawableKey {
        let key = DrawableKey(self.next_key);
        self.next_key += 1;
        for feature in drawable.feature_indices() {
            let _ = self.registry.register(key, feature);
        }
        self.drawables.push(SceneDrawable { key, drawable });
        key
    }

    /// Remove a drawable, releasing all its pick identities for reuse.
    /// Returns the drawable, or `None` for an unknown key.
    pub fn remove(&mut self, key: DrawableKey) -> Option<Drawable> {
        let index = self.drawables.iter().position(|d| d.key == key)?;
        self.registry.release_drawable(key);
        Some(self.drawables.remove(index).drawable)
    }

    /// Look up a drawable by key.
    #[must_use]
    pub fn drawable(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables
            .iter()
            .find(|d| d.key == key)
            .map(|d| &d.drawable)
    }

    /// Mutable access for visibility tweaks (show/opacity/modes).
    pub fn drawable_mut(&mut self, key: DrawableKey) -> Option<&mut Drawable> {
        self.drawables
            .iter_mut()
            .find(|d| d.key == key)
            .map(|d| &mut d.drawable)
    }

    /// Number of drawables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether the scene holds no drawables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// The pick-identity registry.
    #[must_use]
    pub const fn registry(&self) -> &PickRegistry {
        &self.registry
    }

    /// Iterate drawables in insertion order, restricted to those that
    /// participate in the current mode's spatial partitioning.
    pub fn candidates(
        &self,
    ) -> impl Iterator<Item = (DrawableKey, &Drawable)> {
        let mode = self.mode;
        self.drawables
            .iter()
            .filter(move |d| d.drawable.modes.contains(mode))
            .map(|d| (d.key, &d.drawable))
    }

    pub(crate) fn set_feature_show(
        &mut self,
        key: DrawableKey,
        index: u32,
        show: bool,
    ) -> Option<bool> {
        let drawable = self.drawable_mut(key)?;
        if let DrawableKind::Batched(batch) = &mut drawable.kind {
            let feature = batch.features.get_mut(index as usize)?;
            let previous = feature.show;
            feature.show = show;
            return Some(previous);
        }
        None
    }

    pub(crate) fn set_drawable_show(
        &mut self,
        key: DrawableKey,
        show: bool,
    ) -> Option<bool> {
        let drawable = self.drawable_mut(key)?;
        let previous = drawable.show;
        drawable.show = show;
        Some(previous)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
