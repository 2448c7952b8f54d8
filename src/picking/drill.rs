//! Drill-pick support: scoped visibility overrides for the screen
//! strategy and exclusion sets for the ray strategy.
//!
//! Exclusion granularity follows the batch's capabilities: a feature is
//! excluded individually only when its batch supports per-feature show;
//! otherwise the whole drawable is excluded, so only the nearest feature
//! of such a batch is ever reported per drill session.

use rustc_hash::FxHashSet;

use super::PickedObject;
use crate::scene::{Drawable, DrawableKey, DrawableKind, Scene};

/// Whether excluding `target` hides a single feature or its whole
/// drawable.
fn feature_grained(drawable: Option<&Drawable>, target: &PickedObject) -> bool {
    target.feature.is_some()
        && matches!(
            drawable.map(|d| &d.kind),
            Some(DrawableKind::Batched(batch)) if batch.per_feature_show
        )
}

// ---------------------------------------------------------------------------
// HiddenScope
// ---------------------------------------------------------------------------

enum SavedShow {
    Drawable { key: DrawableKey, show: bool },
    Feature { key: DrawableKey, index: u32, show: bool },
}

/// Scoped visibility overrides for screen drill picking.
///
/// Every `hide` records the previous show flag; `Drop` restores them all
/// in reverse order, so the overrides roll back on every exit path
/// (normal return, early termination, error, panic). This is the
/// guaranteed-cleanup scope the drill iterator relies on; no manual
/// set/restore pairs.
pub(crate) struct HiddenScope<'a> {
    scene: &'a mut Scene,
    saved: Vec<SavedShow>,
}

impl<'a> HiddenScope<'a> {
    pub(crate) fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            saved: Vec::new(),
        }
    }

    /// Shared view of the scene with the current overrides applied.
    pub(crate) fn scene(&self) -> &Scene {
        self.scene
    }

    /// Temporarily hide the picked object at the appropriate granularity.
    pub(crate) fn hide(&mut self, target: &PickedObject) {
        let key = target.drawable;
        if feature_grained(self.scene.drawable(key), target) {
            if let Some(index) = target.feature {
                if let Some(show) =
                    self.scene.set_feature_show(key, index, false)
                {
                    self.saved.push(SavedShow::Feature { key, index, show });
                }
            }
        } else if let Some(show) = self.scene.set_drawable_show(key, false) {
            self.saved.push(SavedShow::Drawable { key, show });
        }
    }
}

impl Drop for HiddenScope<'_> {
    fn drop(&mut self) {
        while let Some(saved) = self.saved.pop() {
            match saved {
                SavedShow::Drawable { key, show } => {
                    let _ = self.scene.set_drawable_show(key, show);
                }
                SavedShow::Feature { key, index, show } => {
                    let _ = self.scene.set_feature_show(key, index, show);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ExclusionSet
// ---------------------------------------------------------------------------

/// Already-returned objects of a ray drill session. No scene mutation:
/// the sorted candidate list is filtered instead.
#[derive(Default)]
pub(crate) struct ExclusionSet {
    drawables: FxHashSet<DrawableKey>,
    features: FxHashSet<(DrawableKey, u32)>,
}

impl ExclusionSet {
    pub(crate) fn exclude(&mut self, scene: &Scene, target: &PickedObject) {
        if feature_grained(scene.drawable(target.drawable), target) {
            if let Some(index) = target.feature {
                let _ = self.features.insert((target.drawable, index));
            }
        } else {
            let _ = self.drawables.insert(target.drawable);
        }
    }

    pub(crate) fn contains(&self, target: &PickedObject) -> bool {
        if self.drawables.contains(&target.drawable) {
            return true;
        }
        target
            .feature
            .is_some_and(|i| self.features.contains(&(target.drawable, i)))
    }
}
