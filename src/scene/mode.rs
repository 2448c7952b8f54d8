//! Scene modes and the data-driven mode gate.
//!
//! Which picking strategies are legal in which projection mode is a pure
//! table ([`ModeSet`]), not branching scattered through the operations.
//! The gate runs before any rasterization or intersection work, so an
//! illegal call costs nothing on the GPU side.

use serde::{Deserialize, Serialize};

use crate::error::PickError;

/// Projection mode of the scene. Read-only input to the mode gate; owned
/// by the host, not by the picking engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
pub enum SceneMode {
    /// Full 3D perspective (or orthographic) view.
    #[default]
    Scene3d,
    /// Flat 2D map view.
    Scene2d,
    /// 2.5D hybrid view.
    ColumbusView,
    /// Mid-transition between two of the stable modes.
    Morphing,
}

impl SceneMode {
    const fn bit(self) -> u8 {
        match self {
            Self::Scene3d => 1,
            Self::Scene2d => 1 << 1,
            Self::ColumbusView => 1 << 2,
            Self::Morphing => 1 << 3,
        }
    }
}

/// A set of scene modes, used both as the gate's allowed-mode table and as
/// a drawable's mode participation mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSet(u8);

impl ModeSet {
    /// No modes.
    pub const EMPTY: Self = Self(0);
    /// Every mode, including morph transitions.
    pub const ALL: Self = Self(0b1111);
    /// The three stable modes (everything but [`SceneMode::Morphing`]).
    pub const STABLE: Self = Self(0b0111);

    /// Set containing only `mode`.
    #[must_use]
    pub const fn only(mode: SceneMode) -> Self {
        Self(mode.bit())
    }

    /// This set plus `mode`.
    #[must_use]
    pub const fn with(self, mode: SceneMode) -> Self {
        Self(self.0 | mode.bit())
    }

    /// Whether `mode` is in the set.
    #[must_use]
    pub const fn contains(self, mode: SceneMode) -> bool {
        self.0 & mode.bit() != 0
    }
}

impl Default for ModeSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Modes in which screen-rasterization picking is legal: all of them.
/// The encode pass draws whatever the scene currently looks like, morph
/// transitions included.
pub const SCREEN_PICK_MODES: ModeSet = ModeSet::ALL;

/// Modes in which ray picking is legal. Rays only make sense in a true 3D
/// perspective; whether that extends to morph transitions is the
/// integrator's policy (`ray_picking_during_morph` in
/// [`PickOptions`](crate::options::PickOptions)).
#[must_use]
pub const fn ray_pick_modes(during_morph: bool) -> ModeSet {
    let base = ModeSet::only(SceneMode::Scene3d);
    if during_morph {
        base.with(SceneMode::Morphing)
    } else {
        base
    }
}

/// Fail with [`PickError::UnsupportedMode`] when `mode` is outside
/// `allowed`.
pub const fn require_mode(
    mode: SceneMode,
    allowed: ModeSet,
) -> Result<(), PickError> {
    if allowed.contains(mode) {
        Ok(())
    } else {
        Err(PickError::UnsupportedMode(mode))
    }
}
