//! The picking strategies and their shared plumbing.
//!
//! [`PickEngine`] is the facade hosts call; the submodules hold the
//! strategy internals: the dense identity [`registry`], the offscreen
//! [`IdFrame`] target with its center-out decode order, the analytic ray
//! intersector, the depth/position resolver, and the drill iterator.

pub mod drill;
pub mod engine;
pub mod frame;
pub mod hooks;
pub mod id_buffer;
pub mod position;
pub mod ray;
pub mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::PickEngine;
pub use frame::IdFrame;
pub use registry::{PickId, PickRegistry};

use crate::scene::DrawableKey;

/// Integer window pixel coordinate, origin at the top-left of the
/// viewport, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowPosition {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate.
    pub y: i32,
}

impl WindowPosition {
    /// Create a window position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Result record of a successful pick: the drawable that was hit and,
/// for batched and tiled drawables, the specific sub-feature struck.
/// Transient; constructed per call and never retained by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickedObject {
    /// The drawable that was hit.
    pub drawable: DrawableKey,
    /// Sub-feature identifier: batch feature index or content-tile arena
    /// index. `None` for single-geometry primitives.
    pub feature: Option<u32>,
}
