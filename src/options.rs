//! Centralized picking options with TOML preset support.
//!
//! All tweakable knobs of the pick engine live here. Options serialize
//! to/from TOML so hosts can ship picking presets next to their other
//! view configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PickError;

/// Default search-window radius: radius 1 is the classic 3x3 window.
const DEFAULT_SEARCH_RADIUS: u32 = 1;

/// Pick engine configuration. Uses `#[serde(default)]` so partial TOML
/// files (e.g. only overriding `search_radius`) work correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickOptions {
    /// Search-window radius in pixels around the cursor. The window is the
    /// odd-sized square of side `2 * search_radius + 1`; it is what lets a
    /// pick tolerate sub-pixel misses against thin geometry.
    pub search_radius: u32,
    /// Whether ray-based strategies stay legal while the scene is morphing
    /// between modes. The stable modes only ever allow rays in 3D; this
    /// knob is the integrator's policy for the transition window.
    pub ray_picking_during_morph: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
            ray_picking_during_morph: false,
        }
    }
}

impl PickOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PickError> {
        let content = std::fs::read_to_string(path).map_err(PickError::Io)?;
        toml::from_str(&content)
            .map_err(|e| PickError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PickError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PickError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PickError::Io)?;
        }
        std::fs::write(path, content).map_err(PickError::Io)
    }

    /// Side length of the search window in pixels (always odd).
    #[must_use]
    pub const fn window_size(&self) -> u32 {
        2 * self.search_radius + 1
    }
}
