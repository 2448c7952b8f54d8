//! The offscreen id target and its center-out decode order.
//!
//! The frame is a CPU-visible grid of raw pick-identity values, sized to
//! the search window (a letterboxed sub-region of the viewport, not the
//! whole surface). It is reused across calls and fully cleared at the
//! start of each one, so stale values can never leak between picks.

use super::registry::BACKGROUND;

/// Offscreen identity buffer the rasterizer hook writes into.
#[derive(Debug, Clone)]
pub struct IdFrame {
    size: u32,
    pixels: Vec<u32>,
}

impl IdFrame {
    /// Create an empty frame; [`Self::reset`] sizes it before first use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            size: 0,
            pixels: Vec::new(),
        }
    }

    /// Clear to the background sentinel and resize to an odd square of
    /// side `2 * radius + 1`.
    pub fn reset(&mut self, radius: u32) {
        self.size = 2 * radius + 1;
        let len = (self.size * self.size) as usize;
        self.pixels.clear();
        self.pixels.resize(len, BACKGROUND);
    }

    /// Side length in pixels (odd; 0 before the first reset).
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Write one pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, raw: u32) {
        if x < self.size && y < self.size {
            self.pixels[(y * self.size + x) as usize] = raw;
        }
    }

    /// Read one pixel; out-of-bounds reads are background.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        if x < self.size && y < self.size {
            self.pixels[(y * self.size + x) as usize]
        } else {
            BACKGROUND
        }
    }

    /// Decode the frame: scan outward from the center pixel in expanding
    /// square rings and return the first non-background value.
    ///
    /// Within a ring the order is pinned: top row left-to-right, then the
    /// intermediate rows (left column before right column, top-to-bottom),
    /// then the bottom row left-to-right. This is the tie-break order when
    /// two drawables are equally near the cursor.
    #[must_use]
    pub fn first_hit(&self) -> Option<u32> {
        if self.size == 0 {
            return None;
        }
        let center = (self.size / 2) as i32;
        let radius = center;
        for ring in 0..=radius {
            for (dx, dy) in ring_offsets(ring) {
                let raw = self.get((center + dx) as u32, (center + dy) as u32);
                if raw != BACKGROUND {
                    return Some(raw);
                }
            }
        }
        None
    }
}

impl Default for IdFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Offsets of the square ring at distance `ring` from the center, in the
/// deterministic scan order documented on [`IdFrame::first_hit`].
fn ring_offsets(ring: i32) -> Vec<(i32, i32)> {
    if ring == 0 {
        return vec![(0, 0)];
    }
    let mut offsets = Vec::with_capacity((8 * ring) as usize);
    for dx in -ring..=ring {
        offsets.push((dx, -ring));
    }
    for dy in (1 - ring)..ring {
        offsets.push((-ring, dy));
        offsets.push((ring, dy));
    }
    for dx in -ring..=ring {
        offsets.push((dx, ring));
    }
    offsets
}
