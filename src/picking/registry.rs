//! Dense bijective mapping between color-encodable pick identities and
//! (drawable, sub-feature) pairs.
//!
//! Decoded raw values map back via array indexing rather than hashing:
//! the readback path resolves thousands of pixels per drill session and
//! must stay O(1) per pixel. Slots are recycled through a free list so
//! raw values stay small enough to encode in an 8-bit-per-channel color
//! target.

use rustc_hash::FxHashMap;

use super::PickedObject;
use crate::scene::DrawableKey;

/// Raw value reserved for "nothing rendered here".
pub const BACKGROUND: u32 = 0;

/// A pick identity. The raw, color-encodable value is the dense registry
/// index plus one, so it is never the background sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickId(u32);

impl PickId {
    /// Raw value as written into the id buffer.
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0 + 1
    }

    /// Inverse of [`Self::to_raw`]; the background sentinel has no id.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw.checked_sub(1) {
            Some(index) => Some(Self(index)),
            None => None,
        }
    }

    /// RGBA8 encoding of the raw value (little-endian channel order), for
    /// hosts whose pick target is a color texture rather than `R32Uint`.
    #[must_use]
    pub const fn to_color(self) -> [u8; 4] {
        self.to_raw().to_le_bytes()
    }

    /// Inverse of [`Self::to_color`].
    #[must_use]
    pub const fn from_color(color: [u8; 4]) -> Option<Self> {
        Self::from_raw(u32::from_le_bytes(color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Owner {
    drawable: DrawableKey,
    feature: Option<u32>,
}

/// The pick-identity registry. Owned by the scene; mutated only by
/// drawable registration and destruction, never by picking itself.
pub struct PickRegistry {
    /// Dense slot array indexed by `PickId`; `None` slots are released
    /// and waiting on the free list.
    entries: Vec<Option<Owner>>,
    free: Vec<u32>,
    reverse: FxHashMap<Owner, PickId>,
}

impl PickRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            reverse: FxHashMap::default(),
        }
    }

    /// Register a (drawable, sub-feature) pair. Idempotent: re-registering
    /// an existing pair returns its current identity.
    pub fn register(
        &mut self,
        drawable: DrawableKey,
        feature: Option<u32>,
    ) -> PickId {
        let owner = Owner { drawable, feature };
        if let Some(&id) = self.reverse.get(&owner) {
            return id;
        }
        let id = if let Some(index) = self.free.pop() {
            self.entries[index as usize] = Some(owner);
            PickId(index)
        } else {
            self.entries.push(Some(owner));
            PickId(self.entries.len() as u32 - 1)
        };
        let _ = self.reverse.insert(owner, id);
        id
    }

    /// Resolve an identity to its pair. Released or never-registered
    /// identities resolve to `None`; this never fails.
    #[must_use]
    pub fn resolve(&self, id: PickId) -> Option<PickedObject> {
        let owner = (*self.entries.get(id.0 as usize)?)?;
        Some(PickedObject {
            drawable: owner.drawable,
            feature: owner.feature,
        })
    }

    /// Resolve a raw buffer value; the background sentinel is `None`.
    #[must_use]
    pub fn resolve_raw(&self, raw: u32) -> Option<PickedObject> {
        self.resolve(PickId::from_raw(raw)?)
    }

    /// Look up the identity of a registered pair, if any.
    #[must_use]
    pub fn lookup(
        &self,
        drawable: DrawableKey,
        feature: Option<u32>,
    ) -> Option<PickId> {
        self.reverse.get(&Owner { drawable, feature }).copied()
    }

    /// Release one identity; its slot becomes eligible for reuse.
    pub fn release(&mut self, id: PickId) {
        if let Some(slot) = self.entries.get_mut(id.0 as usize) {
            if let Some(owner) = slot.take() {
                let _ = self.reverse.remove(&owner);
                self.free.push(id.0);
            }
        }
    }

    /// Release every identity owned by `drawable`.
    pub fn release_drawable(&mut self, drawable: DrawableKey) {
        let ids: Vec<PickId> = self
            .reverse
            .iter()
            .filter(|(owner, _)| owner.drawable == drawable)
            .map(|(_, &id)| id)
            .collect();
        for id in ids {
            self.release(id);
        }
    }

    /// Number of live identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Whether no identities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}

impl Default for PickRegistry {
    fn default() -> Self {
        Self::new()
    }
}
