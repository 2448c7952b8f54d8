//! Drawable variants: tessellated primitives, batched geometry with
//! per-feature identity, and hierarchical tile trees.
//!
//! Drawables are tagged variants rather than a class hierarchy: the
//! picking strategies only need bounding volumes, exact intersection
//! where available, the visibility predicate, and (for batched/tiled
//! variants) a sub-feature enumerator.

use crate::geom::{BoundingVolume, Ray, TriMesh};
use crate::scene::mode::ModeSet;

// ---------------------------------------------------------------------------
// PickGeometry
// ---------------------------------------------------------------------------

/// Pickable geometry of one drawable or sub-feature.
#[derive(Debug, Clone, PartialEq)]
pub enum PickGeometry {
    /// Analytic sphere.
    Sphere(crate::geom::BoundingSphere),
    /// Analytic axis-aligned box.
    Box(crate::geom::Aabb),
    /// Tessellated triangle mesh; exact per-triangle intersection.
    Mesh(TriMesh),
    /// Geometry known only by a bounding proxy (e.g. tile content that has
    /// not streamed in yet). Ray picking falls back to the proxy's entry
    /// distance.
    Proxy(BoundingVolume),
}

impl PickGeometry {
    /// Bounding volume used for cheap ray rejects.
    #[must_use]
    pub const fn bounds(&self) -> BoundingVolume {
        match self {
            Self::Sphere(s) => BoundingVolume::Sphere(*s),
            Self::Box(b) => BoundingVolume::Box(*b),
            Self::Mesh(m) => BoundingVolume::Sphere(m.bounds()),
            Self::Proxy(bv) => *bv,
        }
    }

    /// Intersection distance of `ray` with this geometry: exact surface
    /// distance when the shape exposes one, bounding-proxy entry distance
    /// otherwise. The bounding volume rejects first, so meshes only run
    /// their triangle test when the cheap check passes.
    #[must_use]
    pub fn ray_distance(&self, ray: &Ray) -> Option<f64> {
        match self {
            Self::Sphere(s) => s.entry_distance(ray),
            Self::Box(b) => b.entry_distance(ray),
            Self::Mesh(m) => {
                let _ = m.bounds().entry_distance(ray)?;
                m.intersect(ray)
            }
            Self::Proxy(bv) => bv.entry_distance(ray),
        }
    }
}

// ---------------------------------------------------------------------------
// Batched geometry
// ---------------------------------------------------------------------------

/// One individually identifiable unit within a batched drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Per-feature show flag. Only honored when the owning batch supports
    /// per-feature visibility.
    pub show: bool,
    /// Per-feature effective opacity.
    pub opacity: f64,
    /// The feature's geometry.
    pub geometry: PickGeometry,
}

impl Feature {
    /// Feature with default visibility (shown, opaque).
    #[must_use]
    pub const fn new(geometry: PickGeometry) -> Self {
        Self {
            show: true,
            opacity: 1.0,
            geometry,
        }
    }
}

/// A batched-instance drawable: many features sharing one GPU resource.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchedGeometry {
    /// The features, in batch order. Feature indices used in pick results
    /// index into this list.
    pub features: Vec<Feature>,
    /// Whether instances carry an independent show attribute. When false,
    /// features cannot be hidden individually: drill exclusion operates on
    /// the whole batch, so only its nearest feature is ever reported per
    /// drill session.
    pub per_feature_show: bool,
}

// ---------------------------------------------------------------------------
// Tile trees
// ---------------------------------------------------------------------------

/// One node of a hierarchical tile dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Bounding volume of this tile and its entire subtree.
    pub bounds: BoundingVolume,
    /// Renderable content, if this tile has streamed in any.
    pub content: Option<PickGeometry>,
    /// Arena indices of child tiles.
    pub children: Vec<usize>,
}

/// Arena-allocated tile hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct TileTree {
    tiles: Vec<Tile>,
    roots: Vec<usize>,
}

impl TileTree {
    /// Build a tree from an arena of tiles and the indices of its roots.
    /// Child/root indices past the arena are dropped.
    #[must_use]
    pub fn new(mut tiles: Vec<Tile>, roots: Vec<usize>) -> Self {
        let len = tiles.len();
        for tile in &mut tiles {
            tile.children.retain(|&c| c < len);
        }
        let roots = roots.into_iter().filter(|&r| r < len).collect();
        Self { tiles, roots }
    }

    /// Single-root convenience constructor.
    #[must_use]
    pub fn with_root(tiles: Vec<Tile>) -> Self {
        Self::new(tiles, vec![0])
    }

    /// The tile arena, in index order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Visit every tile with content, pruning subtrees whose bounds `ray`
    /// misses. The visitor receives the tile's arena index and content.
    pub fn visit_hit(
        &self,
        ray: &Ray,
        visitor: &mut impl FnMut(usize, &PickGeometry),
    ) {
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(index) = stack.pop() {
            let tile = &self.tiles[index];
            if tile.bounds.entry_distance(ray).is_none() {
                continue;
            }
            if let Some(content) = &tile.content {
                visitor(index, content);
            }
            stack.extend_from_slice(&tile.children);
        }
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

/// What kind of drawable this is.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawableKind {
    /// A single tessellated primitive.
    Primitive(PickGeometry),
    /// A batched-instance primitive with per-feature identity.
    Batched(BatchedGeometry),
    /// A hierarchical tile dataset; pick results identify the content tile
    /// by its arena index.
    Tileset(TileTree),
}

/// A renderable object in the scene's drawable collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Whether the drawable is shown at all.
    pub show: bool,
    /// Effective opacity; a drawable at exactly 0 is invisible to picking,
    /// translucent values remain pickable.
    pub opacity: f64,
    /// Scene modes this drawable participates in.
    pub modes: ModeSet,
    /// Geometry variant.
    pub kind: DrawableKind,
}

impl Drawable {
    /// A single-geometry primitive, shown and opaque.
    #[must_use]
    pub fn primitive(geometry: PickGeometry) -> Self {
        Self {
            show: true,
            opacity: 1.0,
            modes: ModeSet::ALL,
            kind: DrawableKind::Primitive(geometry),
        }
    }

    /// A batched drawable from its features.
    #[must_use]
    pub fn batched(features: Vec<Feature>, per_feature_show: bool) -> Self {
        Self {
            show: true,
            opacity: 1.0,
            modes: ModeSet::ALL,
            kind: DrawableKind::Batched(BatchedGeometry {
                features,
                per_feature_show,
            }),
        }
    }

    /// A tileset drawable from its tile tree.
    #[must_use]
    pub fn tileset(tree: TileTree) -> Self {
        Self {
            show: true,
            opacity: 1.0,
            modes: ModeSet::ALL,
            kind: DrawableKind::Tileset(tree),
        }
    }

    /// The shared visibility predicate: pickable iff shown with opacity
    /// above zero. Evaluated during the encode pass for screen picking and
    /// per candidate for ray picking.
    #[must_use]
    pub fn is_pickable(&self) -> bool {
        self.show && self.opacity > 0.0
    }

    /// Whether sub-feature `index` of this drawable is pickable. For
    /// non-batched drawables this is just [`Self::is_pickable`].
    #[must_use]
    pub fn feature_pickable(&self, index: usize) -> bool {
        if !self.is_pickable() {
            return false;
        }
        match &self.kind {
            DrawableKind::Batched(batch) => {
                batch.features.get(index).is_some_and(|f| {
                    (f.show || !batch.per_feature_show) && f.opacity > 0.0
                })
            }
            _ => true,
        }
    }

    /// Sub-feature identifiers this drawable can produce: feature indices
    /// for batches, content-tile arena indices for tilesets.
    pub(crate) fn feature_indices(&self) -> Vec<Option<u32>> {
        match &self.kind {
            DrawableKind::Primitive(_) => vec![None],
            DrawableKind::Batched(batch) => (0..batch.features.len())
                .map(|i| Some(i as u32))
                .collect(),
            DrawableKind::Tileset(tree) => tree
                .tiles()
                .iter()
                .enumerate()
                .filter(|(_, t)| t.content.is_some())
                .map(|(i, _)| Some(i as u32))
                .collect(),
        }
    }
}
