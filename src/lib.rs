// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap and panic freely
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

//! Scene-picking engine for interactive 3D renderers.
//!
//! Hitscan resolves a 2D window coordinate or a 3D ray to the drawable
//! (and optionally the world-space position) it intersects, in a scene
//! mixing tessellated primitives, batched geometry with per-feature
//! identity, and hierarchical tile trees.
//!
//! # Key entry points
//!
//! - [`picking::PickEngine`] - the pick operations (`pick`, `drill_pick`,
//!   `pick_from_ray`, `pick_position`, ...)
//! - [`scene::Scene`] - the drawable collection and pick-identity registry
//! - [`options::PickOptions`] - runtime configuration (search window,
//!   morph-mode policy)
//! - [`picking::hooks`] - the collaborator traits the host renderer
//!   implements ([`PickRasterizer`](picking::hooks::PickRasterizer),
//!   [`DepthSource`](picking::hooks::DepthSource))
//!
//! # Architecture
//!
//! The engine owns no GPU resources. Rasterized-ID picking renders pickable
//! geometry into an [`IdFrame`](picking::IdFrame) through the host's
//! rasterizer hook, then decodes the pixels under the cursor back into a
//! [`PickedObject`](picking::PickedObject) via the scene's dense
//! [`PickRegistry`](picking::PickRegistry). Ray picking never rasterizes:
//! it walks bounding volumes analytically and sorts candidates by
//! distance. Both strategies share the same visibility predicate and mode
//! gate, and both feed the same depth/position resolver.

pub mod error;
pub mod geom;
pub mod options;
pub mod picking;
pub mod scene;
