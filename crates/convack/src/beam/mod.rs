//! Beam search packer: insertion-order search with contact placement.
//!
//! Purpose
//! - Explore a bounded slice of the permutation tree of insertion orders,
//!   scoring every partial packing by wasted convex-hull area
//!   (`1 - covered / hull_area`, lower is better).
//! - Place each child for real while expanding, so scores describe actual
//!   positions rather than an order alone.
//!
//! Why this design
//! - Candidates live in an arena and point to parents by id: the frontier can
//!   drop nodes freely while survivors keep their ancestors.
//! - Placement sits behind the `Placement` trait so other strategies can be
//!   swapped in without touching scoring or search.
//!
//! Code cross-refs: `Scene`, `Packer`, `Environment`, `ConvexPolygon::convex_hull_of`

mod place;
mod search;
mod types;

pub use place::{
    contact_distance, ray_segment_intersection, ContactPlacer, PlaceCfg, Placement, PlacementRequest, Pose,
};
pub use search::BeamSearch;
pub use types::{packing_score, CandidateArena, CandidateId, Frontier, PackingCandidate};

#[cfg(test)]
mod tests;
