//! Curated API surface for binaries, benches and examples.
//!
//! Prefer these re-exports over deep module paths; the module layout behind
//! them may move.

// Geometry
pub use crate::geom2::{is_left, lex_less, point2, ConvexPolygon, Point2, Transformation};
// Shapes
pub use crate::geom2::{
    draw_polygon_radial, regular_polygon, scatter, RadialCfg, ReplayToken as ShapeReplay, VertexCount,
};
// Search
pub use crate::beam::{
    packing_score, BeamSearch, CandidateArena, CandidateId, ContactPlacer, Frontier, PackingCandidate, PlaceCfg,
    Placement, PlacementRequest, Pose,
};
// Scene
pub use crate::scene::{
    Arrangement, Environment, PackCfg, PackError, Packer, Scene, DEFAULT_BEAM_WIDTH,
};
