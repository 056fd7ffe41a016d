//! Exact 2D convex geometry (vertex representation).
//!
//! Purpose
//! - Provide the primitives the packer scores and places with: hull
//!   construction, hull-of-hulls merge, strict containment, SAT collision,
//!   shoelace area and a tracked affine pose.
//! - Predicates are exact sign tests on `f64` (no epsilon): touching shapes
//!   do not collide, boundary points are not contained.
//!
//! Degenerate inputs (empty, single point, colinear, duplicates) are defined
//! values, not errors.
//!
//! Code cross-refs: `ConvexPolygon`, `Transformation`, `Point2`, `is_left`

mod hull;
pub mod point;
mod polygon;
pub mod shapes;
mod transform;

pub use point::{is_left, lex_less, point2, Point2};
pub use polygon::ConvexPolygon;
pub use shapes::{draw_polygon_radial, regular_polygon, scatter, RadialCfg, ReplayToken, VertexCount};
pub use transform::Transformation;
