//! Convex polygon packing.
//!
//! Layout
//! - `geom2`: exact convex geometry (hulls, containment, SAT collision, area,
//!   tracked affine poses) and shape generators.
//! - `beam`: beam search over insertion orders with contact placement.
//! - `scene`: configuration, environment, the `Packer` seam and errors.
//!
//! API Policy
//! - Breaking changes are fine while the crate is pre-1.0; prefer `api` or
//!   `prelude` imports over deep paths.

pub mod api;
pub mod beam;
pub mod geom2;
pub mod scene;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{ConvexPolygon, Point2, Transformation};
pub use scene::{Arrangement, Environment, PackCfg, PackError, Packer, Scene};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::beam::{BeamSearch, ContactPlacer, PlaceCfg, Placement, PlacementRequest, Pose};
    pub use crate::geom2::{
        draw_polygon_radial, is_left, point2, regular_polygon, scatter, ConvexPolygon, Point2, RadialCfg,
        ReplayToken, Transformation, VertexCount,
    };
    pub use crate::scene::{Arrangement, Environment, PackCfg, PackError, Packer, Scene};
}
