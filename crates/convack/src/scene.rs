//! Scene: packer configuration, the fixed environment, and the `Packer` seam.
//!
//! Purpose
//! - `Scene` is the entry point callers hold: a validated `PackCfg` plus an
//!   `Environment` of obstacles and an optional boundary.
//! - `Packer` is the strategy seam; `BeamSearch` is the only implementation.
//!
//! Error policy
//! - Configuration is checked up front and rejected with `PackError`.
//! - Geometry never errors; degenerate inputs have defined results.

use thiserror::Error;

use crate::beam::{BeamSearch, PlaceCfg, Pose};
use crate::geom2::ConvexPolygon;

/// Beam width used by `Scene::new`.
pub const DEFAULT_BEAM_WIDTH: usize = 10;

/// Errors reported by packers and their configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    /// A beam of width 0 explores nothing.
    #[error("beam width must be at least 1")]
    InvalidBeamWidth,

    #[error("invalid placement configuration: {reason}")]
    InvalidPlacement { reason: &'static str },

    /// No pose of this polygon fits next to any surviving partial packing.
    #[error("polygon {index} cannot be placed without overlap")]
    Unplaceable { index: usize },
}

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct PackCfg {
    /// Candidates kept per depth; 1 is greedy.
    pub beam_width: usize,
    /// Scoring budget; once spent, the beam narrows to 1 for the remaining depths.
    pub max_candidates: Option<usize>,
    pub place: PlaceCfg,
}

impl Default for PackCfg {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
            max_candidates: None,
            place: PlaceCfg::default(),
        }
    }
}

impl PackCfg {
    pub fn validate(&self) -> Result<(), PackError> {
        if self.beam_width == 0 {
            return Err(PackError::InvalidBeamWidth);
        }
        if self.place.rotations == 0 {
            return Err(PackError::InvalidPlacement {
                reason: "rotations must be at least 1",
            });
        }
        if self.place.directions == 0 {
            return Err(PackError::InvalidPlacement {
                reason: "directions must be at least 1",
            });
        }
        Ok(())
    }
}

/// Stationary geometry every placement must respect. Never scored.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    /// Immovable polygons; placed polygons may touch but not overlap them.
    pub obstacles: Vec<ConvexPolygon>,
    /// Every placed polygon must lie inside (boundary contact allowed).
    pub boundary: Option<ConvexPolygon>,
}

/// Outcome of one `pack` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arrangement {
    /// Input indices in insertion order.
    pub order: Vec<usize>,
    /// Pose applied to each input polygon, by input index.
    pub poses: Vec<Pose>,
    /// Score of the winning candidate.
    pub score: f64,
    /// Number of candidates scored.
    pub candidates: usize,
}

/// Packing strategy.
///
/// Moves the polygons in place; the slice keeps its order, so output `i` is
/// input `i` at its packed pose.
pub trait Packer {
    fn pack(&self, env: &Environment, polygons: &mut [ConvexPolygon]) -> Result<Arrangement, PackError>;
}

/// Packing scene: configuration plus environment.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    cfg: PackCfg,
    env: Environment,
}

impl Scene {
    /// Beam width 10, 4 rotations × 16 directions, empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: PackCfg) -> Result<Self, PackError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            env: Environment::default(),
        })
    }

    #[inline]
    pub fn cfg(&self) -> &PackCfg {
        &self.cfg
    }

    #[inline]
    pub fn beam_width(&self) -> usize {
        self.cfg.beam_width
    }

    /// Rejects 0 and leaves the previous width in place.
    pub fn set_beam_width(&mut self, beam_width: usize) -> Result<(), PackError> {
        if beam_width == 0 {
            return Err(PackError::InvalidBeamWidth);
        }
        self.cfg.beam_width = beam_width;
        Ok(())
    }

    pub fn add_obstacle(&mut self, obstacle: ConvexPolygon) {
        self.env.obstacles.push(obstacle);
    }

    pub fn set_boundary(&mut self, boundary: Option<ConvexPolygon>) {
        self.env.boundary = boundary;
    }

    #[inline]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Pack `polygons` in place with beam search.
    pub fn pack(&self, polygons: &mut [ConvexPolygon]) -> Result<Arrangement, PackError> {
        BeamSearch::new(self.cfg)?.pack(&self.env, polygons)
    }
}
