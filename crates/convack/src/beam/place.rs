//! Placement: where a polygon goes once the search has picked it next.
//!
//! Purpose
//! - The search only decides insertion order; `Placement` turns "place
//!   polygon j next to this partial packing" into a concrete `Pose`.
//! - `ContactPlacer` is the default: slide the polygon towards the packing
//!   from a ring of approach directions until first contact, at a few fixed
//!   rotations, and keep the pose with the smallest merged hull.
//!
//! Contact
//! - The slide distance is exact up to rounding: the minimum over ray/segment
//!   hits of moving vertices against stationary edges, and of stationary
//!   vertices (moving backwards) against moving edges.
//! - A pose is only accepted when it collides with nothing (touching is
//!   fine) and fits inside the boundary. Rounding can leave a sliver of
//!   overlap; the slide is then shortened by a relative `1e-9`, at most
//!   `BACKOFF_STEPS` times.

use nalgebra::Vector2;

use crate::geom2::point::cross;
use crate::geom2::{ConvexPolygon, Point2};
use crate::scene::Environment;

const BACKOFF_STEPS: usize = 3;
const BACKOFF_REL: f64 = 1e-9;
/// A later pose must shrink the hull by more than this (relative) to win.
const IMPROVE_REL: f64 = 1e-12;
/// Slack on the segment parameter when intersecting rays with edges.
const SEGMENT_SLACK: f64 = 1e-9;

/// Rigid pose relative to a polygon's input position: rotate about the
/// origin by `angle`, then translate by `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub angle: f64,
    pub offset: Vector2<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            angle: 0.0,
            offset: Vector2::zeros(),
        }
    }
}

impl Pose {
    /// Apply in place; records the pose in the polygon's transformation.
    pub fn apply(&self, polygon: &mut ConvexPolygon) {
        polygon.rotate(self.angle).translate(self.offset.x, self.offset.y);
    }

    /// Placed copy of `polygon`.
    pub fn placed(&self, polygon: &ConvexPolygon) -> ConvexPolygon {
        let mut out = polygon.clone();
        self.apply(&mut out);
        out
    }
}

/// Everything a placer may look at for one placement.
#[derive(Clone, Copy, Debug)]
pub struct PlacementRequest<'a> {
    /// The polygon to place, at its input position.
    pub polygon: &'a ConvexPolygon,
    /// Polygons already placed on this branch.
    pub placed: &'a [&'a ConvexPolygon],
    /// Convex hull of `placed`; None before the first placement.
    pub hull: Option<&'a ConvexPolygon>,
    pub env: &'a Environment,
}

impl<'a> PlacementRequest<'a> {
    /// Placed polygons followed by obstacles.
    pub fn stationary(&self) -> impl Iterator<Item = &'a ConvexPolygon> + '_ {
        self.placed
            .iter()
            .copied()
            .chain(self.env.obstacles.iter())
    }

    /// True when `moved` overlaps nothing stationary and fits the boundary.
    pub fn accepts(&self, moved: &ConvexPolygon) -> bool {
        if let Some(boundary) = &self.env.boundary {
            if !boundary.encloses(moved) {
                return false;
            }
        }
        self.stationary().all(|s| !s.collides(moved))
    }
}

/// Strategy that decides a polygon's pose. Returns None when nothing fits.
pub trait Placement {
    fn place(&self, request: &PlacementRequest<'_>) -> Option<Pose>;
}

/// Contact placer configuration.
#[derive(Clone, Copy, Debug)]
pub struct PlaceCfg {
    /// Evenly spaced rotations in [0, 2π); 1 keeps the input orientation.
    pub rotations: usize,
    /// Evenly spaced approach directions in [0, 2π).
    pub directions: usize,
}

impl Default for PlaceCfg {
    fn default() -> Self {
        Self {
            rotations: 4,
            directions: 16,
        }
    }
}

/// Slide-to-contact placer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContactPlacer {
    pub cfg: PlaceCfg,
}

impl ContactPlacer {
    pub fn new(cfg: PlaceCfg) -> Self {
        Self { cfg }
    }

    /// Point the polygon is pulled towards.
    fn target(request: &PlacementRequest<'_>) -> Point2 {
        request
            .hull
            .and_then(ConvexPolygon::centroid)
            .or_else(|| request.env.boundary.as_ref().and_then(ConvexPolygon::centroid))
            .unwrap_or_else(Point2::zeros)
    }

    /// Accepted poses for one rotation, in direction order.
    fn poses_for_rotation(
        &self,
        request: &PlacementRequest<'_>,
        angle: f64,
        target: Point2,
        stationary: &[&ConvexPolygon],
    ) -> Vec<Pose> {
        let rotated = Pose {
            angle,
            offset: Vector2::zeros(),
        }
        .placed(request.polygon);
        let Some(center) = rotated.centroid() else {
            return Vec::new();
        };
        if stationary.is_empty() {
            let pose = Pose {
                angle,
                offset: target - center,
            };
            return if request.accepts(&pose.placed(request.polygon)) {
                vec![pose]
            } else {
                Vec::new()
            };
        }

        let extent = stationary
            .iter()
            .map(|s| s.radius_about(target))
            .fold(0.0, f64::max);
        let reach = extent + rotated.radius_about(center) + 1.0;
        let mut poses = Vec::new();
        for k in 0..self.cfg.directions {
            let th = std::f64::consts::TAU * k as f64 / self.cfg.directions as f64;
            let dir = Vector2::new(th.cos(), th.sin());
            let start = target - dir * reach - center;
            let mut probe = rotated.clone();
            probe.translate(start.x, start.y);
            let travel = stationary
                .iter()
                .filter_map(|s| contact_distance(&probe, s, dir))
                .fold(reach, f64::min);
            let base = Pose {
                angle,
                offset: start + dir * travel,
            };
            if let Some(pose) = (0..=BACKOFF_STEPS)
                .map(|step| Pose {
                    offset: base.offset - dir * (step as f64 * BACKOFF_REL * reach),
                    ..base
                })
                .find(|pose| request.accepts(&pose.placed(request.polygon)))
            {
                poses.push(pose);
            }
        }
        poses
    }
}

impl Placement for ContactPlacer {
    fn place(&self, request: &PlacementRequest<'_>) -> Option<Pose> {
        if request.polygon.is_empty() {
            return None;
        }
        let target = Self::target(request);
        let stationary: Vec<&ConvexPolygon> = request.stationary().collect();
        let mut best: Option<(f64, Pose)> = None;
        for r in 0..self.cfg.rotations.max(1) {
            let angle = std::f64::consts::TAU * r as f64 / self.cfg.rotations.max(1) as f64;
            for pose in self.poses_for_rotation(request, angle, target, &stationary) {
                let moved = pose.placed(request.polygon);
                let area = match request.hull {
                    Some(h) => ConvexPolygon::convex_hull_of_refs(&[h, &moved]).area(),
                    None => moved.area(),
                };
                let better = match best {
                    None => true,
                    Some((b, _)) => area < b - IMPROVE_REL * b.abs(),
                };
                if better {
                    best = Some((area, pose));
                }
            }
        }
        best.map(|(_, pose)| pose)
    }
}

/// Distance the `moving` polygon can travel along unit `dir` before touching
/// `stationary`; None when it passes by.
pub fn contact_distance(moving: &ConvexPolygon, stationary: &ConvexPolygon, dir: Vector2<f64>) -> Option<f64> {
    let hits_forward = edge_hits(moving.vertices(), stationary.vertices(), dir);
    let hits_backward = edge_hits(stationary.vertices(), moving.vertices(), -dir);
    hits_forward.chain(hits_backward).reduce(f64::min)
}

/// Ray hits from every point of `from` along `dir` against the edges of `loop_`.
fn edge_hits<'a>(
    from: &'a [Point2],
    loop_: &'a [Point2],
    dir: Vector2<f64>,
) -> impl Iterator<Item = f64> + 'a {
    let n = loop_.len();
    let edges = if n < 2 { 0 } else { n };
    from.iter().flat_map(move |&v| {
        (0..edges).filter_map(move |i| ray_segment_intersection(v, dir, loop_[i], loop_[(i + 1) % n]))
    })
}

/// Parameter `t >= 0` where `origin + t·dir` meets segment `[p, q]`.
/// Parallel rays never hit.
pub fn ray_segment_intersection(origin: Point2, dir: Vector2<f64>, p: Point2, q: Point2) -> Option<f64> {
    let seg = q - p;
    let denom = cross(dir, seg);
    if denom == 0.0 {
        return None;
    }
    let diff = p - origin;
    let t = cross(diff, seg) / denom;
    let u = cross(diff, dir) / denom;
    (t >= 0.0 && (-SEGMENT_SLACK..=1.0 + SEGMENT_SLACK).contains(&u)).then_some(t)
}
