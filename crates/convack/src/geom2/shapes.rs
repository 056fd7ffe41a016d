//! Shape generators: regular polygons and seeded random convex polygons.
//!
//! Model
//! - Regular polygons put `sides` vertices at angles `2π·i/sides`, CCW,
//!   already minimal; no hull pass.
//! - Random polygons start from `n` equally spaced angles on [0, 2π), add
//!   bounded angular and radial jitter, then take the convex hull.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so draw `k` of a run can be reproduced alone.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::point::{point2, Point2};
use super::polygon::ConvexPolygon;

/// Regular polygon centred on the origin with its first vertex on +x.
pub fn regular_polygon(sides: usize, radius: f64) -> ConvexPolygon {
    let vertices = (0..sides)
        .map(|i| {
            let th = std::f64::consts::TAU * i as f64 / sides as f64;
            point2(radius * th.cos(), radius * th.sin())
        })
        .collect();
    ConvexPolygon::new(vertices)
}

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 10 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 10.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finaliser.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw a random convex polygon around the origin.
///
/// Jitter can make vertices colinear or hidden; the hull pass drops them, so
/// the result may have fewer vertices than sampled (never fewer than 3 for
/// non-degenerate configs).
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> ConvexPolygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let points: Vec<Point2> = (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj).max(1e-6) * r0;
            point2(th.cos() * r, th.sin() * r)
        })
        .collect();
    ConvexPolygon::convex_hull(&points)
}

/// Translate every polygon by a uniform offset in `[-spread, spread]²`.
pub fn scatter(polygons: &mut [ConvexPolygon], spread: f64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let s = spread.abs();
    for p in polygons {
        let dx = (rng.gen::<f64>() * 2.0 - 1.0) * s;
        let dy = (rng.gen::<f64>() * 2.0 - 1.0) * s;
        p.translate(dx, dy);
    }
}
