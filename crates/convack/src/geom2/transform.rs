//! 2D affine transformation used to place polygons and track their pose.
//!
//! Conventions
//! - `x ↦ M x + t` with `M` a 2×2 linear part and `t` the translation.
//! - Cells are exposed column-major as `[a, b, c, d, e, f]`, i.e. columns
//!   `(a, b)`, `(c, d)`, `(e, f)`, so `apply(x, y) = (a·x + c·y + e, b·x + d·y + f)`.
//! - `rotate` pre-multiplies the whole map (translation included) by a
//!   counter-clockwise rotation; `translate` only shifts `t`. The two do not
//!   commute: call order is the order in which they act on points.

use nalgebra::{Matrix2, Vector2};

use super::point::Point2;

/// 2D affine map `x ↦ M x + t`. Starts as the identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Build from column-major cells `[a, b, c, d, e, f]`.
    #[inline]
    pub fn from_cells(cells: [f64; 6]) -> Self {
        let [a, b, c, d, e, f] = cells;
        Self {
            m: Matrix2::new(a, c, b, d),
            t: Vector2::new(e, f),
        }
    }

    /// Column-major cells `[a, b, c, d, e, f]`.
    #[inline]
    pub fn cells(&self) -> [f64; 6] {
        [
            self.m[(0, 0)],
            self.m[(1, 0)],
            self.m[(0, 1)],
            self.m[(1, 1)],
            self.t.x,
            self.t.y,
        ]
    }

    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        let [a, b, c, d, e, f] = self.cells();
        Point2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Follow the current map by a counter-clockwise rotation about the origin.
    ///
    /// All six cells are recomputed from the old values (the translation
    /// rotates too), so a previous `translate` swings around the origin.
    pub fn rotate(&mut self, angle_radians: f64) -> &mut Self {
        let (sine, cosine) = angle_radians.sin_cos();
        let [a, b, c, d, e, f] = self.cells();
        let next = [
            cosine * a - sine * b,
            sine * a + cosine * b,
            cosine * c - sine * d,
            sine * c + cosine * d,
            cosine * e - sine * f,
            sine * e + cosine * f,
        ];
        *self = Self::from_cells(next);
        self
    }

    /// Follow the current map by a translation. Only the translation cells change.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.t.x += x;
        self.t.y += y;
        self
    }

    /// Composition `self ∘ other` (apply `other` first).
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    /// Sequencing: apply `self`, then `other`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        other.compose(self)
    }

    /// Inverse map if `m` is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Angle of the linear part's first column; the rotation angle for rigid maps.
    #[inline]
    pub fn rotation_angle(&self) -> f64 {
        self.m[(1, 0)].atan2(self.m[(0, 0)])
    }

    /// Translation part `(e, f)`.
    #[inline]
    pub fn translation(&self) -> Vector2<f64> {
        self.t
    }
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.cells();
        write!(f, "[{a}, {c}, {e}; {b}, {d}, {g}]")
    }
}
