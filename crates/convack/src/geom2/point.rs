//! Points and the exact predicates built on them.
//!
//! `Point2` is a plain `nalgebra::Vector2<f64>`: subtraction, `dot`,
//! `norm_squared` (magnitude², no sqrt) and exact `==` come for free.
//! The helpers here add the orientation predicate used by every hull,
//! containment and collision routine.

use nalgebra::Vector2;
use std::cmp::Ordering;

/// A 2D coordinate. Equality is exact floating-point comparison.
pub type Point2 = Vector2<f64>;

/// Shorthand constructor.
#[inline]
pub fn point2(x: f64, y: f64) -> Point2 {
    Vector2::new(x, y)
}

/// Orientation of `q` relative to the directed line `a → b`.
///
/// Positive when `q` is left of the line, negative when right, zero when the
/// three points are colinear. Twice the signed area of triangle `(a, b, q)`.
#[inline]
pub fn is_left(a: Point2, b: Point2, q: Point2) -> f64 {
    (b.x - a.x) * (q.y - a.y) - (b.y - a.y) * (q.x - a.x)
}

/// Cross product `a.x * b.y - a.y * b.x` of two vectors.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Strict lexicographic order: smaller `x` first, ties broken by smaller `y`.
#[inline]
pub fn lex_less(a: Point2, b: Point2) -> bool {
    a.x < b.x || (a.x == b.x && a.y < b.y)
}

/// Total lexicographic comparison for sorting (NaN-tolerant).
#[inline]
pub fn lex_cmp(a: &Point2, b: &Point2) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Render as `(x,y)`.
pub fn fmt_point(p: &Point2, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({},{})", p.x, p.y)
}
