//! Convex polygon in vertex representation (V-rep).
//!
//! Invariants (trusted, not checked)
//! - Vertices form a counter-clockwise, minimal convex loop.
//! - `ConvexPolygon::new` takes the loop as given; `convex_hull` is the only
//!   constructor that guarantees the invariants for arbitrary input.
//!
//! Degenerate polygons (fewer than 3 vertices) are valid values: their area
//! is 0, they contain no point and collide with nothing.

use std::fmt;

use nalgebra::Vector2;

use super::hull::{gift_wrapping, merge_hulls};
use super::point::{fmt_point, is_left, Point2};
use super::transform::Transformation;

/// Display output is cut after this many vertices.
const DISPLAY_MAX_VERTICES: usize = 32;

/// Convex polygon plus the cumulative transformation applied since construction.
#[derive(Clone, Debug, Default)]
pub struct ConvexPolygon {
    vertices: Vec<Point2>,
    transformation: Transformation,
}

impl ConvexPolygon {
    /// Wrap a vertex loop that is already convex and counter-clockwise.
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self {
            vertices,
            transformation: Transformation::identity(),
        }
    }

    /// Convex hull around arbitrary points (gift wrapping).
    pub fn convex_hull(points: &[Point2]) -> Self {
        Self::new(gift_wrapping(points))
    }

    /// Convex hull around several convex polygons (hull-of-hulls merge).
    ///
    /// No polygons gives an empty polygon; a single polygon is copied as is,
    /// transformation included.
    pub fn convex_hull_of(polygons: &[ConvexPolygon]) -> Self {
        if let [only] = polygons {
            return only.clone();
        }
        let loops: Vec<&[Point2]> = polygons.iter().map(|p| p.vertices()).collect();
        Self::new(merge_hulls(&loops))
    }

    /// Same as [`ConvexPolygon::convex_hull_of`] over borrowed polygons.
    pub fn convex_hull_of_refs(polygons: &[&ConvexPolygon]) -> Self {
        if let [only] = polygons {
            return (*only).clone();
        }
        let loops: Vec<&[Point2]> = polygons.iter().map(|p| p.vertices()).collect();
        Self::new(merge_hulls(&loops))
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Product of every rotation and translation applied since construction.
    #[inline]
    pub fn current_transformation(&self) -> &Transformation {
        &self.transformation
    }

    /// Signed area by the shoelace formula; 0 for fewer than 3 vertices.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let p = self.vertices[i];
                let q = self.vertices[(i + 1) % n];
                p.x * q.y - q.x * p.y
            })
            .sum();
        twice / 2.0
    }

    /// Strict containment: points on the boundary are outside.
    pub fn contains(&self, point: Point2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| is_left(self.vertices[i], self.vertices[(i + 1) % n], point) > 0.0)
    }

    /// Weak containment of a whole polygon: every vertex of `other` is inside
    /// or on the boundary of `self`.
    pub fn encloses(&self, other: &ConvexPolygon) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        other.vertices.iter().all(|&v| {
            (0..n).all(|i| is_left(self.vertices[i], self.vertices[(i + 1) % n], v) >= 0.0)
        })
    }

    /// Overlap with positive area (Separating Axis Theorem).
    ///
    /// Shared edges or vertices are not a collision, and polygons with fewer
    /// than 3 vertices never collide. Symmetric in its arguments.
    pub fn collides(&self, other: &ConvexPolygon) -> bool {
        if self.vertices.len() < 3 || other.vertices.len() < 3 {
            return false;
        }
        if let (Some((a_min, a_max)), Some((b_min, b_max))) = (self.aabb(), other.aabb()) {
            if a_max.x <= b_min.x || b_max.x <= a_min.x || a_max.y <= b_min.y || b_max.y <= a_min.y {
                return false;
            }
        }
        !self.has_separating_edge(other) && !other.has_separating_edge(self)
    }

    /// Some edge of `self` has every vertex of `other` weakly on its outer side.
    fn has_separating_edge(&self, other: &ConvexPolygon) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            other.vertices.iter().all(|&v| is_left(a, b, v) <= 0.0)
        })
    }

    /// Axis-aligned bounding box `(min, max)`; None when empty.
    pub fn aabb(&self) -> Option<(Point2, Point2)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Point2::new(lo.x.min(v.x), lo.y.min(v.y)),
                Point2::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }

    /// Area centroid; the vertex mean when the area vanishes. None when empty.
    pub fn centroid(&self) -> Option<Point2> {
        let n = self.vertices.len();
        if n == 0 {
            return None;
        }
        let mean = self.vertices.iter().fold(Vector2::zeros(), |acc, v| acc + v) / n as f64;
        if n < 3 {
            return Some(mean);
        }
        let mut a = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            a += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        a *= 0.5;
        if a.abs() < 1e-18 {
            return Some(mean);
        }
        Some(Point2::new(cx / (6.0 * a), cy / (6.0 * a)))
    }

    /// Largest vertex distance from `center`.
    pub fn radius_about(&self, center: Point2) -> f64 {
        self.vertices
            .iter()
            .map(|v| (v - center).norm())
            .fold(0.0, f64::max)
    }

    /// Move every vertex by `(x, y)` and record the translation.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        let mut step = Transformation::identity();
        step.translate(x, y);
        self.apply_step(&step);
        self.transformation.translate(x, y);
        self
    }

    /// Rotate every vertex counter-clockwise about the origin and record it.
    pub fn rotate(&mut self, angle_radians: f64) -> &mut Self {
        let mut step = Transformation::identity();
        step.rotate(angle_radians);
        self.apply_step(&step);
        self.transformation.rotate(angle_radians);
        self
    }

    fn apply_step(&mut self, step: &Transformation) {
        for v in &mut self.vertices {
            *v = step.apply(*v);
        }
    }
}

/// Equal when the vertex loops match under some cyclic shift.
///
/// Meant for convex, minimal loops; the transformation is ignored.
impl PartialEq for ConvexPolygon {
    fn eq(&self, other: &Self) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        if n == 0 {
            return true;
        }
        (0..n).any(|offset| (0..n).all(|i| self.vertices[i] == other.vertices[(i + offset) % n]))
    }
}

impl From<Vec<Point2>> for ConvexPolygon {
    fn from(vertices: Vec<Point2>) -> Self {
        Self::new(vertices)
    }
}

impl fmt::Display for ConvexPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            if i >= DISPLAY_MAX_VERTICES {
                return write!(f, "...]");
            }
            fmt_point(v, f)?;
        }
        write!(f, "]")
    }
}
