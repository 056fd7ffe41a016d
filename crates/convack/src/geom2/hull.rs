//! Convex hull construction: gift wrapping over loose points and a
//! hull-of-hulls merge over already convex polygons.
//!
//! Conventions
//! - Output loops are counter-clockwise and minimal: colinear points on a
//!   hull edge are skipped by always preferring the farther point.
//! - The start vertex is the lexicographically smallest point (min x, then
//!   min y). With that tie-break both constructors pick the same start, so
//!   their outputs agree vertex for vertex on the same input.
//! - Every wrap loop is capped at `input size + 1` steps.
//!
//! The merge is the second stage of Chan's algorithm: each step wraps around
//! the current hull vertex by asking every sub-polygon for its tangent point,
//! found by binary search on the sub-polygon's vertex loop. A binary-search
//! answer is only trusted after a local tangent check; otherwise that
//! sub-polygon is scanned linearly. A scan gives the same answer as the
//! search, only slower.

use super::point::{is_left, lex_less, Point2};

/// Sub-polygons smaller than this are scanned linearly.
const BINARY_SEARCH_MIN: usize = 8;

/// Gift wrapping (Jarvis march). `O(n·h)`.
///
/// Inputs with at most two points are returned unchanged; a set of identical
/// points collapses to a single vertex.
pub(crate) fn gift_wrapping(points: &[Point2]) -> Vec<Point2> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let start = points
        .iter()
        .copied()
        .reduce(|a, b| if lex_less(b, a) { b } else { a })
        .unwrap_or_else(Point2::zeros);

    let mut result = Vec::new();
    let mut last = start;
    loop {
        result.push(last);
        let Some(next) = wrap_step(points.iter().copied(), last) else {
            break;
        };
        last = next;
        if last == result[0] || result.len() > points.len() {
            break;
        }
    }
    result
}

/// One wrap step: the point `q` such that every point is weakly left of
/// `from → q`, preferring the farthest on a tie. None if every point equals `from`.
fn wrap_step(points: impl Iterator<Item = Point2>, from: Point2) -> Option<Point2> {
    let mut best: Option<Point2> = None;
    for next in points {
        if next == from {
            continue;
        }
        best = Some(match best {
            None => next,
            Some(b) => pick(from, b, next),
        });
    }
    best
}

/// The better of two wrap candidates seen from `from`.
#[inline]
fn pick(from: Point2, best: Point2, next: Point2) -> Point2 {
    let left = is_left(from, best, next);
    if left < 0.0 {
        next
    } else if left == 0.0 && (next - from).norm_squared() > (best - from).norm_squared() {
        next
    } else {
        best
    }
}

/// Hull around several convex (CCW) polygons.
///
/// Empty sub-polygons are ignored; no polygons gives an empty hull and a
/// single polygon is returned as is.
pub(crate) fn merge_hulls(polygons: &[&[Point2]]) -> Vec<Point2> {
    let parts: Vec<&[Point2]> = polygons.iter().copied().filter(|p| !p.is_empty()).collect();
    match parts.len() {
        0 => return Vec::new(),
        1 => return parts[0].to_vec(),
        _ => {}
    }
    let Some(start) = parts
        .iter()
        .map(|p| p[lowest_index(p)])
        .reduce(|a, b| if lex_less(b, a) { b } else { a })
    else {
        return Vec::new();
    };
    let total: usize = parts.iter().map(|p| p.len()).sum();

    let mut result = Vec::new();
    let mut last = start;
    loop {
        result.push(last);
        let tangents = parts.iter().filter_map(|p| tangent(p, last));
        let Some(next) = wrap_step(tangents, last) else {
            break;
        };
        last = next;
        if last == result[0] || result.len() > total {
            break;
        }
    }
    result
}

/// Index of the lexicographically smallest vertex of a convex loop.
pub(crate) fn lowest_index(vs: &[Point2]) -> usize {
    let n = vs.len();
    if n >= BINARY_SEARCH_MIN {
        if let Some(i) = binary_extreme(n, |i, j| lex_less(vs[i], vs[j])) {
            let prev = vs[(i + n - 1) % n];
            let next = vs[(i + 1) % n];
            if lex_less(vs[i], prev) && lex_less(vs[i], next) {
                return i;
            }
        }
    }
    (1..n).fold(0, |best, i| if lex_less(vs[i], vs[best]) { i } else { best })
}

/// Tangent point of a convex loop seen from `from`: every vertex weakly left
/// of `from → q`, farthest on a tie. None if every vertex equals `from`.
pub(crate) fn tangent(vs: &[Point2], from: Point2) -> Option<Point2> {
    let n = vs.len();
    if n >= BINARY_SEARCH_MIN {
        // i beats j when vs[i] lies right of from → vs[j].
        let found = binary_extreme(n, |i, j| is_left(from, vs[j], vs[i]) < 0.0);
        if let Some(i) = found.filter(|&i| is_local_tangent(vs, i, from)) {
            return Some(vs[farthest_colinear(vs, i, from)]);
        }
    }
    wrap_step(vs.iter().copied(), from)
}

/// Both neighbours of `vs[i]` are weakly left of `from → vs[i]`, and not both on
/// the line. On a convex loop this makes `vs[i]` a global tangent point.
fn is_local_tangent(vs: &[Point2], i: usize, from: Point2) -> bool {
    let n = vs.len();
    let q = vs[i];
    if q == from {
        return false;
    }
    let before = is_left(from, q, vs[(i + n - 1) % n]);
    let after = is_left(from, q, vs[(i + 1) % n]);
    before >= 0.0 && after >= 0.0 && !(before == 0.0 && after == 0.0)
}

/// Walk from a tangent vertex along neighbours on the same ray away from
/// `from`, keeping the farthest one.
fn farthest_colinear(vs: &[Point2], mut i: usize, from: Point2) -> usize {
    let n = vs.len();
    for _ in 0..n {
        let q = vs[i];
        let dir = q - from;
        let dist = dir.norm_squared();
        let further = [(i + 1) % n, (i + n - 1) % n].into_iter().find(|&k| {
            let v = vs[k];
            is_left(from, q, v) == 0.0
                && (v - from).dot(&dir) > 0.0
                && (v - from).norm_squared() > dist
        });
        match further {
            Some(k) => i = k,
            None => break,
        }
    }
    i
}

/// Binary search for the extreme vertex of a convex loop of `n` vertices.
///
/// `above(i, j)` is a strict "vertex i beats vertex j" relation that must be
/// unimodal around the loop (a linear functional, or the angular order seen
/// from an outside point). Returns None when the search runs out of chain,
/// which happens on degenerate loops; callers verify and fall back.
pub(crate) fn binary_extreme(n: usize, above: impl Fn(usize, usize) -> bool) -> Option<usize> {
    if n < 3 {
        return None;
    }
    let up = |i: usize| above((i + 1) % n, i % n);
    let (mut a, mut b) = (0usize, n);
    let mut up_a = up(0);
    if !up_a && !above(n - 1, 0) {
        return Some(0);
    }
    loop {
        let c = (a + b) / 2;
        let up_c = up(c);
        if !up_c && !above((c + n - 1) % n, c) {
            return Some(c);
        }
        if up_a {
            if !up_c || above(a, c) {
                b = c;
            } else {
                a = c;
                up_a = up_c;
            }
        } else if up_c || !above(c, a) {
            a = c;
            up_a = up_c;
        } else {
            b = c;
        }
        if b <= a + 1 {
            return None;
        }
    }
}
