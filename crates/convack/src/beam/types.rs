//! Search-tree data: candidates, the arena that owns them, and the bounded
//! best-first frontier.
//!
//! Kept small and explicit so `search` reads as the algorithm only.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geom2::ConvexPolygon;

use super::place::Pose;

/// Handle of a candidate inside its `CandidateArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CandidateId(pub usize);

/// One node of the search tree: "polygon `index` placed at `pose`, after the
/// chain of `parent`".
#[derive(Clone, Debug)]
pub struct PackingCandidate {
    /// Input index of the polygon placed at this step.
    pub index: usize,
    pub pose: Pose,
    /// The polygon at its placed position.
    pub placed: ConvexPolygon,
    pub parent: Option<CandidateId>,
    /// Number of polygons placed along the chain, this one included.
    pub depth: usize,
    hull: ConvexPolygon,
    score: f64,
}

impl PackingCandidate {
    /// Wasted hull fraction; fixed at construction. Lower is better.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Convex hull of every polygon placed along the chain.
    #[inline]
    pub fn hull(&self) -> &ConvexPolygon {
        &self.hull
    }
}

/// `1 - covered / hull_area`, or 0 when the hull has no area.
#[inline]
pub fn packing_score(covered_area: f64, hull_area: f64) -> f64 {
    if hull_area <= 0.0 {
        0.0
    } else {
        1.0 - covered_area / hull_area
    }
}

/// Owns every candidate of one search. Children refer to parents by id, so
/// ancestors stay alive as long as the arena does.
#[derive(Clone, Debug)]
pub struct CandidateArena<'a> {
    objects: &'a [ConvexPolygon],
    covered_area: f64,
    nodes: Vec<PackingCandidate>,
}

impl<'a> CandidateArena<'a> {
    /// Arena for packing `objects`; their total area is the covered area of
    /// every score.
    pub fn new(objects: &'a [ConvexPolygon]) -> Self {
        Self {
            objects,
            covered_area: objects.iter().map(ConvexPolygon::area).sum(),
            nodes: Vec::new(),
        }
    }

    #[inline]
    pub fn objects(&self) -> &'a [ConvexPolygon] {
        self.objects
    }

    #[inline]
    pub fn covered_area(&self) -> f64 {
        self.covered_area
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: CandidateId) -> &PackingCandidate {
        &self.nodes[id.0]
    }

    /// Add a candidate and score it from its chain.
    ///
    /// The hull is merged over `placed` and every ancestor's placed polygon.
    pub fn insert(
        &mut self,
        index: usize,
        pose: Pose,
        placed: ConvexPolygon,
        parent: Option<CandidateId>,
    ) -> CandidateId {
        let (hull, depth) = {
            let mut chain: Vec<&ConvexPolygon> = vec![&placed];
            chain.extend(parent.into_iter().flat_map(|p| self.chain(p)).map(|c| &c.placed));
            (ConvexPolygon::convex_hull_of_refs(&chain), chain.len())
        };
        let score = packing_score(self.covered_area, hull.area());
        let id = CandidateId(self.nodes.len());
        self.nodes.push(PackingCandidate {
            index,
            pose,
            placed,
            parent,
            depth,
            hull,
            score,
        });
        id
    }

    /// The candidate followed by its ancestors, leaf first.
    pub fn chain(&self, id: CandidateId) -> impl Iterator<Item = &PackingCandidate> + '_ {
        std::iter::successors(Some(self.get(id)), |c| c.parent.map(|p| self.get(p)))
    }

    /// Insertion order along the chain, root first.
    pub fn order(&self, id: CandidateId) -> Vec<usize> {
        let mut order: Vec<usize> = self.chain(id).map(|c| c.index).collect();
        order.reverse();
        order
    }

    /// `used[i]` is true when polygon `i` is placed along the chain.
    pub fn used(&self, id: CandidateId) -> Vec<bool> {
        let mut used = vec![false; self.objects.len()];
        for c in self.chain(id) {
            if let Some(slot) = used.get_mut(c.index) {
                *slot = true;
            }
        }
        used
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    score: f64,
    seq: u64,
    id: CandidateId,
}

impl Entry {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Best-first queue holding at most `capacity` candidates.
///
/// Ordered by ascending `(score, insertion seq)`; equal scores keep insertion
/// order. The heap top is the worst entry, which is what overflow drops.
#[derive(Clone, Debug)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    capacity: usize,
    seq: u64,
}

impl Frontier {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)),
            capacity,
            seq: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert; returns the id that fell out when over capacity.
    pub fn push(&mut self, score: f64, id: CandidateId) -> Option<CandidateId> {
        let entry = Entry {
            score,
            seq: self.seq,
            id,
        };
        self.seq += 1;
        self.heap.push(entry);
        if self.heap.len() > self.capacity {
            self.heap.pop().map(|e| e.id)
        } else {
            None
        }
    }

    /// Best score currently held.
    pub fn best_score(&self) -> Option<f64> {
        self.heap.iter().map(|e| e.score).min_by(f64::total_cmp)
    }

    /// Drain best first.
    pub fn into_best_first(self) -> Vec<CandidateId> {
        self.heap.into_sorted_vec().into_iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::point2;

    fn triangle() -> ConvexPolygon {
        ConvexPolygon::new(vec![point2(0.0, 0.0), point2(50.0, 0.0), point2(25.0, 50.0)])
    }

    #[test]
    fn single_polygon_scores_zero() {
        let objects = vec![triangle()];
        let mut arena = CandidateArena::new(&objects);
        let id = arena.insert(0, Pose::default(), objects[0].clone(), None);
        assert_eq!(arena.get(id).score(), 0.0);
        assert_eq!(arena.get(id).depth, 1);
    }

    #[test]
    fn two_triangles_edge_to_edge_waste_a_third() {
        let mut shifted = triangle();
        shifted.translate(50.0, 0.0);
        let objects = vec![triangle(), shifted];
        let mut arena = CandidateArena::new(&objects);
        let parent = arena.insert(0, Pose::default(), objects[0].clone(), None);
        let child = arena.insert(1, Pose::default(), objects[1].clone(), Some(parent));
        assert!((arena.get(child).score() - 1.0 / 3.0).abs() < 1e-12);
        assert!((arena.get(child).hull().area() - 3750.0).abs() < 1e-9);
        assert_eq!(arena.order(child), vec![0, 1]);
        assert_eq!(arena.used(child), vec![true, true]);
        assert_eq!(arena.used(parent), vec![true, false]);
    }

    #[test]
    fn score_uses_all_objects_not_just_the_chain() {
        let objects = vec![triangle(), triangle()];
        let mut arena = CandidateArena::new(&objects);
        let id = arena.insert(0, Pose::default(), objects[0].clone(), None);
        // Covered area counts both objects; the hull holds only one.
        assert_eq!(arena.get(id).score(), -1.0);
    }

    #[test]
    fn degenerate_hull_scores_zero() {
        assert_eq!(packing_score(10.0, 0.0), 0.0);
        assert_eq!(packing_score(10.0, -1.0), 0.0);
    }

    #[test]
    fn frontier_keeps_best_and_breaks_ties_by_insertion() {
        let mut f = Frontier::new(3);
        assert_eq!(f.push(0.5, CandidateId(0)), None);
        assert_eq!(f.push(0.1, CandidateId(1)), None);
        assert_eq!(f.push(0.5, CandidateId(2)), None);
        // Full: the later of the two 0.5 entries is the worst and drops.
        assert_eq!(f.push(0.2, CandidateId(3)), Some(CandidateId(2)));
        assert_eq!(f.push(0.9, CandidateId(4)), Some(CandidateId(4)));
        assert_eq!(f.best_score(), Some(0.1));
        assert_eq!(
            f.into_best_first(),
            vec![CandidateId(1), CandidateId(3), CandidateId(0)]
        );
    }

    #[test]
    fn frontier_of_width_one_is_greedy() {
        let mut f = Frontier::new(1);
        f.push(0.3, CandidateId(0));
        f.push(0.3, CandidateId(1));
        f.push(0.2, CandidateId(2));
        assert_eq!(f.into_best_first(), vec![CandidateId(2)]);
    }
}
