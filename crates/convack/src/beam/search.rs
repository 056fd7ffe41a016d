//! Beam search over insertion orders.
//!
//! Each depth pops the best `beam_width` candidates, places every polygon not
//! yet on a candidate's chain next to it, and keeps the best `beam_width`
//! children. The winner's chain poses are written back at the end.

use tracing::{debug, debug_span, trace, warn};

use crate::geom2::ConvexPolygon;
use crate::scene::{Arrangement, Environment, PackCfg, PackError, Packer};

use super::place::{ContactPlacer, Placement, PlacementRequest, Pose};
use super::types::{CandidateArena, CandidateId, Frontier};

/// Beam-search packer, generic over the placement strategy.
#[derive(Clone, Debug)]
pub struct BeamSearch<P = ContactPlacer> {
    cfg: PackCfg,
    placer: P,
}

impl BeamSearch<ContactPlacer> {
    /// Validated search with a `ContactPlacer` built from `cfg.place`.
    pub fn new(cfg: PackCfg) -> Result<Self, PackError> {
        Self::with_placer(cfg, ContactPlacer::new(cfg.place))
    }
}

impl<P: Placement> BeamSearch<P> {
    pub fn with_placer(cfg: PackCfg, placer: P) -> Result<Self, PackError> {
        cfg.validate()?;
        Ok(Self { cfg, placer })
    }

    #[inline]
    pub fn cfg(&self) -> &PackCfg {
        &self.cfg
    }

    /// Place polygon `index` after `parent`'s chain and score it; None when
    /// the placer finds no pose.
    fn child(
        &self,
        arena: &mut CandidateArena<'_>,
        env: &Environment,
        parent: Option<CandidateId>,
        index: usize,
    ) -> Option<CandidateId> {
        let polygon = &arena.objects()[index];
        let (pose, placed) = {
            let chain: Vec<&ConvexPolygon> = match parent {
                Some(p) => arena.chain(p).map(|c| &c.placed).collect(),
                None => Vec::new(),
            };
            let request = PlacementRequest {
                polygon,
                placed: &chain,
                hull: parent.map(|p| arena.get(p).hull()),
                env,
            };
            let pose = self.placer.place(&request)?;
            (pose, pose.placed(polygon))
        };
        Some(arena.insert(index, pose, placed, parent))
    }

    fn budget_spent(&self, scored: usize) -> bool {
        self.cfg.max_candidates.is_some_and(|max| scored >= max)
    }
}

impl<P: Placement> Packer for BeamSearch<P> {
    fn pack(&self, env: &Environment, polygons: &mut [ConvexPolygon]) -> Result<Arrangement, PackError> {
        let n = polygons.len();
        let span = debug_span!("beam_pack", polygons = n, beam_width = self.cfg.beam_width);
        let _enter = span.enter();
        self.cfg.validate()?;
        if n == 0 {
            return Ok(Arrangement::default());
        }

        let originals = polygons.to_vec();
        let mut arena = CandidateArena::new(&originals);
        let mut frontier = Frontier::new(self.cfg.beam_width);
        let mut unplaced_root = None;
        for index in 0..n {
            match self.child(&mut arena, env, None, index) {
                Some(id) => {
                    frontier.push(arena.get(id).score(), id);
                }
                None => {
                    trace!(index, "no placement for root, pruned");
                    unplaced_root.get_or_insert(index);
                }
            }
        }
        if frontier.is_empty() {
            return Err(PackError::Unplaceable {
                index: unplaced_root.unwrap_or(0),
            });
        }
        debug!(depth = 1, frontier = frontier.len(), best = ?frontier.best_score(), scored = arena.len(), "roots scored");

        let mut narrowed = false;
        for depth in 2..=n {
            let width = if self.budget_spent(arena.len()) {
                if !narrowed {
                    warn!(scored = arena.len(), depth, "candidate budget spent, continuing greedily");
                    narrowed = true;
                }
                1
            } else {
                self.cfg.beam_width
            };
            let beam: Vec<CandidateId> = frontier.into_best_first().into_iter().take(width).collect();
            let mut next = Frontier::new(width);
            for &id in &beam {
                let used = arena.used(id);
                for index in (0..n).filter(|&i| !used[i]) {
                    match self.child(&mut arena, env, Some(id), index) {
                        Some(c) => {
                            next.push(arena.get(c).score(), c);
                        }
                        None => trace!(parent = id.0, index, "no placement, child pruned"),
                    }
                }
            }
            if next.is_empty() {
                let index = beam
                    .first()
                    .and_then(|&id| arena.used(id).iter().position(|u| !u))
                    .unwrap_or(0);
                return Err(PackError::Unplaceable { index });
            }
            debug!(depth, frontier = next.len(), best = ?next.best_score(), scored = arena.len(), "depth expanded");
            frontier = next;
        }

        let Some(&winner) = frontier.into_best_first().first() else {
            return Err(PackError::Unplaceable { index: 0 });
        };
        let mut poses = vec![Pose::default(); n];
        for c in arena.chain(winner) {
            c.pose.apply(&mut polygons[c.index]);
            poses[c.index] = c.pose;
        }
        let score = arena.get(winner).score();
        debug!(score, candidates = arena.len(), "packed");
        Ok(Arrangement {
            order: arena.order(winner),
            poses,
            score,
            candidates: arena.len(),
        })
    }
}
