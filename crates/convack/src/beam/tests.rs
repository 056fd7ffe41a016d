use super::*;
use crate::geom2::{point2, regular_polygon, ConvexPolygon, Point2};
use crate::scene::{Environment, PackCfg, PackError, Packer, Scene};

fn square(side: f64) -> ConvexPolygon {
    let h = side / 2.0;
    ConvexPolygon::new(vec![point2(-h, -h), point2(h, -h), point2(h, h), point2(-h, h)])
}

fn regular_set() -> Vec<ConvexPolygon> {
    (3..=10).map(|sides| regular_polygon(sides, 10.0)).collect()
}

fn assert_disjoint(polygons: &[ConvexPolygon]) {
    for i in 0..polygons.len() {
        for j in (i + 1)..polygons.len() {
            assert!(!polygons[i].collides(&polygons[j]), "polygons {i} and {j} overlap");
        }
    }
}

fn score_of(polygons: &[ConvexPolygon], covered: f64) -> f64 {
    packing_score(covered, ConvexPolygon::convex_hull_of(polygons).area())
}

// ---- contact geometry ----

#[test]
fn ray_hits_segment_end_and_misses_parallel() {
    let t = ray_segment_intersection(point2(1.0, 0.0), point2(1.0, 0.0), point2(3.0, 1.0), point2(3.0, 0.0));
    assert_eq!(t, Some(2.0));
    let parallel = ray_segment_intersection(point2(0.0, 0.0), point2(1.0, 0.0), point2(3.0, 0.0), point2(4.0, 0.0));
    assert_eq!(parallel, None);
    let behind = ray_segment_intersection(point2(5.0, 0.5), point2(1.0, 0.0), point2(3.0, 1.0), point2(3.0, 0.0));
    assert_eq!(behind, None);
}

#[test]
fn contact_distance_between_unit_squares() {
    let unit = |x: f64, y: f64| {
        ConvexPolygon::new(vec![
            point2(x, y),
            point2(x + 1.0, y),
            point2(x + 1.0, y + 1.0),
            point2(x, y + 1.0),
        ])
    };
    let dir = point2(1.0, 0.0);
    assert_eq!(contact_distance(&unit(0.0, 0.0), &unit(3.0, 0.0), dir), Some(2.0));
    assert_eq!(contact_distance(&unit(0.0, 0.0), &unit(3.0, 0.5), dir), Some(2.0));
    assert_eq!(contact_distance(&unit(0.0, 0.0), &unit(3.0, 5.0), dir), None);
}

#[test]
fn contact_distance_catches_stationary_vertex_on_moving_edge() {
    // A stationary spike points into the flat face of the moving square.
    let spike = ConvexPolygon::new(vec![point2(3.0, 0.5), point2(6.0, -1.0), point2(6.0, 2.0)]);
    let moving = ConvexPolygon::new(vec![
        point2(0.0, 0.0),
        point2(1.0, 0.0),
        point2(1.0, 1.0),
        point2(0.0, 1.0),
    ]);
    assert_eq!(contact_distance(&moving, &spike, point2(1.0, 0.0)), Some(2.0));
}

// ---- placer ----

#[test]
fn first_polygon_is_centred_on_the_target() {
    let env = Environment::default();
    let poly = square(2.0);
    let request = PlacementRequest {
        polygon: &poly,
        placed: &[],
        hull: None,
        env: &env,
    };
    let pose = ContactPlacer::default().place(&request).unwrap();
    assert_eq!(pose, Pose::default());
}

#[test]
fn second_square_lands_flush() {
    let env = Environment::default();
    let first = square(2.0);
    let second = square(2.0);
    let placed = [&first];
    let request = PlacementRequest {
        polygon: &second,
        placed: &placed,
        hull: Some(&first),
        env: &env,
    };
    let placer = ContactPlacer::new(PlaceCfg {
        rotations: 1,
        directions: 4,
    });
    let pose = placer.place(&request).unwrap();
    let moved = pose.placed(&second);
    assert!(!moved.collides(&first));
    let hull = ConvexPolygon::convex_hull_of(&[first.clone(), moved]);
    assert!((hull.area() - 8.0).abs() < 1e-6);
}

#[test]
fn placer_respects_obstacles_and_boundary() {
    let mut env = Environment::default();
    env.obstacles.push(square(4.0));
    env.boundary = Some(square(40.0));
    let poly = regular_polygon(6, 3.0);
    let request = PlacementRequest {
        polygon: &poly,
        placed: &[],
        hull: None,
        env: &env,
    };
    let pose = ContactPlacer::default().place(&request).unwrap();
    let moved = pose.placed(&poly);
    assert!(!moved.collides(&env.obstacles[0]));
    assert!(env.boundary.as_ref().unwrap().encloses(&moved));
}

// ---- beam search ----

#[test]
fn beam_width_zero_is_rejected() {
    let mut scene = Scene::new();
    assert_eq!(scene.beam_width(), 10);
    assert_eq!(scene.set_beam_width(0), Err(PackError::InvalidBeamWidth));
    assert_eq!(scene.beam_width(), 10);
    assert_eq!(scene.set_beam_width(3), Ok(()));
    assert_eq!(scene.beam_width(), 3);

    let cfg = PackCfg {
        beam_width: 0,
        ..PackCfg::default()
    };
    assert!(matches!(Scene::with_cfg(cfg), Err(PackError::InvalidBeamWidth)));
    assert!(matches!(BeamSearch::new(cfg), Err(PackError::InvalidBeamWidth)));
}

#[test]
fn zero_rotations_or_directions_are_rejected() {
    for place in [
        PlaceCfg {
            rotations: 0,
            directions: 4,
        },
        PlaceCfg {
            rotations: 4,
            directions: 0,
        },
    ] {
        let cfg = PackCfg {
            place,
            ..PackCfg::default()
        };
        assert!(matches!(Scene::with_cfg(cfg), Err(PackError::InvalidPlacement { .. })));
    }
}

#[test]
fn empty_input_is_a_no_op() {
    let mut polygons: Vec<ConvexPolygon> = Vec::new();
    let arrangement = Scene::new().pack(&mut polygons).unwrap();
    assert!(arrangement.order.is_empty());
    assert_eq!(arrangement.candidates, 0);
}

#[test]
fn single_polygon_scores_zero() {
    let mut polygons = vec![regular_polygon(5, 10.0)];
    let arrangement = Scene::new().pack(&mut polygons).unwrap();
    assert_eq!(arrangement.order, vec![0]);
    assert!(arrangement.score.abs() < 1e-12);
    assert_eq!(arrangement.candidates, 1);
}

#[test]
fn regular_polygons_pack_without_overlap() {
    let mut polygons = regular_set();
    let areas: Vec<f64> = polygons.iter().map(ConvexPolygon::area).collect();
    let covered: f64 = areas.iter().sum();
    let arrangement = Scene::new().pack(&mut polygons).unwrap();

    let mut order = arrangement.order.clone();
    order.sort_unstable();
    assert_eq!(order, (0..polygons.len()).collect::<Vec<_>>());
    assert_disjoint(&polygons);
    for (p, a) in polygons.iter().zip(&areas) {
        assert!((p.area() - a).abs() < 1e-9);
    }
    assert!((score_of(&polygons, covered) - arrangement.score).abs() < 1e-9);
    assert!(arrangement.score >= 0.0 && arrangement.score < 1.0);
}

#[test]
fn output_keeps_input_identity() {
    let originals = regular_set();
    let mut polygons = originals.clone();
    let arrangement = Scene::new().pack(&mut polygons).unwrap();
    for (i, (p, o)) in polygons.iter().zip(&originals).enumerate() {
        assert_eq!(p.len(), o.len());
        let pose = arrangement.poses[i];
        assert_eq!(pose.placed(o).vertices(), p.vertices());
        let angle = p.current_transformation().rotation_angle();
        assert_eq!(angle, pose.angle.sin().atan2(pose.angle.cos()));
    }
}

#[test]
fn packing_is_deterministic() {
    let mut a = regular_set();
    let mut b = regular_set();
    let ra = Scene::new().pack(&mut a).unwrap();
    let rb = Scene::new().pack(&mut b).unwrap();
    assert_eq!(ra, rb);
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(p.vertices(), q.vertices());
    }
}

#[test]
fn greedy_width_one_completes() {
    let mut scene = Scene::new();
    scene.set_beam_width(1).unwrap();
    let mut polygons = regular_set();
    let n = polygons.len();
    let arrangement = scene.pack(&mut polygons).unwrap();
    assert_eq!(arrangement.order.len(), n);
    // n roots, then one beam entry expanded per depth.
    assert_eq!(arrangement.candidates, n * (n + 1) / 2);
    assert_disjoint(&polygons);
}

#[test]
fn candidate_budget_narrows_to_greedy() {
    let cfg = PackCfg {
        max_candidates: Some(1),
        ..PackCfg::default()
    };
    let scene = Scene::with_cfg(cfg).unwrap();
    let mut polygons: Vec<ConvexPolygon> = (3..=6).map(|s| regular_polygon(s, 5.0)).collect();
    let arrangement = scene.pack(&mut polygons).unwrap();
    assert_eq!(arrangement.candidates, 4 + 3 + 2 + 1);
    assert_disjoint(&polygons);
}

#[test]
fn obstacles_are_avoided() {
    let mut scene = Scene::new();
    scene.set_beam_width(3).unwrap();
    scene.add_obstacle(square(10.0));
    let mut polygons: Vec<ConvexPolygon> = (3..=6).map(|s| regular_polygon(s, 4.0)).collect();
    scene.pack(&mut polygons).unwrap();
    assert_disjoint(&polygons);
    for p in &polygons {
        assert!(!p.collides(&scene.environment().obstacles[0]));
    }
}

#[test]
fn boundary_encloses_everything_or_fails() {
    let mut scene = Scene::new();
    scene.set_beam_width(2).unwrap();
    scene.set_boundary(Some(square(200.0)));
    let mut polygons: Vec<ConvexPolygon> = (3..=5).map(|s| regular_polygon(s, 5.0)).collect();
    scene.pack(&mut polygons).unwrap();
    let boundary = scene.environment().boundary.clone().unwrap();
    for p in &polygons {
        assert!(boundary.encloses(p));
    }

    scene.set_boundary(Some(square(1.0)));
    let mut too_big = vec![regular_polygon(4, 5.0)];
    assert_eq!(scene.pack(&mut too_big), Err(PackError::Unplaceable { index: 0 }));
}

/// Places every polygon to the right of the current hull, bottoms aligned.
struct RowPlacer;

impl Placement for RowPlacer {
    fn place(&self, request: &PlacementRequest<'_>) -> Option<Pose> {
        let (lo, _) = request.polygon.aabb()?;
        let x = request.hull.and_then(|h| h.aabb()).map_or(0.0, |(_, hi)| hi.x);
        Some(Pose {
            angle: 0.0,
            offset: point2(x - lo.x, -lo.y),
        })
    }
}

struct NowherePlacer;

impl Placement for NowherePlacer {
    fn place(&self, _: &PlacementRequest<'_>) -> Option<Pose> {
        None
    }
}

#[test]
fn custom_placer_plugs_into_the_search() {
    let search = BeamSearch::with_placer(PackCfg::default(), RowPlacer).unwrap();
    let mut polygons = vec![square(2.0), square(2.0), square(2.0)];
    let arrangement = search.pack(&Environment::default(), &mut polygons).unwrap();
    assert_eq!(arrangement.score, 0.0);
    assert_eq!(arrangement.order, vec![0, 1, 2]);
    let xs: Vec<Point2> = polygons.iter().filter_map(|p| p.aabb()).map(|(lo, _)| lo).collect();
    assert_eq!(xs, vec![point2(0.0, 0.0), point2(2.0, 0.0), point2(4.0, 0.0)]);
}

#[test]
fn unplaceable_polygons_are_reported() {
    let search = BeamSearch::with_placer(PackCfg::default(), NowherePlacer).unwrap();
    let mut polygons = vec![square(1.0), square(1.0)];
    let before = polygons.clone();
    let err = search.pack(&Environment::default(), &mut polygons).unwrap_err();
    assert_eq!(err, PackError::Unplaceable { index: 0 });
    assert_eq!(polygons, before);
}
