//! Pack regular polygons with 3..=10 sides (radius 10) into `regular_polygons.svg`.
//!
//! Usage:
//!   cargo run -p convack --example regular_polygons
//!   cargo run -p convack --example regular_polygons -- 4   # beam width

use convack::api::{regular_polygon, ConvexPolygon, Scene};

fn main() {
    let beam_width = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);
    let mut scene = Scene::new();
    if let Err(e) = scene.set_beam_width(beam_width) {
        eprintln!("regular_polygons: {e}");
        std::process::exit(2);
    }
    let mut polygons: Vec<ConvexPolygon> = (3..=10).map(|sides| regular_polygon(sides, 10.0)).collect();
    match scene.pack(&mut polygons) {
        Ok(arr) => {
            eprintln!("order={:?} score={:.4} candidates={}", arr.order, arr.score, arr.candidates);
            if let Err(e) = std::fs::write("regular_polygons.svg", to_svg(&polygons)) {
                eprintln!("regular_polygons: writing svg: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("regular_polygons: {e}");
            std::process::exit(1);
        }
    }
}

fn to_svg(polygons: &[ConvexPolygon]) -> String {
    let (mut lo_x, mut lo_y, mut hi_x, mut hi_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for (lo, hi) in polygons.iter().filter_map(ConvexPolygon::aabb) {
        lo_x = lo_x.min(lo.x);
        lo_y = lo_y.min(lo.y);
        hi_x = hi_x.max(hi.x);
        hi_y = hi_y.max(hi.y);
    }
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n",
        lo_x - 1.0,
        lo_y - 1.0,
        hi_x - lo_x + 2.0,
        hi_y - lo_y + 2.0
    );
    for p in polygons {
        let points: Vec<String> = p.vertices().iter().map(|v| format!("{},{}", v.x, v.y)).collect();
        out.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"0.2\"/>\n",
            points.join(" ")
        ));
    }
    out.push_str("</svg>\n");
    out
}
