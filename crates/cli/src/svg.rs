//! Minimal SVG rendering of a packing.

use anyhow::{Context, Result};
use convack::api::ConvexPolygon;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MARGIN: f64 = 1.0;

/// One `<polygon>` per input, viewBox fitted to their joint bounding box.
pub fn render(polygons: &[ConvexPolygon]) -> String {
    let bounds = polygons.iter().filter_map(ConvexPolygon::aabb).reduce(|(lo, hi), (a, b)| {
        (lo.inf(&a), hi.sup(&b))
    });
    let (x, y, w, h) = match bounds {
        Some((lo, hi)) => (
            lo.x - MARGIN,
            lo.y - MARGIN,
            hi.x - lo.x + 2.0 * MARGIN,
            hi.y - lo.y + 2.0 * MARGIN,
        ),
        None => (0.0, 0.0, 1.0, 1.0),
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}">"#
    );
    // Flip y so the picture matches the usual maths orientation.
    let _ = writeln!(
        out,
        r#"<g stroke="black" fill="none" stroke-width="{}" transform="translate(0 {}) scale(1 -1)">"#,
        (w.max(h) / 500.0),
        2.0 * y + h
    );
    for p in polygons {
        let points: Vec<String> = p.vertices().iter().map(|v| format!("{},{}", v.x, v.y)).collect();
        let _ = writeln!(out, r#"<polygon points="{}"/>"#, points.join(" "));
    }
    out.push_str("</g>\n</svg>\n");
    out
}

pub fn write_svg(path: &Path, polygons: &[ConvexPolygon]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, render(polygons)).with_context(|| format!("writing {}", path.display()))
}
