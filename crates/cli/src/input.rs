//! CSV input: point lists (`x,y`) and shape lists (`shape,x,y`).

use anyhow::{bail, Context, Result};
use convack::api::{point2, ConvexPolygon, Point2};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

fn read_frame(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("empty `{name}` in row {row}")))
        .collect()
}

fn points_of(df: &DataFrame) -> Result<Vec<Point2>> {
    let xs = float_column(df, "x")?;
    let ys = float_column(df, "y")?;
    Ok(xs.into_iter().zip(ys).map(|(x, y)| point2(x, y)).collect())
}

/// Points from a CSV with columns `x,y`.
pub fn read_points(path: &Path) -> Result<Vec<Point2>> {
    points_of(&read_frame(path)?)
}

/// Shapes from a CSV with columns `shape,x,y`: one convex hull per distinct
/// `shape` label, in order of first appearance.
pub fn read_shapes(path: &Path) -> Result<Vec<ConvexPolygon>> {
    let df = read_frame(path)?;
    let labels = df
        .column("shape")
        .context("missing column `shape`")?
        .cast(&DataType::String)?;
    let points = points_of(&df)?;

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Point2>> = Vec::new();
    for (row, (label, p)) in labels.str()?.into_iter().zip(points).enumerate() {
        let Some(label) = label else {
            bail!("empty `shape` in row {row}");
        };
        let slot = *slots.entry(label.to_string()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(p);
    }
    tracing::debug!(rows = df.height(), shapes = groups.len(), "shapes read");
    Ok(groups.iter().map(|g| ConvexPolygon::convex_hull(g)).collect())
}
