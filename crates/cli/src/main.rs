use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use convack::api::{
    draw_polygon_radial, regular_polygon, scatter, ConvexPolygon, PackCfg, PlaceCfg, RadialCfg, Scene,
    ShapeReplay, DEFAULT_BEAM_WIDTH,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod svg;

#[derive(Parser)]
#[command(name = "convack")]
#[command(about = "Pack convex polygons tightly and render the result")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Pack generated or loaded polygons and write an SVG plus provenance
    Pack(PackArgs),
    /// Convex hull of a CSV point list (columns x,y), printed as JSON
    Hull {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Debug, Serialize)]
struct PackArgs {
    /// Generated shape family; ignored when --input is given
    #[arg(long, value_enum, default_value_t = ShapeSet::Regular)]
    shapes: ShapeSet,
    /// Number of generated shapes
    #[arg(long, default_value_t = 8)]
    count: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// CSV with columns shape,x,y; each shape is the hull of its points
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_BEAM_WIDTH)]
    beam_width: usize,
    #[arg(long, default_value_t = 4)]
    rotations: usize,
    #[arg(long, default_value_t = 16)]
    directions: usize,
    /// Scoring budget; the beam narrows to 1 once it is spent
    #[arg(long)]
    max_candidates: Option<usize>,
    #[arg(long, default_value = "convack.svg")]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum ShapeSet {
    /// Regular polygons with 3, 4, 5, ... sides, radius 10
    Regular,
    /// Seeded random convex polygons, scattered
    Random,
}

#[derive(Serialize)]
struct PackSummary {
    polygons: usize,
    order: Vec<usize>,
    score: f64,
    candidates: usize,
    out: PathBuf,
    provenance: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Pack(args) => pack(args),
        Action::Hull { input } => hull(input),
        Action::Report => report(),
    }
}

fn generate(args: &PackArgs) -> Vec<ConvexPolygon> {
    match args.shapes {
        ShapeSet::Regular => (0..args.count).map(|k| regular_polygon(k + 3, 10.0)).collect(),
        ShapeSet::Random => {
            let mut polys: Vec<ConvexPolygon> = (0..args.count as u64)
                .map(|index| {
                    draw_polygon_radial(
                        RadialCfg::default(),
                        ShapeReplay {
                            seed: args.seed,
                            index,
                        },
                    )
                })
                .collect();
            scatter(&mut polys, 50.0, args.seed);
            polys
        }
    }
}

fn pack(args: PackArgs) -> Result<()> {
    tracing::info!(shapes = ?args.shapes, count = args.count, input = ?args.input, out = %args.out.display(), "pack");
    let mut polygons = match &args.input {
        Some(path) => input::read_shapes(path)?,
        None => generate(&args),
    };
    ensure!(!polygons.is_empty(), "nothing to pack");
    tracing::info!(polygons = polygons.len(), "loaded");

    let cfg = PackCfg {
        beam_width: args.beam_width,
        max_candidates: args.max_candidates,
        place: PlaceCfg {
            rotations: args.rotations,
            directions: args.directions,
        },
    };
    let scene = Scene::with_cfg(cfg).context("invalid packing configuration")?;
    let arrangement = scene.pack(&mut polygons).context("packing failed")?;
    tracing::info!(score = arrangement.score, candidates = arrangement.candidates, "packed");

    svg::write_svg(&args.out, &polygons)?;
    let params = serde_json::to_value(&args)?;
    let prov = provenance::write_sidecar(
        &args.out,
        provenance::Payload::new(params).with_result(json!({
            "order": arrangement.order,
            "score": arrangement.score,
            "candidates": arrangement.candidates,
        })),
    )?;
    tracing::info!(out = %args.out.display(), provenance = %prov.display(), "written");

    let summary = PackSummary {
        polygons: polygons.len(),
        order: arrangement.order,
        score: arrangement.score,
        candidates: arrangement.candidates,
        out: args.out,
        provenance: prov,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn hull(input: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), "hull");
    let points = input::read_points(&input)?;
    let hull = ConvexPolygon::convex_hull(&points);
    let vertices: Vec<[f64; 2]> = hull.vertices().iter().map(|v| [v.x, v.y]).collect();
    let obj = json!({
        "points": points.len(),
        "vertices": vertices,
        "area": hull.area(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": convack::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
