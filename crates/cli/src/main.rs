use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use planar::{GeomCfg, Vector2D};
use serde_json::{json, Value};
use tracing_subscriber::fmt::SubscriberBuilder;

mod chain;
mod provenance;

use chain::{build_chain, parse_frame, parse_vec, FrameSpec};

#[derive(Parser)]
#[command(name = "planar")]
#[command(about = "Convert points through nested 2D reference frames")]
struct Cmd {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Frame rotations are given in degrees instead of radians
    #[arg(long, global = true)]
    degrees: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone)]
struct ChainArgs {
    /// Frame as `px,py,rot,sx,sy`; repeat to nest, the first one is the root
    #[arg(long = "frame", required = true, value_parser = parse_frame, allow_hyphen_values = true)]
    frames: Vec<FrameSpec>,

    /// Point as `x,y`
    #[arg(long, value_parser = parse_vec, allow_hyphen_values = true)]
    point: Vector2D,
}

#[derive(Subcommand)]
enum Action {
    /// Map a point from the innermost frame to global space
    Global(ChainArgs),
    /// Map a global point into the innermost frame (zero scale is an error)
    Local(ChainArgs),
    /// Local → global → local, reporting the max-abs drift
    Roundtrip(ChainArgs),
    /// Vector queries on `a`, plus pairwise ones when `b` is given
    Vector {
        #[arg(long, value_parser = parse_vec, allow_hyphen_values = true)]
        a: Vector2D,
        #[arg(long, value_parser = parse_vec, allow_hyphen_values = true)]
        b: Option<Vector2D>,
        /// Interpolation parameter for lerp/slerp
        #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
        t: f64,
    },
    /// Print build provenance (git revision, versions)
    Report,
}

/// Rendered command result.
struct Output {
    text: String,
    json: Value,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let out = execute(&cmd)?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&out.json)?);
    } else {
        println!("{}", out.text);
    }
    Ok(())
}

fn execute(cmd: &Cmd) -> Result<Output> {
    match &cmd.action {
        Action::Global(args) => global(args, cmd.degrees),
        Action::Local(args) => local(args, cmd.degrees),
        Action::Roundtrip(args) => roundtrip(args, cmd.degrees),
        Action::Vector { a, b, t } => Ok(vector(*a, *b, *t)),
        Action::Report => Ok(report()),
    }
}

fn vec_json(v: Vector2D) -> Value {
    json!([v.x, v.y])
}

fn global(args: &ChainArgs, degrees: bool) -> Result<Output> {
    tracing::info!(frames = args.frames.len(), point = %args.point, degrees, "global");
    let (tree, leaf) = build_chain(&args.frames, degrees)?;
    let g = tree.global_coordinates(leaf, args.point)?;
    Ok(Output {
        text: format!("global {}", g),
        json: json!({
            "command": "global",
            "depth": args.frames.len() - 1,
            "input": vec_json(args.point),
            "output": vec_json(g),
        }),
    })
}

fn local(args: &ChainArgs, degrees: bool) -> Result<Output> {
    tracing::info!(frames = args.frames.len(), point = %args.point, degrees, "local");
    let (tree, leaf) = build_chain(&args.frames, degrees)?;
    let l = tree
        .try_local_coordinates(leaf, args.point, GeomCfg::default())
        .context("converting to local coordinates")?;
    Ok(Output {
        text: format!("local {}", l),
        json: json!({
            "command": "local",
            "depth": args.frames.len() - 1,
            "input": vec_json(args.point),
            "output": vec_json(l),
        }),
    })
}

fn roundtrip(args: &ChainArgs, degrees: bool) -> Result<Output> {
    tracing::info!(frames = args.frames.len(), point = %args.point, degrees, "roundtrip");
    let (tree, leaf) = build_chain(&args.frames, degrees)?;
    let g = tree.global_coordinates(leaf, args.point)?;
    let back = tree
        .try_local_coordinates(leaf, g, GeomCfg::default())
        .context("converting back to local coordinates")?;
    let err = (back.x - args.point.x).abs().max((back.y - args.point.y).abs());
    tracing::info!(err, "roundtrip_drift");
    Ok(Output {
        text: format!("global {}\nlocal {}\nmax_abs_err {:e}", g, back, err),
        json: json!({
            "command": "roundtrip",
            "input": vec_json(args.point),
            "global": vec_json(g),
            "local": vec_json(back),
            "max_abs_err": err,
        }),
    })
}

fn vector(a: Vector2D, b: Option<Vector2D>, t: f64) -> Output {
    tracing::info!(a = %a, b = ?b, t, "vector");
    let cfg = GeomCfg::default();
    let normalized = a.try_normalized(cfg).ok();
    let mut lines = vec![
        format!("magnitude {}", a.magnitude()),
        format!("sqr_magnitude {}", a.sqr_magnitude()),
        format!("angle {}", a.angle()),
        format!("perpendicular {}", a.perpendicular()),
        match normalized {
            Some(n) => format!("normalized {}", n),
            None => "normalized undefined (zero length)".to_string(),
        },
    ];
    let mut doc = json!({
        "command": "vector",
        "a": vec_json(a),
        "magnitude": a.magnitude(),
        "sqr_magnitude": a.sqr_magnitude(),
        "angle": a.angle(),
        "perpendicular": vec_json(a.perpendicular()),
        "normalized": normalized.map(vec_json),
    });
    if let Some(b) = b {
        let slerp = Vector2D::try_slerp(a, b, t, cfg).ok();
        lines.push(format!("dot {}", a.dot(b)));
        lines.push(format!("cross {}", a.cross(b)));
        lines.push(format!("angle_to {}", a.angle_to(b)));
        lines.push(format!("lerp({t}) {}", Vector2D::lerp(a, b, t)));
        lines.push(match slerp {
            Some(s) => format!("slerp({t}) {}", s),
            None => format!("slerp({t}) undefined (parallel vectors)"),
        });
        doc["b"] = vec_json(b);
        doc["t"] = json!(t);
        doc["dot"] = json!(a.dot(b));
        doc["cross"] = json!(a.cross(b));
        doc["angle_to"] = json!(a.angle_to(b));
        doc["lerp"] = vec_json(Vector2D::lerp(a, b, t));
        doc["slerp"] = slerp.map(vec_json).unwrap_or(Value::Null);
    }
    Output {
        text: lines.join("\n"),
        json: doc,
    }
}

fn report() -> Output {
    let info = provenance::build_info();
    Output {
        text: format!(
            "code_rev {}\ncli {}\nplanar {}",
            info["code_rev"].as_str().unwrap_or("unknown"),
            env!("CARGO_PKG_VERSION"),
            planar::VERSION
        ),
        json: info,
    }
}
