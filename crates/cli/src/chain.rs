use anyhow::{bail, Context, Result};
use planar::{Frame2D, FrameId, FrameTree, Vector2D};

/// One `--frame px,py,rot,sx,sy` argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSpec {
    pub position: Vector2D,
    pub rotation: f64,
    pub scale: Vector2D,
}

fn parse_components(s: &str, n: usize) -> Result<Vec<f64>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != n {
        return Err(format!("expected {n} comma-separated numbers, got {:?}", s));
    }
    parts
        .iter()
        .map(|p| p.parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect()
}

/// Parse `x,y`.
pub fn parse_vec(s: &str) -> Result<Vector2D, String> {
    let c = parse_components(s, 2)?;
    Ok(Vector2D::new(c[0], c[1]))
}

/// Parse `px,py,rot,sx,sy`; the rotation unit is decided later.
pub fn parse_frame(s: &str) -> Result<FrameSpec, String> {
    let c = parse_components(s, 5)?;
    Ok(FrameSpec {
        position: Vector2D::new(c[0], c[1]),
        rotation: c[2],
        scale: Vector2D::new(c[3], c[4]),
    })
}

/// Build a single chain: `specs[0]` is the root, each next frame is a child of
/// the previous one. Returns the tree and the innermost frame.
pub fn build_chain(specs: &[FrameSpec], degrees: bool) -> Result<(FrameTree, FrameId)> {
    if specs.is_empty() {
        bail!("at least one --frame is required");
    }
    let mut tree = FrameTree::with_capacity(specs.len());
    let mut parent: Option<FrameId> = None;
    for (level, spec) in specs.iter().enumerate() {
        let rotation = if degrees {
            spec.rotation.to_radians()
        } else {
            spec.rotation
        };
        let frame = Frame2D::new(parent, spec.position, rotation, spec.scale);
        let id = tree
            .insert(frame)
            .with_context(|| format!("inserting frame at level {level}"))?;
        tracing::debug!(level, frame = %id, rotation, "chain frame");
        parent = Some(id);
    }
    // non-empty specs always produce a leaf
    let leaf = parent.context("empty chain")?;
    Ok((tree, leaf))
}
