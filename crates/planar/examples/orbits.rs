//! Sun → planet → moon hierarchy; prints the moon's global position over time.
//!
//! Usage:
//!   cargo run -p planar --example orbits -- [steps]
//!
//! Each step advances the planet's orbit and the moon's orbit by a fixed angle
//! and reports where a marker at the moon's local `(1, 0)` lands in global space.

use planar::{FrameTree, Vector2D};

fn main() -> Result<(), planar::GeomError> {
    let steps: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    let mut tree = FrameTree::new();
    let sun = tree.add_root();
    let orbit = tree.add_child(sun, Vector2D::ZERO, 0.0, Vector2D::ONE)?;
    let planet = tree.add_child(orbit, Vector2D::new(10.0, 0.0), 0.0, Vector2D::ONE)?;
    let moon = tree.add_child(planet, Vector2D::new(2.0, 0.0), 0.0, Vector2D::new(0.5, 0.5))?;

    let dt = std::f64::consts::TAU / steps.max(1) as f64;
    for k in 0..=steps {
        let t = k as f64 * dt;
        tree.set_rotation(orbit, t)?;
        tree.set_rotation(planet, 4.0 * t)?;
        let marker = tree.global_coordinates(moon, Vector2D::RIGHT)?;
        let depth = tree.depth(moon)?;
        println!("step {k:>3}  t={t:.3}  depth={depth}  marker={marker}");
    }
    Ok(())
}
