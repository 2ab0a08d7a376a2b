//! Planar vectors and hierarchical 2D reference frames.
//!
//! Layout
//! - `vector`: `Vector2D` value type (algebra, angles, interpolation).
//! - `frame`: `Frame2D`, one translate/rotate/scale node relative to its parent.
//! - `tree`: `FrameTree`, the owning arena that links frames by `FrameId` and
//!   converts vectors between local and global space.
//!
//! Numeric policy
//! - Plain methods follow IEEE semantics: singular inputs (zero-length
//!   normalize, parallel slerp, zero scale) yield NaN/∞ instead of failing.
//! - `try_*` methods take a `GeomCfg` and report `GeomError` at those
//!   singularities instead.

pub mod cfg;
pub mod error;
pub mod frame;
pub mod tree;
pub mod vector;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::GeomCfg;
pub use error::{GeomError, Result};
pub use frame::Frame2D;
pub use tree::{Ancestors, FrameId, FrameTree, TransformMut};
pub use vector::Vector2D;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::{Frame2D, FrameId, FrameTree, GeomCfg, GeomError, Vector2D};
}
