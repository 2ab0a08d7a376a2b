//! One node of a 2D transform hierarchy.
//!
//! A `Frame2D` maps its local space into its parent's space by
//! `v ↦ rotate(v ⊙ scale, rotation) + position` (scale, then rotate, then
//! translate). The inverse undoes the steps in reverse order. Parent links are
//! `FrameId` handles owned by a `FrameTree`; a frame never dereferences them
//! itself.

use crate::tree::FrameId;
use crate::{GeomCfg, GeomError, Result, Vector2D};

/// Translation, rotation (radians, counterclockwise) and per-axis scale
/// relative to the parent frame, or to global space for a root.
///
/// Fields are unvalidated: a zero scale component is accepted and makes
/// `from_parent` divide by zero. The parent link is read-only outside the
/// crate; `FrameTree::set_parent` is the only way to change it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame2D {
    pub position: Vector2D,
    pub rotation: f64,
    pub scale: Vector2D,
    pub(crate) parent: Option<FrameId>,
}

impl Default for Frame2D {
    /// Identity root: origin, no rotation, unit scale.
    fn default() -> Self {
        Self {
            position: Vector2D::ZERO,
            rotation: 0.0,
            scale: Vector2D::ONE,
            parent: None,
        }
    }
}

impl Frame2D {
    #[inline]
    pub fn new(
        parent: Option<FrameId>,
        position: Vector2D,
        rotation: f64,
        scale: Vector2D,
    ) -> Self {
        Self {
            position,
            rotation,
            scale,
            parent,
        }
    }

    /// Root frame with the given transform.
    #[inline]
    pub fn root(position: Vector2D, rotation: f64, scale: Vector2D) -> Self {
        Self::new(None, position, rotation, scale)
    }

    #[inline]
    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Local → parent space: scale, rotate, translate.
    #[inline]
    pub fn to_parent(&self, local: Vector2D) -> Vector2D {
        (local * self.scale).rotate(self.rotation) + self.position
    }

    /// Parent → local space: untranslate, unrotate, unscale.
    #[inline]
    pub fn from_parent(&self, outer: Vector2D) -> Vector2D {
        (outer - self.position).rotate(-self.rotation) / self.scale
    }

    /// `true` if some scale component is within `cfg.eps_scale` of zero (or NaN).
    #[inline]
    pub fn has_degenerate_scale(&self, cfg: GeomCfg) -> bool {
        let bad = |s: f64| s.is_nan() || s.abs() <= cfg.eps_scale;
        bad(self.scale.x) || bad(self.scale.y)
    }

    /// Checked `from_parent`. `id` only labels the error.
    pub fn try_from_parent(&self, id: FrameId, outer: Vector2D, cfg: GeomCfg) -> Result<Vector2D> {
        if self.has_degenerate_scale(cfg) {
            return Err(GeomError::DegenerateScale { frame: id });
        }
        Ok(self.from_parent(outer))
    }
}
