//! Tolerances for the checked (`try_*`) operations.
//!
//! The unchecked operations never consult these; they exist so that callers
//! can opt into explicit errors at numeric singularities.

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Magnitudes at or below this are treated as zero-length.
    pub eps_len: f64,
    /// `|sin Ω|` at or below this marks two vectors as parallel for slerp.
    pub eps_parallel: f64,
    /// Scale components with `|s|` at or below this are degenerate.
    pub eps_scale: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_len: 1e-12,
            eps_parallel: 1e-12,
            eps_scale: 1e-12,
        }
    }
}

impl GeomCfg {
    /// Exact-zero checks only: every tolerance set to `0.0`.
    #[inline]
    pub fn exact() -> Self {
        Self {
            eps_len: 0.0,
            eps_parallel: 0.0,
            eps_scale: 0.0,
        }
    }
}
