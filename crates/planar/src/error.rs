//! Errors reported by checked operations and by `FrameTree` handle lookups.

use thiserror::Error;

use crate::tree::FrameId;

/// Errors produced by the geometry layer.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    /// Normalizing a vector whose magnitude is (numerically) zero.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// Spherical interpolation between parallel or anti-parallel vectors.
    #[error("slerp between parallel vectors is undefined")]
    ParallelVectors,

    /// A frame on the conversion path has a zero scale component.
    #[error("frame {frame} has a degenerate scale component")]
    DegenerateScale { frame: FrameId },

    /// Handle does not refer to a frame in this tree.
    #[error("unknown frame {0}")]
    UnknownFrame(FrameId),

    /// Assigning `parent` to `frame` would make `frame` its own ancestor.
    #[error("parenting {frame} under {parent} would create a cycle")]
    Cycle { frame: FrameId, parent: FrameId },
}

pub type Result<T> = std::result::Result<T, GeomError>;
