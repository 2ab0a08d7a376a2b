//! Frame hierarchy: an arena of `Frame2D` nodes linked by `FrameId` handles.
//!
//! Purpose
//! - Own every frame in one container so parent links cannot dangle.
//! - Keep the parent relation a forest: `set_parent` rejects self-ancestry,
//!   so every chain to a root is finite.
//! - Convert vectors between a frame's local space and global (root) space.
//!
//! Conversion model
//! - `global_coordinates(id, v)`: apply `id`'s own `to_parent`, then each
//!   ancestor's, ending at the root.
//! - `local_coordinates(id, v)`: apply `from_parent` of the root first, then
//!   each descendant down to `id`. Each level undoes translation, rotation,
//!   scale in that order.
//! - Nothing is cached. Each call walks the chain (O(depth)), so mutations of
//!   any ancestor are visible immediately.
//!
//! Code cross-refs: `Frame2D::{to_parent,from_parent,try_from_parent}`

use std::fmt;

use tracing::{debug, warn};

use crate::{Frame2D, GeomCfg, GeomError, Result, Vector2D};

/// Stable handle of a frame inside a `FrameTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning arena of frames. Handles are indices and stay valid for the
/// lifetime of the tree (frames are never removed).
#[derive(Clone, Debug, Default)]
pub struct FrameTree {
    frames: Vec<Frame2D>,
}

impl FrameTree {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            frames: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: FrameId) -> bool {
        id.0 < self.frames.len()
    }

    /// Add a frame; its parent (if any) must already be in the tree.
    pub fn insert(&mut self, frame: Frame2D) -> Result<FrameId> {
        if let Some(p) = frame.parent {
            self.check(p)?;
        }
        let id = FrameId(self.frames.len());
        self.frames.push(frame);
        debug!(frame = %id, parent = ?frame.parent, "frame inserted");
        Ok(id)
    }

    /// Add an identity root frame.
    pub fn add_root(&mut self) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame2D::default());
        debug!(frame = %id, "root inserted");
        id
    }

    /// Add a child of `parent` with the given transform.
    pub fn add_child(
        &mut self,
        parent: FrameId,
        position: Vector2D,
        rotation: f64,
        scale: Vector2D,
    ) -> Result<FrameId> {
        self.insert(Frame2D::new(Some(parent), position, rotation, scale))
    }

    #[inline]
    fn check(&self, id: FrameId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GeomError::UnknownFrame(id))
        }
    }

    #[inline]
    pub fn get(&self, id: FrameId) -> Result<&Frame2D> {
        self.frames.get(id.0).ok_or(GeomError::UnknownFrame(id))
    }

    #[inline]
    fn frame_mut(&mut self, id: FrameId) -> Result<&mut Frame2D> {
        self.frames.get_mut(id.0).ok_or(GeomError::UnknownFrame(id))
    }

    /// Mutable view of the transform fields. The parent link is not part of
    /// the view; re-parent through `set_parent`.
    pub fn transform_mut(&mut self, id: FrameId) -> Result<TransformMut<'_>> {
        let f = self.frame_mut(id)?;
        Ok(TransformMut {
            position: &mut f.position,
            rotation: &mut f.rotation,
            scale: &mut f.scale,
        })
    }

    /// All `(id, frame)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &Frame2D)> + '_ {
        self.frames.iter().enumerate().map(|(i, f)| (FrameId(i), f))
    }

    #[inline]
    pub fn parent(&self, id: FrameId) -> Result<Option<FrameId>> {
        Ok(self.get(id)?.parent)
    }

    /// Re-parent `id` (or detach it with `None`).
    ///
    /// Fails with `GeomError::Cycle` if `parent` is `id` or one of its
    /// descendants; the tree is left unchanged in that case.
    pub fn set_parent(&mut self, id: FrameId, parent: Option<FrameId>) -> Result<()> {
        self.check(id)?;
        if let Some(p) = parent {
            self.check(p)?;
            if p == id || self.is_ancestor(id, p)? {
                warn!(frame = %id, parent = %p, "rejected parent assignment: cycle");
                return Err(GeomError::Cycle {
                    frame: id,
                    parent: p,
                });
            }
        }
        self.frame_mut(id)?.parent = parent;
        debug!(frame = %id, parent = ?parent, "parent set");
        Ok(())
    }

    pub fn position(&self, id: FrameId) -> Result<Vector2D> {
        Ok(self.get(id)?.position)
    }
    pub fn set_position(&mut self, id: FrameId, position: Vector2D) -> Result<()> {
        self.frame_mut(id)?.position = position;
        Ok(())
    }
    pub fn rotation(&self, id: FrameId) -> Result<f64> {
        Ok(self.get(id)?.rotation)
    }
    pub fn set_rotation(&mut self, id: FrameId, rotation: f64) -> Result<()> {
        self.frame_mut(id)?.rotation = rotation;
        Ok(())
    }
    pub fn scale(&self, id: FrameId) -> Result<Vector2D> {
        Ok(self.get(id)?.scale)
    }
    /// No validation: a zero component is stored as given.
    pub fn set_scale(&mut self, id: FrameId, scale: Vector2D) -> Result<()> {
        self.frame_mut(id)?.scale = scale;
        Ok(())
    }

    /// Iterate the strict ancestors of `id`, nearest first, ending at its root.
    pub fn ancestors(&self, id: FrameId) -> Result<Ancestors<'_>> {
        Ok(Ancestors {
            tree: self,
            next: self.get(id)?.parent,
        })
    }

    /// `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: FrameId, id: FrameId) -> Result<bool> {
        Ok(self.ancestors(id)?.any(|a| a == ancestor))
    }

    /// Number of ancestors; roots have depth 0.
    pub fn depth(&self, id: FrameId) -> Result<usize> {
        Ok(self.ancestors(id)?.count())
    }

    /// Root of the tree that contains `id` (itself if it is a root).
    pub fn root_of(&self, id: FrameId) -> Result<FrameId> {
        Ok(self.ancestors(id)?.last().unwrap_or(id))
    }

    pub fn roots(&self) -> Vec<FrameId> {
        self.iter()
            .filter(|(_, f)| f.is_root())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn children(&self, id: FrameId) -> Result<Vec<FrameId>> {
        self.check(id)?;
        Ok(self
            .iter()
            .filter(|(_, f)| f.parent == Some(id))
            .map(|(c, _)| c)
            .collect())
    }

    /// `id` and its ancestors ordered root first.
    fn chain_from_root(&self, id: FrameId) -> Result<Vec<FrameId>> {
        let mut chain: Vec<FrameId> = std::iter::once(id).chain(self.ancestors(id)?).collect();
        chain.reverse();
        Ok(chain)
    }

    /// Express a global (root-space) vector in `id`'s local space.
    ///
    /// Singular scales propagate IEEE NaN/∞; see `try_local_coordinates`.
    pub fn local_coordinates(&self, id: FrameId, global: Vector2D) -> Result<Vector2D> {
        let mut v = global;
        for f in self.chain_from_root(id)? {
            v = self.get(f)?.from_parent(v);
        }
        Ok(v)
    }

    /// Checked `local_coordinates`: fails with `GeomError::DegenerateScale`
    /// naming the first (rootmost) frame on the chain with a zero scale.
    pub fn try_local_coordinates(
        &self,
        id: FrameId,
        global: Vector2D,
        cfg: GeomCfg,
    ) -> Result<Vector2D> {
        let mut v = global;
        for f in self.chain_from_root(id)? {
            v = self.get(f)?.try_from_parent(f, v, cfg)?;
        }
        Ok(v)
    }

    /// Express a vector given in `id`'s local space in global (root) space.
    pub fn global_coordinates(&self, id: FrameId, local: Vector2D) -> Result<Vector2D> {
        let mut v = self.get(id)?.to_parent(local);
        for a in self.ancestors(id)? {
            v = self.get(a)?.to_parent(v);
        }
        Ok(v)
    }

    /// Re-express a vector from `from`'s local space in `to`'s local space.
    ///
    /// Frames in different trees share global space, so any pair converts.
    pub fn convert(&self, from: FrameId, to: FrameId, v: Vector2D) -> Result<Vector2D> {
        let global = self.global_coordinates(from, v)?;
        self.local_coordinates(to, global)
    }
}

/// Mutable borrow of one frame's position, rotation and scale.
#[derive(Debug)]
pub struct TransformMut<'a> {
    pub position: &'a mut Vector2D,
    pub rotation: &'a mut f64,
    pub scale: &'a mut Vector2D,
}

/// Iterator over the strict ancestors of a frame, see `FrameTree::ancestors`.
pub struct Ancestors<'a> {
    tree: &'a FrameTree,
    next: Option<FrameId>,
}

impl Iterator for Ancestors<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<FrameId> {
        let cur = self.next?;
        self.next = self.tree.frames.get(cur.0).and_then(|f| f.parent);
        Some(cur)
    }
}

#[cfg(test)]
mod tests;
