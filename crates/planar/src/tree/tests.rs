use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

fn v(x: f64, y: f64) -> Vector2D {
    Vector2D::new(x, y)
}

/// root → child → grandchild with distinct transforms at every level.
fn three_level() -> (FrameTree, FrameId, FrameId, FrameId) {
    let mut t = FrameTree::new();
    let root = t
        .insert(Frame2D::root(v(-2.0, 5.0), 0.3, v(1.5, 0.5)))
        .unwrap();
    let child = t.add_child(root, v(10.0, 0.0), FRAC_PI_2, v(2.0, 3.0)).unwrap();
    let grand = t.add_child(child, v(-1.0, 4.0), -1.1, v(0.25, 4.0)).unwrap();
    (t, root, child, grand)
}

#[test]
fn child_of_identity_root_quarter_turn() {
    let mut t = FrameTree::new();
    let root = t.add_root();
    let child = t.add_child(root, v(10.0, 0.0), FRAC_PI_2, Vector2D::ONE).unwrap();
    let g = t.global_coordinates(child, v(1.0, 0.0)).unwrap();
    assert!(g.approx_eq(v(10.0, 1.0), 1e-12), "{g}");
    let l = t.local_coordinates(child, v(10.0, 1.0)).unwrap();
    assert!(l.approx_eq(v(1.0, 0.0), 1e-12), "{l}");
}

#[test]
fn root_frame_roundtrip() {
    let mut t = FrameTree::new();
    let f = t.insert(Frame2D::root(v(3.0, 4.0), 0.0, v(2.0, 2.0))).unwrap();
    // pure scale + translate is exact in binary floating point here
    assert_eq!(t.global_coordinates(f, v(1.0, -1.0)).unwrap(), v(5.0, 2.0));
    assert_eq!(t.local_coordinates(f, v(5.0, 2.0)).unwrap(), v(1.0, -1.0));
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let p = v(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let back = t
            .local_coordinates(f, t.global_coordinates(f, p).unwrap())
            .unwrap();
        assert!(back.approx_eq(p, 1e-12));
    }
}

#[test]
fn hierarchy_matches_level_by_level_composition() {
    let (t, root, child, grand) = three_level();
    let p = v(0.7, -3.2);
    let fr = *t.get(root).unwrap();
    let fc = *t.get(child).unwrap();
    let fg = *t.get(grand).unwrap();

    let expect_global = fr.to_parent(fc.to_parent(fg.to_parent(p)));
    let g = t.global_coordinates(grand, p).unwrap();
    assert!(g.approx_eq(expect_global, 1e-12));

    // local: root's inverse first, then child, then grandchild
    let expect_local = fg.from_parent(fc.from_parent(fr.from_parent(p)));
    let l = t.local_coordinates(grand, p).unwrap();
    assert!(l.approx_eq(expect_local, 1e-12));
}

#[test]
fn hierarchy_roundtrip_seeded() {
    let (t, _, _, grand) = three_level();
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let p = v(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let g = t.global_coordinates(grand, p).unwrap();
        let back = t.local_coordinates(grand, g).unwrap();
        assert!(back.approx_eq(p, 1e-9), "{p} -> {g} -> {back}");
    }
}

#[test]
fn mutations_are_visible_without_cache() {
    let (mut t, root, _, grand) = three_level();
    let p = v(1.0, 1.0);
    let before = t.global_coordinates(grand, p).unwrap();
    t.set_position(root, v(100.0, 0.0)).unwrap();
    let after = t.global_coordinates(grand, p).unwrap();
    // root only translates the result
    let shift = v(100.0, 0.0) - v(-2.0, 5.0);
    assert!(after.approx_eq(before + shift, 1e-9));

    t.set_rotation(root, 0.0).unwrap();
    t.set_scale(root, Vector2D::ONE).unwrap();
    assert_eq!(t.rotation(root).unwrap(), 0.0);
    assert_eq!(t.scale(root).unwrap(), Vector2D::ONE);
    assert_eq!(t.position(root).unwrap(), v(100.0, 0.0));
    let back = t
        .local_coordinates(grand, t.global_coordinates(grand, p).unwrap())
        .unwrap();
    assert!(back.approx_eq(p, 1e-9));
}

#[test]
fn set_parent_rejects_cycles() {
    let (mut t, root, child, grand) = three_level();
    assert_eq!(
        t.set_parent(root, Some(grand)),
        Err(GeomError::Cycle {
            frame: root,
            parent: grand
        })
    );
    assert_eq!(
        t.set_parent(child, Some(child)),
        Err(GeomError::Cycle {
            frame: child,
            parent: child
        })
    );
    // unchanged after rejection
    assert_eq!(t.parent(root).unwrap(), None);
    assert_eq!(t.parent(child).unwrap(), Some(root));

    // legal re-parenting: move grandchild directly under the root, then detach
    t.set_parent(grand, Some(root)).unwrap();
    assert_eq!(t.depth(grand).unwrap(), 1);
    t.set_parent(grand, None).unwrap();
    assert!(t.get(grand).unwrap().is_root());
    assert_eq!(t.roots(), vec![root, grand]);
}

#[test]
fn unknown_handles_are_errors() {
    let (mut t, root, _, _) = three_level();
    let bogus = FrameId(99);
    assert_eq!(t.get(bogus).unwrap_err(), GeomError::UnknownFrame(bogus));
    assert_eq!(
        t.global_coordinates(bogus, Vector2D::ZERO),
        Err(GeomError::UnknownFrame(bogus))
    );
    assert_eq!(
        t.set_parent(root, Some(bogus)),
        Err(GeomError::UnknownFrame(bogus))
    );
    let orphan = Frame2D::new(Some(bogus), Vector2D::ZERO, 0.0, Vector2D::ONE);
    assert_eq!(t.insert(orphan), Err(GeomError::UnknownFrame(bogus)));
    assert_eq!(t.len(), 3);
}

#[test]
fn structure_queries() {
    let (mut t, root, child, grand) = three_level();
    let sibling = t.add_child(root, v(0.0, 1.0), 0.0, Vector2D::ONE).unwrap();
    assert_eq!(t.len(), 4);
    assert!(!t.is_empty());
    assert_eq!(t.ancestors(grand).unwrap().collect::<Vec<_>>(), vec![child, root]);
    assert_eq!(t.ancestors(root).unwrap().count(), 0);
    assert_eq!(t.depth(grand).unwrap(), 2);
    assert_eq!(t.root_of(grand).unwrap(), root);
    assert_eq!(t.root_of(root).unwrap(), root);
    assert_eq!(t.children(root).unwrap(), vec![child, sibling]);
    assert!(t.children(grand).unwrap().is_empty());
    assert!(t.is_ancestor(root, grand).unwrap());
    assert!(!t.is_ancestor(sibling, grand).unwrap());
    assert_eq!(t.roots(), vec![root]);
}

#[test]
fn convert_between_frames_and_trees() {
    let (mut t, _, child, grand) = three_level();
    let other_root = t.insert(Frame2D::root(v(1.0, 1.0), PI, v(2.0, 2.0))).unwrap();
    let p = v(0.5, 0.25);
    let q = t.convert(grand, other_root, p).unwrap();
    let back = t.convert(other_root, grand, q).unwrap();
    assert!(back.approx_eq(p, 1e-9));
    // converting into the parent equals one to_parent step
    let up = t.convert(grand, child, p).unwrap();
    assert!(up.approx_eq(t.get(grand).unwrap().to_parent(p), 1e-9));
}

#[test]
fn zero_scale_propagates_or_reports() {
    let (mut t, _, child, grand) = three_level();
    t.set_scale(child, v(0.0, 1.0)).unwrap();
    let l = t.local_coordinates(grand, v(3.0, 3.0)).unwrap();
    assert!(!l.is_finite());
    assert_eq!(
        t.try_local_coordinates(grand, v(3.0, 3.0), GeomCfg::default()),
        Err(GeomError::DegenerateScale { frame: child })
    );
    // forward direction is well defined, just collapses an axis
    assert!(t.global_coordinates(grand, v(3.0, 3.0)).unwrap().is_finite());
}

#[test]
fn checked_local_matches_unchecked_when_regular() {
    let (t, _, _, grand) = three_level();
    let p = v(-4.0, 2.5);
    assert_eq!(
        t.try_local_coordinates(grand, p, GeomCfg::default()).unwrap(),
        t.local_coordinates(grand, p).unwrap()
    );
}

#[test]
fn transform_view_cannot_rewire_parent() {
    let (mut t, root, child, grand) = three_level();
    {
        let view = t.transform_mut(root).unwrap();
        *view.position = v(7.0, -7.0);
        *view.rotation = 0.0;
        *view.scale = Vector2D::ONE;
    }
    assert_eq!(t.position(root).unwrap(), v(7.0, -7.0));
    assert_eq!(t.rotation(root).unwrap(), 0.0);
    assert_eq!(t.scale(root).unwrap(), Vector2D::ONE);
    // links are untouched and every chain still ends at the root
    assert_eq!(t.parent(root).unwrap(), None);
    assert_eq!(t.ancestors(grand).unwrap().collect::<Vec<_>>(), vec![child, root]);
    assert_eq!(t.root_of(grand).unwrap(), root);
    assert_eq!(
        t.transform_mut(FrameId(42)).unwrap_err(),
        GeomError::UnknownFrame(FrameId(42))
    );
}

#[test]
fn dangling_link_reports_unknown_frame() {
    let (mut t, _, _, grand) = three_level();
    // unreachable through the public API; forced here to pin the error path
    let bogus = FrameId(99);
    t.frames[grand.0].parent = Some(bogus);
    let p = v(1.0, 2.0);
    assert_eq!(
        t.global_coordinates(grand, p),
        Err(GeomError::UnknownFrame(bogus))
    );
    assert_eq!(
        t.local_coordinates(grand, p),
        Err(GeomError::UnknownFrame(bogus))
    );
    assert_eq!(
        t.try_local_coordinates(grand, p, GeomCfg::default()),
        Err(GeomError::UnknownFrame(bogus))
    );
}

fn frame_params() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
    (
        -20.0f64..20.0,
        -20.0f64..20.0,
        -PI..PI,
        prop_oneof![0.5f64..2.0, -2.0f64..-0.5],
        prop_oneof![0.5f64..2.0, -2.0f64..-0.5],
    )
}

proptest! {
    #[test]
    fn chain_roundtrip(
        levels in proptest::collection::vec(frame_params(), 1..5),
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
    ) {
        let mut t = FrameTree::new();
        let mut last: Option<FrameId> = None;
        for (px, py, rot, sx, sy) in levels {
            let f = Frame2D::new(last, v(px, py), rot, v(sx, sy));
            last = Some(t.insert(f).unwrap());
        }
        let leaf = last.unwrap();
        let p = v(x, y);
        let back = t.local_coordinates(leaf, t.global_coordinates(leaf, p).unwrap()).unwrap();
        prop_assert!(back.approx_eq(p, 1e-8), "{} vs {}", back, p);
    }
}
