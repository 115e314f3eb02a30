mod util;
use util::*;

use lazycc::merge_error::{Operand, ShapeCheck, Side};
use lazycc::prelude::*;

#[test]
fn one_dimensional_seam_merges_matching_labels() {
    let left = [0u8, 0, 1, 3];
    let right = [0u8, 0, 2, 3];
    let labels = [0u32, 1, 2, 3];
    let left_map = [0u32, 1, 2, 3];
    let right_map = [0u32, 5, 6, 7];
    for strategy in ALL_STRATEGIES {
        let l = BlockView::from_slice(&left, &[4]).unwrap();
        let r = BlockView::from_slice(&right, &[4]).unwrap();
        let ll = BlockView::from_slice(&labels, &[4]).unwrap();
        let mut uf = UnionFindArray::new(8u32);
        merge_boundary_with(
            &l,
            &r,
            &ll,
            &ll,
            &LabelMap::new(&left_map),
            &LabelMap::new(&right_map),
            &mut uf,
            &MergeOptions::default().with_strategy(strategy),
        )
        .unwrap();
        assert_eq!(uf.find(5), uf.find(1), "{strategy:?}");
        assert_eq!(uf.find(7), uf.find(3), "{strategy:?}");
        assert_ne!(uf.find(6), uf.find(2), "{strategy:?}");
    }
}

#[test]
fn singleton_axes_behave_like_a_row() {
    // Same seam as a (4, 1, 1) volume.
    let left = [0u8, 0, 1, 3];
    let right = [0u8, 0, 2, 3];
    let labels = [0u32, 1, 2, 3];
    let l = BlockView::from_slice(&left, &[4, 1, 1]).unwrap();
    let r = BlockView::from_slice(&right, &[4, 1, 1]).unwrap();
    let ll = BlockView::from_slice(&labels, &[4, 1, 1]).unwrap();
    let mut uf = UnionFindArray::new(8u32);
    merge_boundary(
        &l,
        &r,
        &ll,
        &ll,
        &LabelMap::new(&[0u32, 1, 2, 3]),
        &LabelMap::new(&[0u32, 5, 6, 7]),
        &mut uf,
    )
    .unwrap();
    assert_eq!(uf.find(5), uf.find(1));
    assert_eq!(uf.find(7), uf.find(3));
    assert_ne!(uf.find(6), uf.find(2));
}

#[test]
fn two_dimensional_seam() {
    let seam = Seam {
        shape: vec![2, 4],
        left: vec![0, 13, 14, 14, 0, 14, 14, 13],
        right: vec![0, 0, 14, 0, 0, 0, 0, 13],
        left_labels: vec![0, 2, 1, 1, 0, 1, 1, 3],
        right_labels: vec![0, 0, 2, 0, 0, 0, 0, 1],
        left_map: vec![0, 1, 2, 3, 4],
        right_map: vec![0, 5, 6, 7, 8],
    };
    for strategy in ALL_STRATEGIES {
        let c = seam.classes(&MergeOptions::default().with_strategy(strategy));
        assert_eq!(c[1], c[6], "{strategy:?}");
        assert_eq!(c[3], c[5], "{strategy:?}");
        assert_ne!(c[2], c[6], "{strategy:?}");
        assert_ne!(c[4], c[8], "{strategy:?}");
        assert_ne!(c[1], c[3], "{strategy:?}");
    }
}

#[test]
fn shape_mismatch_fails_without_touching_union_find() {
    let a = [1u8; 4];
    let labels = [1u32; 4];
    let map = [0u32, 1];
    let l = BlockView::from_slice(&a, &[4]).unwrap();
    let r = BlockView::from_slice(&a, &[2, 2]).unwrap();
    let ll = BlockView::from_slice(&labels, &[4]).unwrap();
    let mut uf = UnionFindArray::new(2u32);
    let before = uf.clone();
    let err = merge_boundary(
        &l,
        &r,
        &ll,
        &ll,
        &LabelMap::new(&map),
        &LabelMap::new(&map),
        &mut uf,
    )
    .unwrap_err();
    assert_eq!(
        err,
        MergeError::ShapeMismatch {
            check: ShapeCheck::Pixels,
            lhs: vec![4],
            rhs: vec![2, 2],
        }
    );
    assert_eq!(uf, before);

    let rl = BlockView::from_slice(&labels, &[2, 2]).unwrap();
    let err = merge_boundary(
        &l,
        &l,
        &ll,
        &rl,
        &LabelMap::new(&map),
        &LabelMap::new(&map),
        &mut uf,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        MergeError::ShapeMismatch {
            check: ShapeCheck::Labels,
            ..
        }
    ));
    assert_eq!(uf, before);
}

#[test]
fn label_beyond_map_is_rejected_up_front() {
    // The offending label sits at the end; the earlier match must not be
    // merged either.
    let px = [1u8, 1, 1];
    let left_labels = [1u32, 1, 1];
    let right_labels = [1u32, 1, 4];
    let l = BlockView::from_slice(&px, &[3]).unwrap();
    let ll = BlockView::from_slice(&left_labels, &[3]).unwrap();
    let rl = BlockView::from_slice(&right_labels, &[3]).unwrap();
    let mut uf = UnionFindArray::new(4u32);
    let before = uf.clone();
    for strategy in ALL_STRATEGIES {
        let err = merge_boundary_with(
            &l,
            &l,
            &ll,
            &rl,
            &LabelMap::new(&[0u32, 1]),
            &LabelMap::new(&[0u32, 2, 3]),
            &mut uf,
            &MergeOptions::default().with_strategy(strategy),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MergeError::IndexOutOfRange {
                side: Side::Right,
                label: 4,
                len: 3
            }
        );
        assert_eq!(uf, before);
    }
}

#[test]
fn forced_flat_path_requires_contiguous_operands() {
    let seam = Seam::new(
        &[2, 3],
        vec![1, 1, 2, 2, 3, 3],
        vec![1, 1, 2, 2, 3, 3],
        vec![1, 1, 2, 2, 3, 3],
        vec![1, 1, 1, 2, 2, 2],
    );
    let fl = fortran_copy(&seam.left_labels, &seam.shape);
    let l = BlockView::from_slice(&seam.left, &seam.shape).unwrap();
    let ll = fortran_view(&fl, &seam.shape);
    let rl = BlockView::from_slice(&seam.right_labels, &seam.shape).unwrap();
    let mut uf = UnionFindArray::new(seam.n_global());
    let before = uf.clone();
    let err = merge_boundary_with(
        &l,
        &l,
        &ll,
        &rl,
        &LabelMap::new(&seam.left_map),
        &LabelMap::new(&seam.right_map),
        &mut uf,
        &MergeOptions::default().with_strategy(Strategy::Flat),
    )
    .unwrap_err();
    assert_eq!(
        err,
        MergeError::LayoutMismatch {
            operand: Operand::LeftLabels
        }
    );
    assert_eq!(uf, before);

    // The dispatcher falls back to a strided traversal for the same input.
    let got = classes_of_views(
        &l,
        &l,
        &ll,
        &rl,
        &seam.left_map,
        &seam.right_map,
        seam.n_global(),
        &MergeOptions::default(),
    );
    assert_eq!(got, seam.classes(&MergeOptions::default()));
}

#[test]
fn zero_labels_never_merge() {
    let px = [9u8; 6];
    let left_labels = [0u32, 0, 0, 1, 0, 2];
    let right_labels = [1u32, 2, 0, 0, 0, 0];
    let seam = Seam::new(
        &[6],
        px.to_vec(),
        px.to_vec(),
        left_labels.to_vec(),
        right_labels.to_vec(),
    );
    for strategy in ALL_STRATEGIES {
        let c = seam.classes(&MergeOptions::default().with_strategy(strategy));
        let identity: Vec<u32> = (0..seam.n_global()).collect();
        assert_eq!(c, identity, "{strategy:?}");
    }
}

#[test]
fn left_labeled_rule_merges_into_right_background() {
    // Asymmetric rule: a zero right label is still looked up and merged.
    let px = [5u8, 6];
    let left_labels = [1u32, 2];
    let right_labels = [0u32, 1];
    let seam = Seam::new(
        &[2],
        px.to_vec(),
        px.to_vec(),
        left_labels.to_vec(),
        right_labels.to_vec(),
    );
    // left map [0, 1, 2], right map [0, 3]
    for strategy in ALL_STRATEGIES {
        let both = seam.classes(&MergeOptions::default().with_strategy(strategy));
        assert_ne!(both[1], both[0]);
        assert_eq!(both[2], both[3]);

        let legacy = seam.classes(
            &MergeOptions::default()
                .with_strategy(strategy)
                .with_rule(BoundaryRule::LeftLabeled),
        );
        assert_eq!(legacy[1], legacy[0], "{strategy:?}");
        assert_eq!(legacy[2], legacy[3], "{strategy:?}");
    }
}

#[test]
fn float_pixels_compare_by_value() {
    let left = [0.5f32, 1.0, f32::NAN];
    let right = [0.5f32, 2.0, f32::NAN];
    let labels = [1u32, 2, 3];
    let l = BlockView::from_slice(&left, &[3]).unwrap();
    let r = BlockView::from_slice(&right, &[3]).unwrap();
    let ll = BlockView::from_slice(&labels, &[3]).unwrap();
    let mut uf = UnionFindArray::new(8u32);
    merge_boundary(
        &l,
        &r,
        &ll,
        &ll,
        &LabelMap::new(&[0u32, 1, 2, 3]),
        &LabelMap::new(&[0u32, 4, 5, 6]),
        &mut uf,
    )
    .unwrap();
    assert_eq!(uf.find(1), uf.find(4));
    assert_ne!(uf.find(2), uf.find(5));
    assert_ne!(uf.find(3), uf.find(6));
}

#[test]
fn find_is_idempotent_after_merge() {
    let seam = Seam::new(
        &[3, 3],
        vec![1, 1, 2, 2, 2, 3, 3, 3, 3],
        vec![1, 1, 2, 2, 2, 3, 3, 3, 3],
        vec![1, 1, 2, 3, 3, 4, 4, 4, 4],
        vec![1, 2, 2, 2, 3, 3, 1, 1, 1],
    );
    let l = BlockView::from_slice(&seam.left, &seam.shape).unwrap();
    let ll = BlockView::from_slice(&seam.left_labels, &seam.shape).unwrap();
    let rl = BlockView::from_slice(&seam.right_labels, &seam.shape).unwrap();
    let mut uf = UnionFindArray::new(seam.n_global());
    merge_boundary(
        &l,
        &l,
        &ll,
        &rl,
        &LabelMap::new(&seam.left_map),
        &LabelMap::new(&seam.right_map),
        &mut uf,
    )
    .unwrap();
    let first = classes(&mut uf, seam.n_global());
    let second = classes(&mut uf, seam.n_global());
    assert_eq!(first, second);
    uf.validate_invariants().unwrap();
}

#[test]
fn strided_label_maps_are_accepted() {
    // Maps stored as columns of a (labels x 2) table.
    let table = [0u32, 0, 1, 5, 2, 6, 3, 7];
    let column = |offset| BlockView::from_parts(&table, &[4], &[2], offset).unwrap();
    let left_map = LabelMap::from_view(column(0)).unwrap();
    let right_map = LabelMap::from_view(column(1)).unwrap();
    let left = [0u8, 0, 1, 3];
    let right = [0u8, 0, 2, 3];
    let labels = [0u32, 1, 2, 3];
    let l = BlockView::from_slice(&left, &[4]).unwrap();
    let r = BlockView::from_slice(&right, &[4]).unwrap();
    let ll = BlockView::from_slice(&labels, &[4]).unwrap();
    let mut uf = UnionFindArray::new(8u32);
    merge_boundary(&l, &r, &ll, &ll, &left_map, &right_map, &mut uf).unwrap();
    assert_eq!(uf.find(5), uf.find(1));
    assert_eq!(uf.find(7), uf.find(3));
    assert_ne!(uf.find(6), uf.find(2));
}

#[test]
fn huge_strides_on_singleton_axes_are_never_applied() {
    let px = [0u8, 7, 7];
    let labels = [0u32, 1, 2];
    let left_map = [0u32, 1, 2];
    let right_map = [0u32, 3, 4];
    let p = BlockView::from_parts(&px, &[2, 1], &[1, isize::MAX], 1).unwrap();
    let l = BlockView::from_parts(&labels, &[2, 1], &[1, isize::MAX], 1).unwrap();
    // Reversed right labels [2, 1]: not contiguous, so `Auto` takes a
    // strided path as well.
    let r = BlockView::from_parts(&labels, &[2, 1], &[-1, isize::MAX], 2).unwrap();
    for strategy in ALL_STRATEGIES {
        let mut uf = UnionFindArray::new(5u32);
        merge_boundary_with(
            &p,
            &p,
            &l,
            &l,
            &LabelMap::new(&left_map),
            &LabelMap::new(&right_map),
            &mut uf,
            &MergeOptions::default().with_strategy(strategy),
        )
        .unwrap();
        assert_eq!(uf.find(1), uf.find(3), "{strategy:?}");
        assert_eq!(uf.find(2), uf.find(4), "{strategy:?}");

        if strategy == Strategy::Flat {
            continue;
        }
        let mut uf = UnionFindArray::new(5u32);
        merge_boundary_with(
            &p,
            &p,
            &l,
            &r,
            &LabelMap::new(&left_map),
            &LabelMap::new(&right_map),
            &mut uf,
            &MergeOptions::default().with_strategy(strategy),
        )
        .unwrap();
        assert_eq!(uf.find(1), uf.find(4), "{strategy:?}");
        assert_eq!(uf.find(2), uf.find(3), "{strategy:?}");
        assert_ne!(uf.find(1), uf.find(2), "{strategy:?}");
    }
}

#[test]
fn rank_zero_seam_is_visited_once() {
    let px = [4u8];
    let left_labels = [1u32];
    let right_labels = [2u32];
    let p = BlockView::from_parts(&px, &[], &[], 0).unwrap();
    let ll = BlockView::from_parts(&left_labels, &[], &[], 0).unwrap();
    let rl = BlockView::from_parts(&right_labels, &[], &[], 0).unwrap();
    for strategy in ALL_STRATEGIES {
        let mut unions = PairBuffer::<u32>::new();
        merge_boundary_with(
            &p,
            &p,
            &ll,
            &rl,
            &LabelMap::new(&[0u32, 1]),
            &LabelMap::new(&[0u32, 2, 3]),
            &mut unions,
            &MergeOptions::default().with_strategy(strategy),
        )
        .unwrap();
        assert_eq!(unions.pairs(), &[(1, 3)], "{strategy:?}");
    }
}

#[test]
fn empty_seam_issues_no_unions() {
    let px: [u8; 0] = [];
    let labels: [u32; 0] = [];
    let p = BlockView::from_slice(&px, &[0, 3]).unwrap();
    let l = BlockView::from_slice(&labels, &[0, 3]).unwrap();
    for strategy in ALL_STRATEGIES {
        let mut uf = UnionFindArray::new(4u32);
        let before = uf.clone();
        merge_boundary_with(
            &p,
            &p,
            &l,
            &l,
            &LabelMap::new(&[0u32]),
            &LabelMap::new(&[0u32]),
            &mut uf,
            &MergeOptions::default().with_strategy(strategy),
        )
        .unwrap();
        assert_eq!(uf, before, "{strategy:?}");

        let mut unions = PairBuffer::<u32>::new();
        let map = LabelMap::new(&[0u32]);
        let opts = MergeOptions::default().with_strategy(strategy);
        merge_boundary_with(&p, &p, &l, &l, &map, &map, &mut unions, &opts).unwrap();
        assert!(unions.is_empty(), "{strategy:?}");
    }
}
