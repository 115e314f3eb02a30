//! Synchronized four-view iterator.
//!
//! [`CoupledIter`] walks left pixels, right pixels, left labels and right
//! labels in lock-step and yields the four current values as one tuple.
//! The merge built on it is a plain fold of the boundary predicate over the
//! iterator.

use crate::algs::boundary::Boundary;
use crate::algs::predicate::Unifier;
use crate::data::label::Label;
use crate::data::view::BlockView;
use crate::merge_error::{MergeError, ShapeCheck};
use crate::union_find::UnionSink;

/// Lock-step iterator over four equally shaped views, in C order.
///
/// # Example
/// ```rust
/// # fn try_main() -> Result<(), lazycc::merge_error::MergeError> {
/// use lazycc::algs::coupled::CoupledIter;
/// use lazycc::data::view::BlockView;
/// let px = [1u8, 2];
/// let lb = [0u32, 3];
/// let p = BlockView::from_slice(&px, &[2])?;
/// let l = BlockView::from_slice(&lb, &[2])?;
/// let all: Vec<_> = CoupledIter::new(&p, &p, &l, &l)?.collect();
/// assert_eq!(all, vec![(1, 1, 0, 0), (2, 2, 3, 3)]);
/// # Ok(())
/// # }
/// # try_main().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct CoupledIter<'a, T, L> {
    left: &'a [T],
    right: &'a [T],
    left_labels: &'a [L],
    right_labels: &'a [L],
    shape: Vec<usize>,
    /// Per-axis strides of the four operands.
    strides: Vec<[isize; 4]>,
    index: Vec<usize>,
    pos: [isize; 4],
    remaining: usize,
}

impl<'a, T: Copy, L: Copy> CoupledIter<'a, T, L> {
    /// Couples four views after checking that their shapes agree.
    ///
    /// # Errors
    /// `ShapeMismatch` naming the first disagreeing pair.
    pub fn new(
        left: &BlockView<'a, T>,
        right: &BlockView<'a, T>,
        left_labels: &BlockView<'a, L>,
        right_labels: &BlockView<'a, L>,
    ) -> Result<Self, MergeError> {
        let pairs = [
            (left.shape(), right.shape(), ShapeCheck::Pixels),
            (left_labels.shape(), right_labels.shape(), ShapeCheck::Labels),
            (left_labels.shape(), left.shape(), ShapeCheck::LabelsVsPixels),
        ];
        for (lhs, rhs, check) in pairs {
            if lhs != rhs {
                return Err(MergeError::ShapeMismatch {
                    check,
                    lhs: lhs.to_vec(),
                    rhs: rhs.to_vec(),
                });
            }
        }
        Ok(Self::coupled(left, right, left_labels, right_labels))
    }

    fn coupled(
        left: &BlockView<'a, T>,
        right: &BlockView<'a, T>,
        left_labels: &BlockView<'a, L>,
        right_labels: &BlockView<'a, L>,
    ) -> Self {
        let (lp, p0) = left.raw_parts();
        let (rp, p1) = right.raw_parts();
        let (ll, p2) = left_labels.raw_parts();
        let (rl, p3) = right_labels.raw_parts();
        let strides = (0..left.ndim())
            .map(|ax| {
                [
                    left.strides()[ax],
                    right.strides()[ax],
                    left_labels.strides()[ax],
                    right_labels.strides()[ax],
                ]
            })
            .collect();
        Self {
            left: lp,
            right: rp,
            left_labels: ll,
            right_labels: rl,
            shape: left.shape().to_vec(),
            strides,
            index: vec![0; left.ndim()],
            pos: [p0, p1, p2, p3],
            remaining: left.len(),
        }
    }

    /// Moves to the next position in C order. Only called while another
    /// element remains, so no cursor leaves the reachable range.
    fn advance(&mut self) {
        for ax in (0..self.shape.len()).rev() {
            let st = self.strides[ax];
            if self.index[ax] + 1 < self.shape[ax] {
                self.index[ax] += 1;
                for (p, s) in self.pos.iter_mut().zip(st) {
                    *p += s;
                }
                return;
            }
            let back = self.index[ax] as isize;
            for (p, s) in self.pos.iter_mut().zip(st) {
                *p -= back * s;
            }
            self.index[ax] = 0;
        }
    }
}

impl<T: Copy, L: Copy> Iterator for CoupledIter<'_, T, L> {
    /// `(left pixel, right pixel, left label, right label)`
    type Item = (T, T, L, L);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let [p0, p1, p2, p3] = self.pos;
        let item = (
            self.left[p0 as usize],
            self.right[p1 as usize],
            self.left_labels[p2 as usize],
            self.right_labels[p3 as usize],
        );
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Copy, L: Copy> ExactSizeIterator for CoupledIter<'_, T, L> {}

pub(crate) fn merge<T, L, U>(b: &Boundary<'_, '_, T, L>, unifier: &mut Unifier<'_, '_, '_, L, U>)
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let iter = CoupledIter::coupled(b.left, b.right, b.left_labels, b.right_labels);
    for (lv, rv, ll, rl) in iter {
        unifier.visit(lv, rv, ll, rl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_aligned_tuples_across_layouts() {
        let a: Vec<u16> = (0..6).collect();
        let b: Vec<u16> = (10..16).collect();
        let la: Vec<u32> = (20..26).collect();
        let lb_t: Vec<u32> = vec![30, 33, 31, 34, 32, 35];
        let va = BlockView::from_slice(&a, &[2, 3]).unwrap();
        let vb = BlockView::from_slice(&b, &[2, 3]).unwrap();
        let vla = BlockView::from_slice(&la, &[2, 3]).unwrap();
        let vlb = BlockView::from_slice(&lb_t, &[3, 2]).unwrap().t();
        let got: Vec<_> = CoupledIter::new(&va, &vb, &vla, &vlb).unwrap().collect();
        assert_eq!(got.len(), 6);
        for (k, (x, y, l, r)) in got.into_iter().enumerate() {
            assert_eq!(x as usize, k);
            assert_eq!(y as usize, 10 + k);
            assert_eq!(l as usize, 20 + k);
            assert_eq!(r as usize, 30 + k);
        }
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let a = [0u8; 4];
        let l = [0u32; 4];
        let v = BlockView::from_slice(&a, &[4]).unwrap();
        let w = BlockView::from_slice(&a, &[2, 2]).unwrap();
        let lv = BlockView::from_slice(&l, &[4]).unwrap();
        let err = CoupledIter::new(&v, &w, &lv, &lv).unwrap_err();
        assert!(matches!(
            err,
            MergeError::ShapeMismatch {
                check: ShapeCheck::Pixels,
                ..
            }
        ));
    }

    #[test]
    fn huge_singleton_strides_do_not_overflow() {
        let px = [0u8, 7, 7];
        let lb = [0u32, 1, 2];
        let p = BlockView::from_parts(&px, &[2, 1], &[1, isize::MAX], 1).unwrap();
        let l = BlockView::from_parts(&lb, &[1, 2], &[isize::MAX, 1], 1)
            .unwrap()
            .t();
        let got: Vec<_> = CoupledIter::new(&p, &p, &l, &l).unwrap().collect();
        assert_eq!(got, vec![(7, 7, 1, 1), (7, 7, 2, 2)]);
    }

    #[test]
    fn rank_zero_and_empty() {
        let a = [7u8];
        let l = [1u32];
        let p = BlockView::from_parts(&a, &[], &[], 0).unwrap();
        let q = BlockView::from_parts(&l, &[], &[], 0).unwrap();
        assert_eq!(
            CoupledIter::new(&p, &p, &q, &q).unwrap().collect::<Vec<_>>(),
            vec![(7, 7, 1, 1)]
        );
        let e = BlockView::from_slice(&a[..0], &[0, 3]).unwrap();
        let f = BlockView::from_slice(&l[..0], &[0, 3]).unwrap();
        assert_eq!(CoupledIter::new(&e, &e, &f, &f).unwrap().count(), 0);
    }
}
