//! Flattened fast path for fully contiguous operands.
//!
//! All four views are read as plain slices of equal length and both maps as
//! plain lookup tables, so the loop carries no per-axis bookkeeping at all.

use itertools::izip;

use crate::algs::boundary::Boundary;
use crate::algs::predicate::BoundaryRule;
use crate::data::label::Label;
use crate::merge_error::{MergeError, Operand};
use crate::union_find::UnionSink;

/// Runs the predicate over the linear runs; returns the number of unions.
///
/// # Errors
/// `LayoutMismatch` naming the first operand that is not one contiguous
/// run. Checked before the first union.
pub(crate) fn merge<T, L, U>(
    b: &Boundary<'_, '_, T, L>,
    rule: BoundaryRule,
    uf: &mut U,
) -> Result<usize, MergeError>
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let left = run(b.left.as_contiguous_slice(), Operand::LeftPixels)?;
    let right = run(b.right.as_contiguous_slice(), Operand::RightPixels)?;
    let left_labels = run(b.left_labels.as_contiguous_slice(), Operand::LeftLabels)?;
    let right_labels = run(b.right_labels.as_contiguous_slice(), Operand::RightLabels)?;
    let left_map = run(b.left_map.as_contiguous_slice(), Operand::LeftMap)?;
    let right_map = run(b.right_map.as_contiguous_slice(), Operand::RightMap)?;

    let mut unions = 0;
    for (&lv, &rv, &ll, &rl) in izip!(left, right, left_labels, right_labels) {
        if lv == rv && rule.admits(ll, rl) {
            uf.make_union(left_map[ll.index()], right_map[rl.index()]);
            unions += 1;
        }
    }
    Ok(unions)
}

#[inline]
fn run<X>(slice: Option<&[X]>, operand: Operand) -> Result<&[X], MergeError> {
    slice.ok_or(MergeError::LayoutMismatch { operand })
}
