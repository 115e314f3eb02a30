//! Shape/stride descriptors shared by every traversal.
//!
//! Strides are signed element counts, as in numpy-style views: a negative
//! stride walks an axis backwards. Contiguity always means C order with a
//! unit innermost stride.

use crate::merge_error::MergeError;

/// One axis of a strided layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Axis {
    /// Number of positions along the axis.
    pub extent: usize,
    /// Element step between neighbouring positions.
    pub stride: isize,
}

/// Dense C-order strides for `shape`.
pub fn dense_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![0isize; shape.len()];
    let mut acc = 1isize;
    for (s, &e) in strides.iter_mut().zip(shape).rev() {
        *s = acc;
        acc = acc.saturating_mul(e.max(1) as isize);
    }
    strides
}

/// Whether `(shape, strides)` describes one unbroken C-ordered run.
///
/// Singleton axes are ignored since their stride is never applied; an
/// empty layout is trivially contiguous.
pub fn is_c_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    if shape.iter().any(|&e| e == 0) {
        return true;
    }
    let mut expected = 1isize;
    for (&e, &s) in shape.iter().zip(strides).rev() {
        if e == 1 {
            continue;
        }
        if s != expected {
            return false;
        }
        expected = expected.saturating_mul(e as isize);
    }
    true
}

/// Axes ordered from the largest |stride| (outermost) to the smallest
/// (innermost). Ties keep their natural order.
pub fn stride_order(strides: &[isize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..strides.len()).collect();
    order.sort_by_key(|&ax| std::cmp::Reverse(strides[ax].unsigned_abs()));
    order
}

/// Checks that every element reachable from `offset` lies in `0..len`.
pub(crate) fn check_reach(
    len: usize,
    shape: &[usize],
    strides: &[isize],
    offset: usize,
) -> Result<(), MergeError> {
    if shape.len() != strides.len() {
        return Err(MergeError::InvalidView(format!(
            "rank of shape {shape:?} does not match strides {strides:?}"
        )));
    }
    if shape.iter().any(|&e| e == 0) {
        return Ok(());
    }
    let mut lo = offset as i128;
    let mut hi = offset as i128;
    for (&e, &s) in shape.iter().zip(strides) {
        let span = (e as i128 - 1) * s as i128;
        if span < 0 {
            lo += span;
        } else {
            hi += span;
        }
    }
    if lo < 0 || hi >= len as i128 {
        return Err(MergeError::InvalidView(format!(
            "shape {shape:?} with strides {strides:?} at offset {offset} reaches \
             [{lo}, {hi}] outside a buffer of length {len}"
        )));
    }
    Ok(())
}

/// Validates that `perm` is a permutation of `0..rank`.
pub(crate) fn check_permutation(perm: &[usize], rank: usize) -> Result<(), MergeError> {
    let mut seen = vec![false; rank];
    if perm.len() != rank {
        return Err(MergeError::InvalidView(format!(
            "axis permutation {perm:?} has wrong length for rank {rank}"
        )));
    }
    for &ax in perm {
        match seen.get_mut(ax) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(MergeError::InvalidView(format!(
                    "{perm:?} is not a permutation of 0..{rank}"
                )));
            }
        }
    }
    Ok(())
}
