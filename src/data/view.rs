//! BlockView: borrowed, strided N-dimensional window onto one block.
//!
//! A view is a slice plus `(shape, strides, offset)` metadata. Transpose,
//! axis flips, sub-ranges and hyperplane extraction only rewrite metadata;
//! no element is ever copied. Every constructor checks that the reachable
//! elements stay inside the borrowed slice, so traversals can index the
//! slice directly.

use std::fmt;
use std::ops::Range;

use crate::data::layout::{self, Axis};
use crate::debug_invariants::DebugInvariants;
use crate::merge_error::MergeError;

/// Immutable strided view into block data.
///
/// # Invariants
///
/// - `shape.len() == strides.len()`.
/// - Every element reachable through `(shape, strides)` from `offset` is a
///   valid index into `data`.
///
/// # Example
/// ```rust
/// # fn try_main() -> Result<(), lazycc::merge_error::MergeError> {
/// use lazycc::data::view::BlockView;
/// let raw = [1u8, 2, 3, 4, 5, 6];
/// let v = BlockView::from_slice(&raw, &[2, 3])?;
/// let t = v.t();
/// assert_eq!(t.shape(), &[3, 2]);
/// assert_eq!(t.get(&[2, 0]), Some(3));
/// assert!(v.is_contiguous() && !t.is_contiguous());
/// # Ok(())
/// # }
/// # try_main().unwrap();
/// ```
pub struct BlockView<'a, T> {
    data: &'a [T],
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
}

static_assertions::assert_impl_all!(BlockView<'static, f32>: Send, Sync);

impl<T> Clone for BlockView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<T> fmt::Debug for BlockView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockView")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("buffer_len", &self.data.len())
            .finish()
    }
}

impl<'a, T: Copy> BlockView<'a, T> {
    /// Dense C-order view of `data` with the given `shape`.
    ///
    /// # Errors
    /// `InvalidView` if `data.len()` differs from the element count of `shape`.
    pub fn from_slice(data: &'a [T], shape: &[usize]) -> Result<Self, MergeError> {
        let count: usize = shape.iter().product();
        if count != data.len() {
            return Err(MergeError::InvalidView(format!(
                "shape {shape:?} needs {count} elements, buffer has {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: layout::dense_strides(shape),
            offset: 0,
        })
    }

    /// Dense one-dimensional view over the whole slice.
    pub fn from_row(data: &'a [T]) -> Self {
        Self {
            data,
            shape: vec![data.len()],
            strides: vec![1],
            offset: 0,
        }
    }

    /// View with explicit element strides and starting offset.
    ///
    /// # Errors
    /// `InvalidView` if the ranks disagree or any reachable element falls
    /// outside `data`.
    pub fn from_parts(
        data: &'a [T],
        shape: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self, MergeError> {
        layout::check_reach(data.len(), shape, strides, offset)?;
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            offset,
        })
    }

    /// Extent of every axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides in elements (signed; negative = reversed axis).
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether any axis has extent zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at a multi-index, or `None` if out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<T> {
        if index.len() != self.ndim() {
            return None;
        }
        let mut pos = self.offset as isize;
        for ((&i, &e), &s) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= e {
                return None;
            }
            pos += i as isize * s;
        }
        self.data.get(pos as usize).copied()
    }

    /// Whether the view is one C-ordered run with unit innermost stride.
    pub fn is_contiguous(&self) -> bool {
        layout::is_c_contiguous(&self.shape, &self.strides)
    }

    /// The elements as one linear slice, in C order, if contiguous.
    pub fn as_contiguous_slice(&self) -> Option<&'a [T]> {
        if !self.is_contiguous() {
            return None;
        }
        if self.is_empty() {
            return Some(&[]);
        }
        self.data.get(self.offset..self.offset + self.len())
    }

    /// `(extent, stride)` descriptor of every axis.
    pub fn axes(&self) -> Vec<Axis> {
        self.shape
            .iter()
            .zip(&self.strides)
            .map(|(&extent, &stride)| Axis { extent, stride })
            .collect()
    }

    /// Axis visiting order that follows memory: outermost (largest
    /// |stride|) first, innermost last.
    pub fn stride_order(&self) -> Vec<usize> {
        layout::stride_order(&self.strides)
    }

    /// Reorders axes; axis `i` of the result is axis `perm[i]` of `self`.
    pub fn permuted_axes(&self, perm: &[usize]) -> Result<Self, MergeError> {
        layout::check_permutation(perm, self.ndim())?;
        Ok(Self {
            data: self.data,
            shape: perm.iter().map(|&ax| self.shape[ax]).collect(),
            strides: perm.iter().map(|&ax| self.strides[ax]).collect(),
            offset: self.offset,
        })
    }

    /// Reverses all axes.
    pub fn t(&self) -> Self {
        let mut out = self.clone();
        out.shape.reverse();
        out.strides.reverse();
        out
    }

    /// Walks `axis` backwards.
    pub fn flip_axis(&self, axis: usize) -> Result<Self, MergeError> {
        self.check_axis(axis)?;
        let mut out = self.clone();
        let n = self.shape[axis];
        if n > 0 {
            out.offset = (self.offset as isize + (n as isize - 1) * self.strides[axis]) as usize;
            out.strides[axis] = -self.strides[axis];
        }
        Ok(out)
    }

    /// Restricts `axis` to `range`, keeping the rank.
    pub fn slice_axis(&self, axis: usize, range: Range<usize>) -> Result<Self, MergeError> {
        self.check_axis(axis)?;
        if range.start > range.end || range.end > self.shape[axis] {
            return Err(MergeError::InvalidView(format!(
                "range {range:?} out of bounds for axis {axis} of extent {}",
                self.shape[axis]
            )));
        }
        let mut out = self.clone();
        out.shape[axis] = range.len();
        if !range.is_empty() {
            out.offset =
                (self.offset as isize + range.start as isize * self.strides[axis]) as usize;
        }
        Ok(out)
    }

    /// Hyperplane at `index` along `axis`; the result has one axis fewer.
    pub fn bind_at(&self, axis: usize, index: usize) -> Result<Self, MergeError> {
        self.check_axis(axis)?;
        if index >= self.shape[axis] {
            return Err(MergeError::InvalidView(format!(
                "index {index} out of bounds for axis {axis} of extent {}",
                self.shape[axis]
            )));
        }
        let mut out = self.clone();
        out.offset = (self.offset as isize + index as isize * self.strides[axis]) as usize;
        out.shape.remove(axis);
        out.strides.remove(axis);
        Ok(out)
    }

    /// Elements in C order of the view's axes.
    pub fn iter(&self) -> Elements<'_, 'a, T> {
        Elements {
            view: self,
            index: vec![0; self.ndim()],
            pos: self.offset as isize,
            remaining: self.len(),
        }
    }

    fn check_axis(&self, axis: usize) -> Result<(), MergeError> {
        if axis >= self.ndim() {
            return Err(MergeError::InvalidView(format!(
                "axis {axis} out of bounds for rank {}",
                self.ndim()
            )));
        }
        Ok(())
    }

    /// Borrowed buffer and the starting element offset.
    #[inline]
    pub(crate) fn raw_parts(&self) -> (&'a [T], isize) {
        (self.data, self.offset as isize)
    }
}

/// Iterator over the elements of a [`BlockView`], see [`BlockView::iter`].
#[derive(Clone, Debug)]
pub struct Elements<'v, 'a, T> {
    view: &'v BlockView<'a, T>,
    index: Vec<usize>,
    pos: isize,
    remaining: usize,
}

impl<T: Copy> Iterator for Elements<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.view.data[self.pos as usize];
        self.remaining -= 1;
        if self.remaining > 0 {
            for ax in (0..self.index.len()).rev() {
                let stride = self.view.strides[ax];
                if self.index[ax] + 1 < self.view.shape[ax] {
                    self.index[ax] += 1;
                    self.pos += stride;
                    break;
                }
                self.pos -= self.index[ax] as isize * stride;
                self.index[ax] = 0;
            }
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Copy> ExactSizeIterator for Elements<'_, '_, T> {}

impl<T> DebugInvariants for BlockView<'_, T> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "BlockView");
    }

    fn validate_invariants(&self) -> Result<(), MergeError> {
        layout::check_reach(self.data.len(), &self.shape, &self.strides, self.offset)
    }
}
