//! LabelMap: block-local label → global union-find index.
//!
//! A label map is a rank-1 [`BlockView`], so it may itself be strided (for
//! example a column of a larger table). Lookups are only issued after the
//! merge entry points have checked every label against [`LabelMap::len`].

use crate::data::label::Label;
use crate::data::view::BlockView;
use crate::merge_error::{MergeError, Side};

/// Read-only translation table for one side of a seam.
#[derive(Clone, Debug)]
pub struct LabelMap<'a, L> {
    view: BlockView<'a, L>,
}

impl<'a, L: Label> LabelMap<'a, L> {
    /// Dense map over a slice.
    pub fn new(map: &'a [L]) -> Self {
        Self {
            view: BlockView::from_row(map),
        }
    }

    /// Map over an arbitrary one-dimensional view.
    ///
    /// # Errors
    /// `MapRank` if `view` is not one-dimensional.
    pub fn from_view(view: BlockView<'a, L>) -> Result<Self, MergeError> {
        if view.ndim() != 1 {
            return Err(MergeError::MapRank(view.ndim()));
        }
        Ok(Self { view })
    }

    /// Number of entries; every label on this side must be `< len()`.
    #[inline]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Whether the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Global index of `label`, or `None` if out of range.
    pub fn get(&self, label: L) -> Option<L> {
        self.view.get(&[label.index()])
    }

    /// Underlying one-dimensional view.
    #[inline]
    pub fn view(&self) -> &BlockView<'a, L> {
        &self.view
    }

    /// Entries as a plain slice, if the map is contiguous.
    #[inline]
    pub fn as_contiguous_slice(&self) -> Option<&'a [L]> {
        self.view.as_contiguous_slice()
    }

    /// Lookup for a label already checked against `len()`.
    #[inline(always)]
    pub(crate) fn at(&self, label: L) -> L {
        let (data, base) = self.view.raw_parts();
        data[(base + label.index() as isize * self.view.strides()[0]) as usize]
    }

    /// Checks that `label` can be looked up.
    pub(crate) fn check(&self, label: L, side: Side) -> Result<(), MergeError> {
        if label.index() < self.len() {
            Ok(())
        } else {
            Err(MergeError::IndexOutOfRange {
                side,
                label: label.widen(),
                len: self.len(),
            })
        }
    }
}

impl<'a, L: Label> From<&'a [L]> for LabelMap<'a, L> {
    fn from(map: &'a [L]) -> Self {
        Self::new(map)
    }
}
