//! Boundary: the six operands of one seam, checked once.
//!
//! Constructing a [`Boundary`] runs every precondition that does not depend
//! on the chosen strategy (shape agreement and label-map coverage). The
//! strategies take a `&Boundary` and can therefore index without further
//! checks.

use crate::data::label::Label;
use crate::data::label_map::LabelMap;
use crate::data::view::BlockView;
use crate::merge_error::{MergeError, Operand, ShapeCheck, Side};

/// Validated operands of one boundary merge.
#[derive(Clone, Debug)]
pub struct Boundary<'v, 'a, T, L> {
    pub(crate) left: &'v BlockView<'a, T>,
    pub(crate) right: &'v BlockView<'a, T>,
    pub(crate) left_labels: &'v BlockView<'a, L>,
    pub(crate) right_labels: &'v BlockView<'a, L>,
    pub(crate) left_map: &'v LabelMap<'a, L>,
    pub(crate) right_map: &'v LabelMap<'a, L>,
}

impl<'v, 'a, T: Copy, L: Label> Boundary<'v, 'a, T, L> {
    /// Checks shape agreement and that both maps cover their labels.
    ///
    /// # Errors
    /// - `ShapeMismatch` naming the first failing pair,
    /// - `IndexOutOfRange` for the largest offending label of a side.
    pub fn new(
        left: &'v BlockView<'a, T>,
        right: &'v BlockView<'a, T>,
        left_labels: &'v BlockView<'a, L>,
        right_labels: &'v BlockView<'a, L>,
        left_map: &'v LabelMap<'a, L>,
        right_map: &'v LabelMap<'a, L>,
    ) -> Result<Self, MergeError> {
        check_shapes(left.shape(), right.shape(), ShapeCheck::Pixels)?;
        check_shapes(left_labels.shape(), right_labels.shape(), ShapeCheck::Labels)?;
        check_shapes(left_labels.shape(), left.shape(), ShapeCheck::LabelsVsPixels)?;
        if let Some(max) = max_label(left_labels) {
            left_map.check(max, Side::Left)?;
        }
        if let Some(max) = max_label(right_labels) {
            right_map.check(max, Side::Right)?;
        }
        Ok(Self {
            left,
            right,
            left_labels,
            right_labels,
            left_map,
            right_map,
        })
    }

    /// Shared shape of the four views.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.left.shape()
    }

    /// Number of coordinates on the seam.
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the seam has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// `Ok` if all six operands are single contiguous runs; otherwise the
    /// first operand that is not.
    pub fn check_contiguous(&self) -> Result<(), MergeError> {
        let runs = [
            (self.left.is_contiguous(), Operand::LeftPixels),
            (self.right.is_contiguous(), Operand::RightPixels),
            (self.left_labels.is_contiguous(), Operand::LeftLabels),
            (self.right_labels.is_contiguous(), Operand::RightLabels),
            (self.left_map.view().is_contiguous(), Operand::LeftMap),
            (self.right_map.view().is_contiguous(), Operand::RightMap),
        ];
        match runs.iter().find(|(ok, _)| !ok) {
            Some(&(_, operand)) => Err(MergeError::LayoutMismatch { operand }),
            None => Ok(()),
        }
    }
}

fn check_shapes(lhs: &[usize], rhs: &[usize], check: ShapeCheck) -> Result<(), MergeError> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(MergeError::ShapeMismatch {
            check,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        })
    }
}

/// Largest label in a view, `None` when empty.
fn max_label<L: Label>(labels: &BlockView<'_, L>) -> Option<L> {
    match labels.as_contiguous_slice() {
        Some(run) => run.iter().copied().max(),
        None => labels.iter().max(),
    }
}
