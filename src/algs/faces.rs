//! Batches of boundary faces.
//!
//! A blockwise labeling produces one seam per pair of touching blocks. This
//! module bundles the operands of one seam into a [`BoundaryFace`], cuts the
//! touching hyperplanes out of whole blocks, and merges many faces at once.
//! Every batch function validates all faces before issuing the first union.

use parking_lot::Mutex;

use crate::algs::boundary::Boundary;
use crate::algs::merge::{self, MergeOptions, Strategy};
use crate::data::label::Label;
use crate::data::label_map::LabelMap;
use crate::data::view::BlockView;
use crate::merge_error::MergeError;
use crate::union_find::UnionSink;

/// Owned operand bundle for one seam.
#[derive(Clone, Debug)]
pub struct BoundaryFace<'a, T, L> {
    /// Pixels on the left side of the seam.
    pub left: BlockView<'a, T>,
    /// Pixels on the right side, same shape as `left`.
    pub right: BlockView<'a, T>,
    /// Block-local labels of `left`.
    pub left_labels: BlockView<'a, L>,
    /// Block-local labels of `right`.
    pub right_labels: BlockView<'a, L>,
    /// Left local label to global index.
    pub left_map: LabelMap<'a, L>,
    /// Right local label to global index.
    pub right_map: LabelMap<'a, L>,
}

impl<'a, T: Copy, L: Label> BoundaryFace<'a, T, L> {
    /// Face between two whole blocks that touch along `axis`, `left_block`
    /// preceding `right_block`: the last hyperplane of the left block is
    /// paired with the first hyperplane of the right block.
    ///
    /// # Errors
    /// `InvalidView` if `axis` is out of range or either block is empty
    /// along it. Shapes are checked later, when the face is merged.
    pub fn between(
        left_block: &BlockView<'a, T>,
        right_block: &BlockView<'a, T>,
        left_labels: &BlockView<'a, L>,
        right_labels: &BlockView<'a, L>,
        left_map: LabelMap<'a, L>,
        right_map: LabelMap<'a, L>,
        axis: usize,
    ) -> Result<Self, MergeError> {
        let last = |extent: Option<&usize>| {
            extent.and_then(|e| e.checked_sub(1)).ok_or_else(|| {
                MergeError::InvalidView(format!("block is empty along axis {axis}"))
            })
        };
        let l_idx = last(left_block.shape().get(axis))?;
        let ll_idx = last(left_labels.shape().get(axis))?;
        Ok(Self {
            left: left_block.bind_at(axis, l_idx)?,
            right: right_block.bind_at(axis, 0)?,
            left_labels: left_labels.bind_at(axis, ll_idx)?,
            right_labels: right_labels.bind_at(axis, 0)?,
            left_map,
            right_map,
        })
    }

    /// Validated view of this face's operands.
    pub fn boundary(&self) -> Result<Boundary<'_, 'a, T, L>, MergeError> {
        Boundary::new(
            &self.left,
            &self.right,
            &self.left_labels,
            &self.right_labels,
            &self.left_map,
            &self.right_map,
        )
    }
}

/// Validates every face, including the flat layout when it is forced.
fn validate_all<'f, 'a, T: Copy, L: Label>(
    faces: &'f [BoundaryFace<'a, T, L>],
    opts: &MergeOptions,
) -> Result<Vec<Boundary<'f, 'a, T, L>>, MergeError> {
    faces
        .iter()
        .map(|face| {
            let b = face.boundary()?;
            if opts.strategy == Strategy::Flat {
                b.check_contiguous()?;
            }
            Ok(b)
        })
        .collect()
}

/// Merges every face into `uf`, in order.
///
/// # Errors
/// The first precondition failure of any face; `uf` is untouched then.
pub fn merge_faces<T, L, U>(
    faces: &[BoundaryFace<'_, T, L>],
    uf: &mut U,
    opts: &MergeOptions,
) -> Result<(), MergeError>
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let boundaries = validate_all(faces, opts)?;
    log::debug!("merging {} boundary faces", boundaries.len());
    for b in &boundaries {
        merge::merge_validated(b, opts, uf)?;
    }
    Ok(())
}

/// Like [`merge_faces`] for a union-find shared behind a mutex.
///
/// Validation runs without the lock; the lock is held for one face at a
/// time, so other threads can interleave their own faces.
pub fn merge_faces_locked<T, L, U>(
    faces: &[BoundaryFace<'_, T, L>],
    uf: &Mutex<U>,
    opts: &MergeOptions,
) -> Result<(), MergeError>
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L>,
{
    let boundaries = validate_all(faces, opts)?;
    for b in &boundaries {
        let mut guard = uf.lock();
        merge::merge_validated(b, opts, &mut *guard)?;
    }
    Ok(())
}

/// Parallel [`merge_faces`]: faces are scanned concurrently into
/// [`PairBuffer`](crate::union_find::PairBuffer)s, which are then replayed
/// into `uf` in face order on the calling thread.
#[cfg(feature = "rayon")]
pub fn merge_faces_par<T, L, U>(
    faces: &[BoundaryFace<'_, T, L>],
    uf: &mut U,
    opts: &MergeOptions,
) -> Result<(), MergeError>
where
    T: Copy + PartialEq + Sync,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    use crate::union_find::PairBuffer;
    use rayon::prelude::*;

    let boundaries = validate_all(faces, opts)?;
    log::debug!("scanning {} boundary faces in parallel", boundaries.len());
    let buffers = boundaries
        .par_iter()
        .map(|b| {
            let mut buf = PairBuffer::new();
            merge::merge_validated(b, opts, &mut buf)?;
            Ok(buf)
        })
        .collect::<Result<Vec<_>, MergeError>>()?;
    for buf in &buffers {
        buf.apply(uf);
    }
    Ok(())
}
