//! Boundary merge entry points and strategy dispatch.
//!
//! [`merge_boundary`] is the one call orchestration code needs: it checks
//! every precondition, then picks the flat fast path when all operands are
//! contiguous and the stride-ordered descent otherwise. [`merge_boundary_with`]
//! pins a strategy or the boundary rule explicitly.

use serde::{Deserialize, Serialize};

use crate::algs::boundary::Boundary;
use crate::algs::predicate::{BoundaryRule, Unifier};
use crate::algs::{coupled, flat, recursive, stride_order};
use crate::data::label::Label;
use crate::data::label_map::LabelMap;
use crate::data::view::BlockView;
use crate::merge_error::MergeError;
use crate::union_find::UnionSink;

/// Traversal strategy. Every strategy produces the same equivalence classes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `Flat` when every operand is contiguous, `StrideOrdered` otherwise.
    #[default]
    Auto,
    /// Recursive descent in natural axis order.
    Recursive,
    /// Recursive descent with axes sorted by the left view's strides.
    StrideOrdered,
    /// Lock-step [`CoupledIter`](crate::algs::coupled::CoupledIter).
    Coupled,
    /// Linear scan; fails with `LayoutMismatch` on non-contiguous input.
    Flat,
}

/// Per-call merge configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Traversal to run; `Auto` by default.
    pub strategy: Strategy,
    /// Which labels must be foreground; `BothLabeled` by default.
    pub rule: BoundaryRule,
}

impl MergeOptions {
    /// Same options with `strategy` replaced.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Same options with `rule` replaced.
    pub fn with_rule(mut self, rule: BoundaryRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Merges the labels of two adjacent blocks across their shared boundary.
///
/// For every coordinate where `left == right` and both labels are non-zero,
/// `uf.make_union(left_map[left_label], right_map[right_label])` is issued.
///
/// # Errors
/// `ShapeMismatch` or `IndexOutOfRange`; in both cases `uf` is untouched.
///
/// # Example
/// ```rust
/// # fn try_main() -> Result<(), lazycc::merge_error::MergeError> {
/// use lazycc::prelude::*;
/// let (left, right) = ([0u8, 0, 1, 3], [0u8, 0, 2, 3]);
/// let labels = [0u32, 1, 2, 3];
/// let (lmap, rmap) = ([0u32, 1, 2, 3], [0u32, 5, 6, 7]);
/// let l = BlockView::from_slice(&left, &[4])?;
/// let r = BlockView::from_slice(&right, &[4])?;
/// let ll = BlockView::from_slice(&labels, &[4])?;
/// let mut uf = UnionFindArray::new(8u32);
/// merge_boundary(&l, &r, &ll, &ll, &LabelMap::new(&lmap), &LabelMap::new(&rmap), &mut uf)?;
/// assert_eq!(uf.find(5), uf.find(1));
/// assert_ne!(uf.find(6), uf.find(2));
/// # Ok(())
/// # }
/// # try_main().unwrap();
/// ```
pub fn merge_boundary<T, L, U>(
    left: &BlockView<'_, T>,
    right: &BlockView<'_, T>,
    left_labels: &BlockView<'_, L>,
    right_labels: &BlockView<'_, L>,
    left_map: &LabelMap<'_, L>,
    right_map: &LabelMap<'_, L>,
    uf: &mut U,
) -> Result<(), MergeError>
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let boundary = Boundary::new(left, right, left_labels, right_labels, left_map, right_map)?;
    merge_validated(&boundary, &MergeOptions::default(), uf)
}

/// [`merge_boundary`] with an explicit strategy and boundary rule.
///
/// # Errors
/// As [`merge_boundary`], plus `LayoutMismatch` when `Strategy::Flat` is
/// requested for operands that are not contiguous.
#[allow(clippy::too_many_arguments)]
pub fn merge_boundary_with<T, L, U>(
    left: &BlockView<'_, T>,
    right: &BlockView<'_, T>,
    left_labels: &BlockView<'_, L>,
    right_labels: &BlockView<'_, L>,
    left_map: &LabelMap<'_, L>,
    right_map: &LabelMap<'_, L>,
    uf: &mut U,
    opts: &MergeOptions,
) -> Result<(), MergeError>
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let boundary = Boundary::new(left, right, left_labels, right_labels, left_map, right_map)?;
    merge_validated(&boundary, opts, uf)
}

/// Runs the configured strategy on an already validated boundary.
///
/// # Errors
/// Only `LayoutMismatch`, for a forced `Strategy::Flat`.
pub fn merge_validated<T, L, U>(
    boundary: &Boundary<'_, '_, T, L>,
    opts: &MergeOptions,
    uf: &mut U,
) -> Result<(), MergeError>
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let strategy = resolve(boundary, opts.strategy)?;
    log::debug!(
        "merging boundary of shape {:?} with {strategy:?} ({:?})",
        boundary.shape(),
        opts.rule
    );
    let unions = match strategy {
        Strategy::Flat => flat::merge(boundary, opts.rule, uf)?,
        Strategy::Recursive | Strategy::StrideOrdered | Strategy::Coupled | Strategy::Auto => {
            let mut unifier =
                Unifier::new(boundary.left_map, boundary.right_map, opts.rule, uf);
            match strategy {
                Strategy::Recursive => recursive::merge(boundary, &mut unifier),
                Strategy::Coupled => coupled::merge(boundary, &mut unifier),
                _ => stride_order::merge(boundary, &mut unifier),
            }
            unifier.unions()
        }
    };
    log::trace!("{unions} unions over {} coordinates", boundary.len());
    Ok(())
}

/// Resolves `Auto` and verifies the flat path's layout requirement.
pub(crate) fn resolve<T: Copy, L: Label>(
    boundary: &Boundary<'_, '_, T, L>,
    requested: Strategy,
) -> Result<Strategy, MergeError> {
    match requested {
        Strategy::Auto => Ok(if boundary.check_contiguous().is_ok() {
            Strategy::Flat
        } else {
            Strategy::StrideOrdered
        }),
        Strategy::Flat => boundary.check_contiguous().map(|()| Strategy::Flat),
        other => Ok(other),
    }
}
