//! Generic N-dimensional descent.
//!
//! The four views are described by one list of levels, each holding the
//! shared extent of an axis and the four operands' strides along it. The
//! walker peels one level per recursion step and advances four cursors by
//! their strides; the last level is scanned as a row. This is the reference
//! traversal every other strategy is checked against.

use crate::algs::boundary::Boundary;
use crate::algs::predicate::Unifier;
use crate::data::label::Label;
use crate::union_find::UnionSink;

/// One axis of the joint traversal: extent plus per-operand strides in the
/// order left pixels, right pixels, left labels, right labels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Level {
    pub(crate) extent: usize,
    pub(crate) strides: [isize; 4],
}

/// Levels for visiting the boundary's axes in `order` (outermost first).
pub(crate) fn levels<T: Copy, L: Label>(
    b: &Boundary<'_, '_, T, L>,
    order: &[usize],
) -> Vec<Level> {
    let strides = [
        b.left.strides(),
        b.right.strides(),
        b.left_labels.strides(),
        b.right_labels.strides(),
    ];
    order
        .iter()
        .map(|&ax| Level {
            extent: b.shape()[ax],
            strides: strides.map(|s| s[ax]),
        })
        .collect()
}

/// Visits every coordinate in natural axis order.
pub(crate) fn merge<T, L, U>(b: &Boundary<'_, '_, T, L>, unifier: &mut Unifier<'_, '_, '_, L, U>)
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let order: Vec<usize> = (0..b.shape().len()).collect();
    walk(b, &levels(b, &order), unifier);
}

/// Visits every coordinate, descending through `levels` outermost first.
pub(crate) fn walk<T, L, U>(
    b: &Boundary<'_, '_, T, L>,
    levels: &[Level],
    unifier: &mut Unifier<'_, '_, '_, L, U>,
) where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    if b.is_empty() {
        return;
    }
    let ops = Operands::of(b);
    descend(&ops, levels, ops.base, unifier);
}

struct Operands<'a, T, L> {
    left: &'a [T],
    right: &'a [T],
    left_labels: &'a [L],
    right_labels: &'a [L],
    base: [isize; 4],
}

impl<'a, T: Copy, L: Label> Operands<'a, T, L> {
    fn of(b: &Boundary<'_, 'a, T, L>) -> Self {
        let (left, p0) = b.left.raw_parts();
        let (right, p1) = b.right.raw_parts();
        let (left_labels, p2) = b.left_labels.raw_parts();
        let (right_labels, p3) = b.right_labels.raw_parts();
        Self {
            left,
            right,
            left_labels,
            right_labels,
            base: [p0, p1, p2, p3],
        }
    }

    #[inline(always)]
    fn visit<U>(&self, pos: [isize; 4], unifier: &mut Unifier<'_, '_, '_, L, U>)
    where
        T: PartialEq,
        U: UnionSink<L> + ?Sized,
    {
        unifier.visit(
            self.left[pos[0] as usize],
            self.right[pos[1] as usize],
            self.left_labels[pos[2] as usize],
            self.right_labels[pos[3] as usize],
        );
    }
}

#[inline(always)]
fn step(pos: &mut [isize; 4], strides: &[isize; 4]) {
    for (p, s) in pos.iter_mut().zip(strides) {
        *p += s;
    }
}

fn descend<T, L, U>(
    ops: &Operands<'_, T, L>,
    levels: &[Level],
    mut pos: [isize; 4],
    unifier: &mut Unifier<'_, '_, '_, L, U>,
) where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    match levels {
        [] => ops.visit(pos, unifier),
        // Cursors only move between visits, never past the last position.
        [row] => {
            for i in 0..row.extent {
                if i > 0 {
                    step(&mut pos, &row.strides);
                }
                ops.visit(pos, unifier);
            }
        }
        [outer, rest @ ..] => {
            for i in 0..outer.extent {
                if i > 0 {
                    step(&mut pos, &outer.strides);
                }
                descend(ops, rest, pos, unifier);
            }
        }
    }
}
