//! Stride-ordered descent: the recursive walker with axes sorted so the
//! innermost loop runs along the left pixel view's smallest stride.

use crate::algs::boundary::Boundary;
use crate::algs::predicate::Unifier;
use crate::algs::recursive;
use crate::data::label::Label;
use crate::union_find::UnionSink;

pub(crate) fn merge<T, L, U>(b: &Boundary<'_, '_, T, L>, unifier: &mut Unifier<'_, '_, '_, L, U>)
where
    T: Copy + PartialEq,
    L: Label,
    U: UnionSink<L> + ?Sized,
{
    let order = b.left.stride_order();
    log::trace!("stride-ordered descent over axes {order:?} of shape {:?}", b.shape());
    recursive::walk(b, &recursive::levels(b, &order), unifier);
}
