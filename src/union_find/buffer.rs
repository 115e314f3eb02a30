//! PairBuffer: records unions instead of applying them.

use crate::union_find::UnionSink;

/// Ordered log of `make_union` calls.
///
/// Consecutive duplicates are dropped; long seams through one component
/// produce the same pair over and over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairBuffer<L> {
    pairs: Vec<(L, L)>,
}

impl<L: Copy + PartialEq> PairBuffer<L> {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(L, L)] {
        &self.pairs
    }

    /// Replays every recorded union into `uf`, in recording order.
    pub fn apply<U: UnionSink<L> + ?Sized>(&self, uf: &mut U) {
        for &(a, b) in &self.pairs {
            uf.make_union(a, b);
        }
    }
}

impl<L: Copy + PartialEq> UnionSink<L> for PairBuffer<L> {
    #[inline]
    fn make_union(&mut self, a: L, b: L) {
        if self.pairs.last() != Some(&(a, b)) {
            self.pairs.push((a, b));
        }
    }
}
