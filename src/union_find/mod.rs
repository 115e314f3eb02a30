//! Union-find collaborator contract.
//!
//! The boundary merge only ever issues unions, so the traversals are generic
//! over [`UnionSink`]. Queries go through [`UnionFind`]. The crate ships a
//! reference implementation, [`UnionFindArray`], and [`PairBuffer`], which
//! records unions for later replay (used by the parallel face merge).

pub mod array;
pub mod buffer;

pub use array::UnionFindArray;
pub use buffer::PairBuffer;

/// Receiver of equivalences between global indices.
pub trait UnionSink<L> {
    /// Merge the classes of `a` and `b`. Order-insensitive.
    fn make_union(&mut self, a: L, b: L);
}

/// Disjoint-set structure over global indices.
pub trait UnionFind<L>: UnionSink<L> {
    /// Canonical representative of the class of `a`.
    fn find(&mut self, a: L) -> L;
}

impl<L, U: UnionSink<L> + ?Sized> UnionSink<L> for &mut U {
    #[inline]
    fn make_union(&mut self, a: L, b: L) {
        (**self).make_union(a, b);
    }
}

impl<L, U: UnionFind<L> + ?Sized> UnionFind<L> for &mut U {
    #[inline]
    fn find(&mut self, a: L) -> L {
        (**self).find(a)
    }
}
