//! UnionFindArray: dense disjoint-set forest over global label indices.
//!
//! Layout follows the classic connected-components bookkeeping: the array
//! always holds one provisional tail slot whose index is the next free
//! label. [`UnionFindArray::finalize_index`] either commits that slot (it
//! became a new component) or resets it (it was merged into an older one).
//!
//! Roots are always the smallest index of their class, so the result of
//! any sequence of unions is independent of argument order.

use serde::{Deserialize, Serialize};

use crate::data::label::Label;
use crate::debug_invariants::DebugInvariants;
use crate::merge_error::MergeError;
use crate::union_find::{UnionFind, UnionSink};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Slot<L> {
    /// Root of a class, carrying the class label.
    Anchor(L),
    /// Non-root; parent index is strictly smaller.
    Link(usize),
}

/// Union-find over indices `0..next_free_index()`.
///
/// # Example
/// ```rust
/// use lazycc::union_find::UnionFindArray;
/// let mut uf = UnionFindArray::new(8u32);
/// uf.make_union(5, 1);
/// uf.make_union(7, 3);
/// assert_eq!(uf.find_label(5), 1);
/// assert_eq!(uf.find_label(7), 3);
/// assert_eq!(uf.make_contiguous(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionFindArray<L> {
    slots: Vec<Slot<L>>,
}

impl<L: Label> UnionFindArray<L> {
    /// Every index `0..next_free` starts as its own class; `next_free` is
    /// the provisional tail.
    pub fn new(next_free: L) -> Self {
        let n = next_free.index();
        let slots = (0..=n)
            .map(|i| Slot::Anchor(L::from_index(i).unwrap_or(next_free)))
            .collect();
        Self { slots }
    }

    /// Number of committed indices (excludes the provisional tail).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index the next new component would receive.
    #[inline]
    pub fn next_free_index(&self) -> L {
        L::from_index(self.len()).unwrap_or_else(L::max_value)
    }

    /// Root index of the class containing `a`, compressing the path.
    ///
    /// # Panics
    /// Panics if `a` is not below `next_free_index() + 1`.
    pub fn find_index(&mut self, a: L) -> L {
        let root = self.root(a.index());
        L::from_index(root).unwrap_or(a)
    }

    /// Label of the class containing `a`.
    ///
    /// Equal to [`find_index`](Self::find_index) until
    /// [`make_contiguous`](Self::make_contiguous) renumbers the classes.
    pub fn find_label(&mut self, a: L) -> L {
        let root = self.root(a.index());
        match self.slots[root] {
            Slot::Anchor(label) => label,
            Slot::Link(_) => a,
        }
    }

    /// Merges the classes of `a` and `b`; returns the resulting root index.
    pub fn make_union(&mut self, a: L, b: L) -> L {
        let ra = self.root(a.index());
        let rb = self.root(b.index());
        let (keep, drop) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        if keep != drop {
            self.slots[drop] = Slot::Link(keep);
        }
        L::from_index(keep).unwrap_or(a)
    }

    /// Commits a fresh index and returns it.
    ///
    /// # Errors
    /// `LabelOverflow` if the label type cannot represent another index.
    pub fn make_new_index(&mut self) -> Result<L, MergeError> {
        let next = self.next_free_index();
        self.finalize_index(next)
    }

    /// Closes the labeling of one element whose provisional index is `index`.
    ///
    /// If `index` is the provisional tail it becomes a new class and a new
    /// tail is appended; otherwise the tail is reset for reuse.
    ///
    /// # Errors
    /// `LabelOverflow` if a new tail index would not fit into `L`.
    pub fn finalize_index(&mut self, index: L) -> Result<L, MergeError> {
        let tail = self.len();
        if index.index() == tail {
            let new_tail = L::from_index(tail + 1).ok_or(MergeError::LabelOverflow)?;
            self.slots.push(Slot::Anchor(new_tail));
        } else {
            let label = L::from_index(tail).ok_or(MergeError::LabelOverflow)?;
            self.slots[tail] = Slot::Anchor(label);
        }
        Ok(index)
    }

    /// Reserves global indices for labels `1..=max_label` of one block.
    ///
    /// The returned table maps local label `i` to its global index and keeps
    /// background `0` at `0`. Nothing is reserved on error.
    ///
    /// # Errors
    /// `LabelOverflow` if the reservation would not fit into `L`.
    pub fn allocate_map(&mut self, max_label: L) -> Result<Vec<L>, MergeError> {
        let needed = max_label.index();
        self.len()
            .checked_add(needed)
            .and_then(L::from_index)
            .ok_or(MergeError::LabelOverflow)?;
        let mut map = Vec::with_capacity(needed + 1);
        map.push(L::zero());
        for _ in 0..needed {
            map.push(self.make_new_index()?);
        }
        crate::debug_invariants!(self.validate_invariants(), "UnionFindArray::allocate_map");
        Ok(map)
    }

    /// Renumbers class labels to `0, 1, 2, ...` in index order and returns
    /// the largest label handed out.
    ///
    /// Index `0` is its own class unless merged, so with background at `0`
    /// the return value is the number of foreground components.
    pub fn make_contiguous(&mut self) -> L {
        let mut count = 0usize;
        for i in 0..self.len() {
            match self.slots[i] {
                Slot::Anchor(_) => {
                    self.slots[i] = Slot::Anchor(L::from_index(count).unwrap_or_else(L::max_value));
                    count += 1;
                }
                Slot::Link(_) => {
                    let root = self.root(i);
                    self.slots[i] = Slot::Link(root);
                }
            }
        }
        crate::debug_invariants!(self.validate_invariants(), "UnionFindArray::make_contiguous");
        L::from_index(count.saturating_sub(1)).unwrap_or_else(L::max_value)
    }

    fn root(&mut self, idx: usize) -> usize {
        let mut root = idx;
        while let Slot::Link(parent) = self.slots[root] {
            root = parent;
        }
        // Path compression
        let mut cur = idx;
        while let Slot::Link(parent) = self.slots[cur] {
            self.slots[cur] = Slot::Link(root);
            cur = parent;
        }
        root
    }
}

impl<L: Label> UnionSink<L> for UnionFindArray<L> {
    #[inline]
    fn make_union(&mut self, a: L, b: L) {
        UnionFindArray::make_union(self, a, b);
    }
}

impl<L: Label> UnionFind<L> for UnionFindArray<L> {
    #[inline]
    fn find(&mut self, a: L) -> L {
        self.find_label(a)
    }
}

impl<L: Label> DebugInvariants for UnionFindArray<L> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "UnionFindArray");
    }

    fn validate_invariants(&self) -> Result<(), MergeError> {
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Link(parent) = *slot {
                if parent >= index {
                    return Err(MergeError::CorruptUnionFind {
                        index,
                        reason: "link does not point to a smaller index",
                    });
                }
            }
        }
        match self.slots.last() {
            Some(Slot::Anchor(_)) => Ok(()),
            _ => Err(MergeError::CorruptUnionFind {
                index: self.len(),
                reason: "provisional tail is not an anchor",
            }),
        }
    }
}
