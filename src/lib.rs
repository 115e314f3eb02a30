#![cfg_attr(docsrs, feature(doc_cfg))]
//! # lazycc
//!
//! lazycc merges the connected-component labelings of adjacent blocks of an
//! N-dimensional array. Each block is labeled on its own; this crate walks
//! the seam between two blocks and records, in a union-find structure,
//! which left and right labels belong to the same component.
//!
//! ## Features
//! - Borrowed strided views ([`data::view::BlockView`]) over any rank and
//!   memory layout, including transposed, padded and reversed axes
//! - Interchangeable traversal strategies with a contiguous fast path that
//!   is picked automatically
//! - A reference union-find ([`union_find::UnionFindArray`]) with the label
//!   bookkeeping blockwise labeling needs
//! - Batch merging of many faces, serialized behind a mutex or scanned in
//!   parallel with the `rayon` feature
//!
//! ## Preconditions
//!
//! Every merge checks shapes and label-map coverage before the first union
//! is issued. A call that returns `Err` has not touched the union-find.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! lazycc = "0.1.0"
//! # Optional features:
//! # features = ["rayon"]
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod merge_error;
pub mod union_find;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{
        BoundaryFace, BoundaryRule, CoupledIter, MergeOptions, Strategy, merge_boundary,
        merge_boundary_with, merge_faces, merge_faces_locked,
    };
    #[cfg(feature = "rayon")]
    pub use crate::algs::merge_faces_par;
    pub use crate::data::{BlockView, Label, LabelMap};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::merge_error::MergeError;
    pub use crate::union_find::{PairBuffer, UnionFind, UnionFindArray, UnionSink};
}
