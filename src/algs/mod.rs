//! Boundary-merge algorithms.
#![warn(missing_docs)]

pub mod boundary;
pub mod coupled;
pub mod faces;
mod flat;
pub mod merge;
pub mod predicate;
mod recursive;
mod stride_order;

pub use boundary::Boundary;
pub use coupled::CoupledIter;
#[cfg(feature = "rayon")]
pub use faces::merge_faces_par;
pub use faces::{BoundaryFace, merge_faces, merge_faces_locked};
pub use merge::{MergeOptions, Strategy, merge_boundary, merge_boundary_with, merge_validated};
pub use predicate::BoundaryRule;
