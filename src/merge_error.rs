//! MergeError: Unified error type for lazycc public APIs
//!
//! Every precondition of a boundary merge is checked before the first union
//! is issued, so an `Err` always means the union-find was left untouched.

use std::fmt;
use thiserror::Error;

/// Which pair of operands disagreed in a shape check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeCheck {
    /// `left` vs `right` pixel views.
    Pixels,
    /// `left_labels` vs `right_labels`.
    Labels,
    /// Label views vs pixel views.
    LabelsVsPixels,
}

impl fmt::Display for ShapeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShapeCheck::Pixels => "data arrays",
            ShapeCheck::Labels => "label arrays",
            ShapeCheck::LabelsVsPixels => "labels/data",
        };
        f.write_str(s)
    }
}

/// Names one of the six operands of a boundary merge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    LeftPixels,
    RightPixels,
    LeftLabels,
    RightLabels,
    LeftMap,
    RightMap,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operand::LeftPixels => "left pixels",
            Operand::RightPixels => "right pixels",
            Operand::LeftLabels => "left labels",
            Operand::RightLabels => "right labels",
            Operand::LeftMap => "left map",
            Operand::RightMap => "right map",
        };
        f.write_str(s)
    }
}

/// Side of the seam.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Unified error type for lazycc operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Two operands that must share a shape do not.
    #[error("shape mismatch between {check}: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        check: ShapeCheck,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },
    /// The flat path was requested but an operand is not one contiguous run.
    #[error("layout mismatch: {operand} is not a contiguous unit-stride run")]
    LayoutMismatch { operand: Operand },
    /// A label cannot be looked up in its side's label map.
    #[error("{side} label {label} is out of range for a label map of length {len}")]
    IndexOutOfRange { side: Side, label: u64, len: usize },
    /// A view was described with shape/strides/offset that leave its buffer.
    #[error("invalid view: {0}")]
    InvalidView(String),
    /// Label maps are one-dimensional lookup tables.
    #[error("label map must be one-dimensional, got rank {0}")]
    MapRank(usize),
    /// The union-find ran out of representable indices.
    #[error("label overflow: next index does not fit the label type")]
    LabelOverflow,
    /// A union-find structure failed its internal consistency check.
    #[error("union-find corrupted at index {index}: {reason}")]
    CorruptUnionFind { index: usize, reason: &'static str },
}
