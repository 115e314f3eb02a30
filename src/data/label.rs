//! `Label`: unsigned integer types usable as block-local labels and global
//! union-find indices.
//!
//! Label `0` is background. Conversions to `usize` saturate, so an id that
//! cannot be addressed on this platform is reported as out of range by the
//! map checks instead of wrapping around.

use num_traits::{NumCast, PrimInt, ToPrimitive, Unsigned, Zero};
use std::fmt::{Debug, Display};

/// Unsigned integer label type.
pub trait Label: PrimInt + Unsigned + Debug + Display + Send + Sync + 'static {
    /// Label as a table index (saturating at `usize::MAX`).
    #[inline]
    fn index(self) -> usize {
        self.to_usize().unwrap_or(usize::MAX)
    }

    /// Inverse of [`index`](Self::index); `None` if `i` does not fit.
    #[inline]
    fn from_index(i: usize) -> Option<Self> {
        <Self as NumCast>::from(i)
    }

    /// Label widened for error reporting.
    #[inline]
    fn widen(self) -> u64 {
        self.to_u64().unwrap_or(u64::MAX)
    }

    /// `true` for the reserved background label `0`.
    #[inline]
    fn is_background(self) -> bool {
        self == Self::zero()
    }
}

impl Label for u8 {}
impl Label for u16 {}
impl Label for u32 {}
impl Label for u64 {}
impl Label for usize {}
