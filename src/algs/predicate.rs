//! The per-coordinate merge decision.

use serde::{Deserialize, Serialize};

use crate::data::label::Label;
use crate::data::label_map::LabelMap;
use crate::union_find::UnionSink;

/// Which labels must be foreground for a matching coordinate to merge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Both labels must be non-zero.
    #[default]
    BothLabeled,
    /// Only the left label must be non-zero; a zero right label is looked up
    /// in the right map like any other label.
    LeftLabeled,
}

impl BoundaryRule {
    /// Whether a matching coordinate with these labels may merge.
    #[inline(always)]
    pub fn admits<L: Label>(self, left: L, right: L) -> bool {
        match self {
            BoundaryRule::BothLabeled => !left.is_background() && !right.is_background(),
            BoundaryRule::LeftLabeled => !left.is_background(),
        }
    }
}

/// Applies the boundary predicate and forwards matches to a union sink.
///
/// Shared by every strided traversal; the flat path inlines the same test
/// against plain slices.
pub(crate) struct Unifier<'m, 'a, 'u, L, U: ?Sized> {
    left_map: &'m LabelMap<'a, L>,
    right_map: &'m LabelMap<'a, L>,
    rule: BoundaryRule,
    uf: &'u mut U,
    unions: usize,
}

impl<'m, 'a, 'u, L: Label, U: UnionSink<L> + ?Sized> Unifier<'m, 'a, 'u, L, U> {
    pub(crate) fn new(
        left_map: &'m LabelMap<'a, L>,
        right_map: &'m LabelMap<'a, L>,
        rule: BoundaryRule,
        uf: &'u mut U,
    ) -> Self {
        Self {
            left_map,
            right_map,
            rule,
            uf,
            unions: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn visit<T: PartialEq>(&mut self, lv: T, rv: T, ll: L, rl: L) {
        if lv == rv && self.rule.admits(ll, rl) {
            self.uf
                .make_union(self.left_map.at(ll), self.right_map.at(rl));
            self.unions += 1;
        }
    }

    /// Number of unions issued so far.
    pub(crate) fn unions(&self) -> usize {
        self.unions
    }
}
