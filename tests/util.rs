#![allow(dead_code)]
use lazycc::prelude::*;

/// Dense boundary operands with a global index space of `n_global` entries.
#[derive(Clone, Debug)]
pub struct Seam {
    pub shape: Vec<usize>,
    pub left: Vec<u8>,
    pub right: Vec<u8>,
    pub left_labels: Vec<u32>,
    pub right_labels: Vec<u32>,
    pub left_map: Vec<u32>,
    pub right_map: Vec<u32>,
}

impl Seam {
    /// Maps left labels to `0..=max_l` and right labels to the next
    /// `max_r` indices, keeping background at `0` on both sides.
    pub fn new(
        shape: &[usize],
        left: Vec<u8>,
        right: Vec<u8>,
        left_labels: Vec<u32>,
        right_labels: Vec<u32>,
    ) -> Self {
        let max_l = left_labels.iter().copied().max().unwrap_or(0);
        let max_r = right_labels.iter().copied().max().unwrap_or(0);
        let left_map: Vec<u32> = (0..=max_l).collect();
        let right_map: Vec<u32> = (0..=max_r)
            .map(|r| if r == 0 { 0 } else { max_l + r })
            .collect();
        Self {
            shape: shape.to_vec(),
            left,
            right,
            left_labels,
            right_labels,
            left_map,
            right_map,
        }
    }

    pub fn n_global(&self) -> u32 {
        self.left_map.len() as u32 + self.right_map.len() as u32
    }

    /// Merges with the given options into a fresh union-find and returns the
    /// representative of every global index.
    pub fn classes(&self, opts: &MergeOptions) -> Vec<u32> {
        let l = BlockView::from_slice(&self.left, &self.shape).unwrap();
        let r = BlockView::from_slice(&self.right, &self.shape).unwrap();
        let ll = BlockView::from_slice(&self.left_labels, &self.shape).unwrap();
        let rl = BlockView::from_slice(&self.right_labels, &self.shape).unwrap();
        classes_of_views(&l, &r, &ll, &rl, &self.left_map, &self.right_map, self.n_global(), opts)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn classes_of_views(
    l: &BlockView<'_, u8>,
    r: &BlockView<'_, u8>,
    ll: &BlockView<'_, u32>,
    rl: &BlockView<'_, u32>,
    left_map: &[u32],
    right_map: &[u32],
    n_global: u32,
    opts: &MergeOptions,
) -> Vec<u32> {
    let mut uf = UnionFindArray::new(n_global);
    merge_boundary_with(
        l,
        r,
        ll,
        rl,
        &LabelMap::new(left_map),
        &LabelMap::new(right_map),
        &mut uf,
        opts,
    )
    .unwrap();
    classes(&mut uf, n_global)
}

pub fn classes(uf: &mut UnionFindArray<u32>, n: u32) -> Vec<u32> {
    (0..n).map(|i| uf.find(i)).collect()
}

/// Stores `data` (C order for `shape`) transposed and returns a view that
/// presents it with the logical shape `shape`.
pub fn fortran_copy<T: Copy>(data: &[T], shape: &[usize]) -> Vec<T> {
    let dense = BlockView::from_slice(data, shape).unwrap();
    dense.t().iter().collect()
}

pub fn fortran_view<'a, T: Copy>(buf: &'a [T], shape: &[usize]) -> BlockView<'a, T> {
    let rev: Vec<usize> = shape.iter().rev().copied().collect();
    BlockView::from_slice(buf, &rev).unwrap().t()
}

pub const ALL_STRATEGIES: [Strategy; 5] = [
    Strategy::Auto,
    Strategy::Recursive,
    Strategy::StrideOrdered,
    Strategy::Coupled,
    Strategy::Flat,
];
