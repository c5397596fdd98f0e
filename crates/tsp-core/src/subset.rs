use crate::error::{InvalidInput, ResourceLimit, SolveError};
use std::ops::Range;

/// Widest instance a `u32` node mask can describe.
pub const MAX_NODES: usize = 32;

/// A set of node indices packed into a bitmask; bit `i` is node `i`.
///
/// Equality and hashing are plain bit-pattern comparisons, so two subsets
/// are the same key exactly when they hold the same nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subset(u32);

impl Subset {
    pub const EMPTY: Subset = Subset(0);

    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Subset(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub fn singleton(node: usize) -> Self {
        Subset(1 << node)
    }

    #[inline(always)]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn contains(self, node: usize) -> bool {
        node < MAX_NODES && self.0 & (1 << node) != 0
    }

    #[inline(always)]
    pub fn with(self, node: usize) -> Self {
        Subset(self.0 | (1 << node))
    }

    #[inline(always)]
    pub fn without(self, node: usize) -> Self {
        Subset(self.0 & !(1 << node))
    }

    /// Number of members below `node`; the slot of `node` inside this subset.
    #[inline(always)]
    pub fn position(self, node: usize) -> usize {
        (self.0 & ((1u64 << node) - 1) as u32).count_ones() as usize
    }

    /// Members in ascending order.
    pub fn nodes(self) -> Nodes {
        Nodes(self.0)
    }
}

impl FromIterator<usize> for Subset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        iter.into_iter().fold(Subset::EMPTY, Subset::with)
    }
}

pub struct Nodes(u32);

impl Iterator for Nodes {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let node = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Nodes {}

/// The subsets of the non-start nodes of one instance.
///
/// Subsets of each size are ordered colexicographically, i.e. by the value
/// of their mask with the start bit squeezed out. That order is fixed for a
/// given `(n, start)`, and the combinatorial number system turns it into a
/// dense rank so a layer can be stored as a flat vector.
#[derive(Debug, Clone)]
pub struct SubsetSpace {
    n: usize,
    start: usize,
    binom: Vec<[usize; MAX_NODES + 1]>,
}

impl SubsetSpace {
    pub fn new(n: usize, start: usize) -> Result<Self, SolveError> {
        if n == 0 {
            return Err(InvalidInput::Empty.into());
        }
        if n > MAX_NODES {
            return Err(ResourceLimit::Nodes { n, max: MAX_NODES }.into());
        }
        if start >= n {
            return Err(InvalidInput::StartOutOfRange { start, n }.into());
        }

        let mut binom = vec![[0usize; MAX_NODES + 1]; MAX_NODES + 1];
        for row in 0..=MAX_NODES {
            binom[row][0] = 1;
            for col in 1..=row {
                binom[row][col] = binom[row - 1][col - 1] + binom[row - 1][col];
            }
        }

        Ok(SubsetSpace { n, start, binom })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// `C(a, b)`, zero when `b > a`.
    #[inline(always)]
    pub fn binomial(&self, a: usize, b: usize) -> usize {
        if b > a {
            0
        } else {
            self.binom[a][b]
        }
    }

    /// Every non-start node.
    pub fn full(&self) -> Subset {
        (0..self.n).filter(|&v| v != self.start).collect()
    }

    /// Number of subsets with `k` members.
    #[inline]
    pub fn layer_len(&self, k: usize) -> usize {
        self.binomial(self.n - 1, k)
    }

    /// Lazily enumerates the `k`-element subsets for a DP layer.
    ///
    /// Only layers `2..=n-1` exist; layer 1 is the base case and instances
    /// with fewer than three nodes have no layers at all.
    pub fn layer(&self, k: usize) -> Result<Combinations, InvalidInput> {
        if self.n < 3 {
            return Err(InvalidInput::TooFewNodes { n: self.n });
        }
        if k < 2 || k > self.n - 1 {
            return Err(InvalidInput::LayerOutOfRange { k, n: self.n });
        }
        Ok(self.range(k, 0..self.layer_len(k)))
    }

    /// The `k`-element subsets whose colex rank lies in `ranks`.
    pub fn range(&self, k: usize, ranks: Range<usize>) -> Combinations {
        let end = ranks.end.min(self.layer_len(k));
        let remaining = end.saturating_sub(ranks.start);
        let current = if remaining == 0 { 0 } else { self.unrank_compact(k, ranks.start) };
        Combinations { current, remaining, start: self.start }
    }

    /// Colex rank of `subset` among the subsets of the same size.
    #[inline]
    pub fn rank(&self, subset: Subset) -> usize {
        let compact = squeeze(subset.bits(), self.start);
        Nodes(compact)
            .enumerate()
            .map(|(i, pos)| self.binom[pos][i + 1])
            .sum()
    }

    /// Inverse of [`SubsetSpace::rank`] for subsets of size `k`.
    pub fn unrank(&self, k: usize, rank: usize) -> Subset {
        Subset(expand(self.unrank_compact(k, rank), self.start))
    }

    fn unrank_compact(&self, k: usize, mut rank: usize) -> u32 {
        let mut compact = 0u32;
        let mut pos = self.n - 1;
        for i in (1..=k).rev() {
            // Largest position whose binomial still fits in the remaining rank.
            pos -= 1;
            while self.binom[pos][i] > rank {
                pos -= 1;
            }
            compact |= 1 << pos;
            rank -= self.binom[pos][i];
        }
        compact
    }
}

/// Drops the start bit so the non-start nodes occupy consecutive positions.
#[inline(always)]
fn squeeze(bits: u32, start: usize) -> u32 {
    let bits = bits as u64;
    let low = bits & ((1u64 << start) - 1);
    let high = (bits >> (start + 1)) << start;
    (low | high) as u32
}

#[inline(always)]
fn expand(compact: u32, start: usize) -> u32 {
    let compact = compact as u64;
    let low = compact & ((1u64 << start) - 1);
    let high = (compact >> start) << (start + 1);
    (low | high) as u32
}

/// Gosper's-hack walk over fixed-size subsets, in colex order.
pub struct Combinations {
    current: u32,
    remaining: usize,
    start: usize,
}

impl Iterator for Combinations {
    type Item = Subset;

    fn next(&mut self) -> Option<Subset> {
        if self.remaining == 0 {
            return None;
        }
        let out = Subset(expand(self.current, self.start));
        self.remaining -= 1;
        if self.remaining > 0 {
            let c = self.current as u64;
            let t = c | (c - 1);
            let next = (t + 1) | (((!t & (t + 1)) - 1) >> (c.trailing_zeros() + 1));
            self.current = next as u32;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_membership_and_positions() {
        let s: Subset = [1, 4, 6].into_iter().collect();
        assert_eq!(s.len(), 3);
        assert!(s.contains(4));
        assert!(!s.contains(0));
        assert_eq!(s.position(1), 0);
        assert_eq!(s.position(6), 2);
        assert_eq!(s.without(4).nodes().collect::<Vec<_>>(), vec![1, 6]);
        assert_eq!(s.with(0).len(), 4);
        assert!(Subset::EMPTY.is_empty());
    }

    #[test]
    fn layer_holds_every_combination_without_start() {
        let space = SubsetSpace::new(6, 2).unwrap();
        let layer: Vec<Subset> = space.layer(3).unwrap().collect();
        assert_eq!(layer.len(), 10);
        assert!(layer.iter().all(|s| s.len() == 3 && !s.contains(2)));

        let mut sorted = layer.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let space = SubsetSpace::new(9, 4).unwrap();
        let a: Vec<Subset> = space.layer(4).unwrap().collect();
        let b: Vec<Subset> = space.layer(4).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn rank_matches_enumeration_order() {
        for start in [0, 3, 7] {
            let space = SubsetSpace::new(8, start).unwrap();
            for k in 2..8 {
                for (i, s) in space.layer(k).unwrap().enumerate() {
                    assert_eq!(space.rank(s), i);
                    assert_eq!(space.unrank(k, i), s);
                }
            }
        }
    }

    #[test]
    fn range_starts_mid_layer() {
        let space = SubsetSpace::new(7, 0).unwrap();
        let all: Vec<Subset> = space.layer(3).unwrap().collect();
        let tail: Vec<Subset> = space.range(3, 5..9).collect();
        assert_eq!(tail, all[5..9].to_vec());
        assert_eq!(space.range(3, 18..40).count(), 2);
        assert_eq!(space.range(3, 20..20).count(), 0);
    }

    #[test]
    fn full_subset_is_the_single_top_layer_entry() {
        let space = SubsetSpace::new(5, 1).unwrap();
        let top: Vec<Subset> = space.layer(4).unwrap().collect();
        assert_eq!(top, vec![space.full()]);
        assert_eq!(space.rank(space.full()), 0);
    }

    #[test]
    fn start_at_the_top_bit() {
        let space = SubsetSpace::new(MAX_NODES, MAX_NODES - 1).unwrap();
        let full = space.full();
        assert_eq!(full.len(), MAX_NODES - 1);
        assert!(!full.contains(MAX_NODES - 1));
        assert_eq!(space.unrank(MAX_NODES - 1, 0), full);
    }

    #[test]
    fn invalid_layers_are_rejected() {
        let space = SubsetSpace::new(5, 0).unwrap();
        assert_eq!(space.layer(1).err(), Some(InvalidInput::LayerOutOfRange { k: 1, n: 5 }));
        assert_eq!(space.layer(5).err(), Some(InvalidInput::LayerOutOfRange { k: 5, n: 5 }));

        let tiny = SubsetSpace::new(2, 0).unwrap();
        assert_eq!(tiny.layer(2).err(), Some(InvalidInput::TooFewNodes { n: 2 }));

        assert!(matches!(
            SubsetSpace::new(MAX_NODES + 1, 0),
            Err(SolveError::ResourceExceeded(ResourceLimit::Nodes { .. }))
        ));
        assert!(matches!(SubsetSpace::new(4, 4), Err(SolveError::InvalidInput(_))));
    }
}
