use std::sync::Arc;
use tsp_core::{CostMatrix, Subset, SubsetSpace};

/// Best known way to end a partial tour: its cost and the node visited
/// just before the last one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub cost: f64,
    predecessor: u8,
}

impl Step {
    #[inline(always)]
    pub fn new(cost: f64, predecessor: usize) -> Self {
        Step { cost, predecessor: predecessor as u8 }
    }

    #[inline(always)]
    pub fn predecessor(&self) -> usize {
        self.predecessor as usize
    }
}

/// All entries for subsets of one size.
///
/// Slot `rank * k + position` holds the entry for the subset with that colex
/// rank ending at its `position`-th member. `None` means no path reaches it.
#[derive(Debug, Clone)]
pub struct Layer {
    k: usize,
    slots: Vec<Option<Step>>,
}

impl Layer {
    pub(crate) fn from_slots(k: usize, slots: Vec<Option<Step>>) -> Self {
        Layer { k, slots }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, rank: usize, position: usize) -> Option<Step> {
        self.slots.get(rank * self.k + position).copied().flatten()
    }

    /// Entries that some path actually reaches.
    pub fn reachable(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// The DP table as a stack of sealed generations, one per subset size.
///
/// Only the layer being computed is ever written, and it is not part of the
/// table until [`DpTable::seal`] pushes it; every layer already in the table
/// is immutable and can be shared with workers through its `Arc`.
#[derive(Debug)]
pub struct DpTable {
    space: Arc<SubsetSpace>,
    layers: Vec<Arc<Layer>>,
}

impl DpTable {
    /// Seeds layer 1: `{j}` ending at `j` costs `start -> j`.
    pub fn seeded(space: Arc<SubsetSpace>, matrix: &CostMatrix) -> Self {
        let start = space.start();
        let slots = space
            .range(1, 0..space.layer_len(1))
            .map(|single| {
                let node = single.bits().trailing_zeros() as usize;
                matrix.cost(start, node).map(|c| Step::new(c, start))
            })
            .collect();

        DpTable { space, layers: vec![Arc::new(Layer::from_slots(1, slots))] }
    }

    pub fn space(&self) -> &Arc<SubsetSpace> {
        &self.space
    }

    /// Size of the largest sealed layer.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// The most recently sealed layer.
    pub fn latest(&self) -> Arc<Layer> {
        Arc::clone(&self.layers[self.layers.len() - 1])
    }

    /// Appends the next generation. Layers must arrive in size order.
    pub fn seal(&mut self, layer: Layer) {
        debug_assert_eq!(layer.k(), self.depth() + 1, "layers must be sealed in order");
        self.layers.push(Arc::new(layer));
    }

    /// Slots allocated across all sealed layers.
    pub fn entries(&self) -> usize {
        self.layers.iter().map(|l| l.len()).sum()
    }

    /// Entry for `(subset, last)`, `None` if unreachable, not sealed yet,
    /// or `last` is not a member of `subset`.
    pub fn lookup(&self, subset: Subset, last: usize) -> Option<Step> {
        if subset.is_empty() || !subset.contains(last) {
            return None;
        }
        let layer = self.layers.get(subset.len() - 1)?;
        layer.get(self.space.rank(subset), subset.position(last))
    }
}

/// Slots needed for all layers of an `n`-node instance: `(n-1) * 2^(n-2)`.
pub fn total_entries(space: &SubsetSpace) -> usize {
    (1..space.n()).map(|k| k * space.layer_len(k)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0.0, 2.0, f64::INFINITY, 7.0],
            vec![1.0, 0.0, 3.0, 4.0],
            vec![5.0, 1.0, 0.0, 2.0],
            vec![6.0, 3.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn base_layer_starts_from_start() {
        let space = Arc::new(SubsetSpace::new(4, 0).unwrap());
        let table = DpTable::seeded(space, &matrix());
        assert_eq!(table.depth(), 1);
        assert_eq!(table.lookup(Subset::singleton(1), 1), Some(Step::new(2.0, 0)));
        assert_eq!(table.lookup(Subset::singleton(2), 2), None);
        assert_eq!(table.lookup(Subset::singleton(3), 3), Some(Step::new(7.0, 0)));
        assert_eq!(table.latest().reachable(), 2);
    }

    #[test]
    fn base_layer_skips_a_middle_start() {
        let space = Arc::new(SubsetSpace::new(4, 2).unwrap());
        let table = DpTable::seeded(space, &matrix());
        assert_eq!(table.lookup(Subset::singleton(0), 0), Some(Step::new(5.0, 2)));
        assert_eq!(table.lookup(Subset::singleton(3), 3), Some(Step::new(2.0, 2)));
        assert_eq!(table.latest().len(), 3);
    }

    #[test]
    fn lookup_requires_membership_and_sealed_layer() {
        let space = Arc::new(SubsetSpace::new(4, 0).unwrap());
        let table = DpTable::seeded(space, &matrix());
        assert_eq!(table.lookup(Subset::singleton(1), 3), None);
        assert_eq!(table.lookup(Subset::EMPTY, 0), None);
        let pair: Subset = [1, 3].into_iter().collect();
        assert_eq!(table.lookup(pair, 1), None);
    }

    #[test]
    fn total_entries_matches_closed_form() {
        for n in 2..12 {
            let space = SubsetSpace::new(n, 0).unwrap();
            assert_eq!(total_entries(&space), (n - 1) << (n - 2));
        }
    }
}
