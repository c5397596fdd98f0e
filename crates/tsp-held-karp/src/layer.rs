use crate::pool::WorkerPool;
use crate::table::{Layer, Step};
use crossbeam_channel::unbounded;
use std::ops::Range;
use std::sync::Arc;
use tsp_core::{CostMatrix, SolveError, Subset, SubsetSpace};

/// Best way to finish `subset` at `last`, reading only the sealed layer
/// below. Ties keep the lowest-numbered predecessor. A sum that overflows
/// to infinity is no way at all.
#[inline]
fn best_step(
    matrix: &CostMatrix,
    space: &SubsetSpace,
    prev: &Layer,
    subset: Subset,
    last: usize,
) -> Option<Step> {
    let rest = subset.without(last);
    let rest_rank = space.rank(rest);
    let mut best: Option<Step> = None;

    for (position, m) in rest.nodes().enumerate() {
        let Some(prior) = prev.get(rest_rank, position) else { continue };
        let Some(edge) = matrix.cost(m, last) else { continue };
        let cost = prior.cost + edge;
        if !cost.is_finite() {
            continue;
        }
        if best.map_or(true, |b| cost < b.cost) {
            best = Some(Step::new(cost, m));
        }
    }
    best
}

/// Entries for the layer-`k` subsets whose colex rank is in `ranks`,
/// laid out exactly as they sit inside the finished [`Layer`].
pub fn solve_range(
    matrix: &CostMatrix,
    space: &SubsetSpace,
    prev: &Layer,
    k: usize,
    ranks: Range<usize>,
) -> Vec<Option<Step>> {
    let mut slots = Vec::with_capacity(ranks.len() * k);
    for subset in space.range(k, ranks) {
        for last in subset.nodes() {
            slots.push(best_step(matrix, space, prev, subset, last));
        }
    }
    slots
}

/// Fans one layer out over the pool and joins it back together.
pub struct LayerSolver<'a> {
    pool: &'a WorkerPool,
    chunks: usize,
}

impl<'a> LayerSolver<'a> {
    pub fn new(pool: &'a WorkerPool, chunks: usize) -> Self {
        LayerSolver { pool, chunks: chunks.max(1) }
    }

    /// Solves layer `k` from the sealed layer `k - 1`.
    ///
    /// Subsets are cut into contiguous rank ranges; every range writes its own
    /// span of the pre-sized slot vector, so the result does not depend on
    /// how many chunks or workers were used. Returns only once every chunk
    /// has come back.
    pub fn solve(
        &self,
        matrix: &Arc<CostMatrix>,
        space: &Arc<SubsetSpace>,
        prev: &Arc<Layer>,
        k: usize,
    ) -> Result<Layer, SolveError> {
        let subsets = space.layer_len(k);
        let chunks = self.chunks.min(subsets).max(1);
        let (tx, rx) = unbounded();

        for chunk in 0..chunks {
            let ranks = (subsets * chunk / chunks)..(subsets * (chunk + 1) / chunks);
            let matrix = Arc::clone(matrix);
            let space = Arc::clone(space);
            let prev = Arc::clone(prev);
            let tx = tx.clone();
            self.pool.execute(move || {
                let offset = ranks.start * k;
                let slots = solve_range(&matrix, &space, &prev, k, ranks);
                let _ = tx.send((offset, slots));
            });
        }
        drop(tx);

        let mut slots = vec![None; subsets * k];
        let mut received = 0;
        // Ends when every job has sent or dropped its sender.
        for (offset, part) in rx.iter() {
            slots[offset..offset + part.len()].copy_from_slice(&part);
            received += 1;
        }
        if received != chunks {
            return Err(SolveError::WorkerFailed { layer: k });
        }

        Ok(Layer::from_slots(k, slots))
    }
}
